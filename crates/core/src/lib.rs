//! `cursorcat-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod error;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use money::{Money, format_currency, CURRENCY_CODE};
pub use value_object::ValueObject;
