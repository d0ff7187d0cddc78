//! Value object trait: equality by value, not identity.
//!
//! Prices, totals and selections have no identity of their own. Two quotes
//! built from the same selection are the same quote.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Money(u64);
///
/// impl ValueObject for Money {}
///
/// assert_eq!(Money(1200), Money(1200));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
