//! `cursorcat-events` — in-process change notification.
//!
//! Views that render the same state (the package cards and the calculator)
//! subscribe here instead of reading a global store.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{DEFAULT_CAPACITY, InMemoryBusError, InMemoryEventBus};
