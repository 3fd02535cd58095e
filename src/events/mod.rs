// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and is not exported

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry, DEFAULT_LOG_CAPACITY};
pub use types::{DomainEvent, RecordDeleted, RecordSaved, VaultHydrated};

/// Event bus with the default log capacity
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
