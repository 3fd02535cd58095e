// src/events/types.rs
//
// Vault events.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

/// Emitted after the in-memory collection was loaded from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultHydrated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub record_count: usize,
}

impl VaultHydrated {
    pub fn new(record_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            record_count,
        }
    }
}

impl DomainEvent for VaultHydrated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VaultHydrated" }
}

/// Emitted after a record was durably saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub record_id: String,
    /// True when the store already held a record with the same id
    pub replaced: bool,
}

impl RecordSaved {
    pub fn new(record_id: String, replaced: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            record_id,
            replaced,
        }
    }
}

impl DomainEvent for RecordSaved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RecordSaved" }
}

/// Emitted after a delete reached the store, whether or not the id existed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub record_id: String,
    pub was_cached: bool,
}

impl RecordDeleted {
    pub fn new(record_id: String, was_cached: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            record_id,
            was_cached,
        }
    }
}

impl DomainEvent for RecordDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RecordDeleted" }
}
