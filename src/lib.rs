// src/lib.rs
// Imagine X Vault - Local-first store for generated creative results
//
// Architecture:
// - Domain-centric: record shape and invariants live in domain
// - Repositories are dumb mappers over a local SQLite file
// - Services keep the in-memory collection and emit events
// - Application layer is the boundary for any front end
// - Local-first: nothing leaves the device

pub mod application;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_record, AppMode, DomainError, GenerationMode, GroundingSource, Language, MediaRef,
    ResultRecord, ViewState,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, DomainEvent, EventBus, EventLogEntry, RecordDeleted, RecordSaved,
    VaultHydrated,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool, VaultConfig};

// ============================================================================
// PUBLIC API - Repositories & Services
// ============================================================================

pub use repositories::{SqliteVaultStore, VaultStore};
pub use services::{VaultService, VaultSummary};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use application::commands;
pub use application::dto;
