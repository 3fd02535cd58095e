// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod record;
pub mod view;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Record Domain
pub use record::{validate_record, GroundingSource, MediaRef, ResultRecord};

// View State
pub use view::{AppMode, GenerationMode, Language, ViewState};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
