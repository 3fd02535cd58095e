// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod vault_repository;

pub use vault_repository::{SqliteVaultStore, VaultStore};

#[cfg(test)]
pub use vault_repository::MockVaultStore;
