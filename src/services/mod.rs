// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod vault_service;

pub use vault_service::{VaultService, VaultSummary};
