// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the front end and services
// - Commands accept DTOs, return DTOs
// - Commands turn errors into serialized ErrorResponse strings
// - Commands NEVER contain business logic

pub mod vault_commands;
pub mod view_commands;

pub use vault_commands::*;
pub use view_commands::*;
