// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for the front end
// - Never exposes internal implementation details
// - Logs errors for debugging

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Standard error response for the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Invalid input
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Local storage disabled, unsupported or unreachable
    StorageUnavailable,

    /// Storage read or write rejected
    Database,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::not_found("Resource"),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: "Record validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::StorageUnavailable(reason) => {
                log::error!("Vault unavailable: {}", reason);

                Self {
                    success: false,
                    error_type: ErrorType::StorageUnavailable,
                    message: "Local vault is unavailable".to_string(),
                    details: Some(reason),
                }
            }

            AppError::StorageWrite(reason) => {
                log::error!("Vault write failed: {}", reason);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Could not write to the vault".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::StorageRead(reason) => {
                log::error!("Vault read failed: {}", reason);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Could not read the vault".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Validation,
                    message: "Malformed record data".to_string(),
                    details: Some(serde_error.to_string()),
                }
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }

    /// JSON string handed back to the caller as the command error
    pub fn into_command_error(self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results into command errors
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).into_command_error())
    }
}
