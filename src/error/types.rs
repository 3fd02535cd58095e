// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The storage engine could not be opened or a connection could not be acquired
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The engine rejected a write (quota, constraint, serialization, I/O)
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// The engine rejected a read, or a stored row could not be decoded
    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }

    pub fn write(err: impl std::fmt::Display) -> Self {
        AppError::StorageWrite(err.to_string())
    }

    pub fn read(err: impl std::fmt::Display) -> Self {
        AppError::StorageRead(err.to_string())
    }

    /// True for the three storage failure kinds
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::StorageWrite(_) | AppError::StorageRead(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Storage task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kinds_are_distinguishable() {
        assert!(matches!(
            AppError::unavailable("disabled"),
            AppError::StorageUnavailable(_)
        ));
        assert!(matches!(AppError::write("quota"), AppError::StorageWrite(_)));
        assert!(matches!(AppError::read("corrupt"), AppError::StorageRead(_)));
        assert!(AppError::write("quota").is_storage());
        assert!(!AppError::NotFound.is_storage());
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::write("disk full")).unwrap();
        assert_eq!(json, "\"Storage write error: disk full\"");
    }
}
