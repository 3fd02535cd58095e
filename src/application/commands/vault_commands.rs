// src/application/commands/vault_commands.rs
//
// Vault Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use crate::application::dto::*;
use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::repositories::VaultStore;

/// Load the collection from the store into the cache
pub async fn load_vault(state: &AppState) -> Result<usize, String> {
    state.vault_service.hydrate().await.to_error_response()
}

/// List cached records, newest first
pub async fn list_records(state: &AppState) -> Result<Vec<ResultRecordDto>, String> {
    let records = state.vault_service.items().await;
    Ok(records.into_iter().map(ResultRecordDto::from).collect())
}

/// Get one record, falling back to the store when it is not cached
pub async fn get_record(record_id: String, state: &AppState) -> Result<ResultRecordDto, String> {
    if let Some(record) = state.vault_service.get(&record_id).await {
        return Ok(ResultRecordDto::from(record));
    }

    let stored = state
        .vault_store
        .get(&record_id)
        .await
        .to_error_response()?;

    stored
        .map(ResultRecordDto::from)
        .ok_or_else(|| ErrorResponse::not_found("Record").into_command_error())
}

/// Save a generated result; returns its id
pub async fn save_record(dto: SaveRecordDto, state: &AppState) -> Result<String, String> {
    if dto.prompt.trim().is_empty() {
        return Err(
            ErrorResponse::validation("Prompt cannot be empty".to_string()).into_command_error(),
        );
    }

    let record = dto.into_record();
    let id = record.id.clone();

    state.vault_service.save(record).await.to_error_response()?;

    Ok(id)
}

/// Delete a record by id; unknown ids succeed
pub async fn delete_record(record_id: String, state: &AppState) -> Result<(), String> {
    state
        .vault_service
        .delete(&record_id)
        .await
        .to_error_response()
}

pub async fn vault_summary(state: &AppState) -> Result<VaultSummaryDto, String> {
    let summary = state.vault_service.summary().await.to_error_response()?;
    Ok(VaultSummaryDto::from(summary))
}

/// Integrity check plus size and row counts
pub async fn vault_stats(state: &AppState) -> Result<DatabaseStatsDto, String> {
    let stats = state.vault_store.database_stats().await.to_error_response()?;
    Ok(DatabaseStatsDto::from(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::db::create_in_memory_pool;
    use crate::repositories::SqliteVaultStore;
    use std::sync::Arc;

    fn state() -> AppState {
        let pool = Arc::new(create_in_memory_pool().unwrap());
        AppState::with_store(Arc::new(SqliteVaultStore::from_pool(pool).unwrap()))
    }

    fn cat(id: &str, timestamp: i64) -> SaveRecordDto {
        SaveRecordDto {
            id: Some(id.to_string()),
            prompt: "a cat".to_string(),
            story: "Once...".to_string(),
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_list_delete_scenario() {
        let state = state();

        let id = save_record(cat("a1", 1000), &state).await.unwrap();
        assert_eq!(id, "a1");

        let listed = list_records(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "a1");
        assert_eq!(listed[0].timestamp, 1000);

        delete_record("a1".to_string(), &state).await.unwrap();
        assert!(list_records(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_record_reads_through_to_store() {
        let state = state();
        save_record(cat("a1", 1000), &state).await.unwrap();

        // A second app state over the same store has an empty cache
        let other = AppState::with_store(state.vault_store.clone());
        let record = get_record("a1".to_string(), &other).await.unwrap();
        assert_eq!(record.prompt, "a cat");

        assert_eq!(load_vault(&other).await.unwrap(), 1);
        assert_eq!(vault_summary(&other).await.unwrap().cached_records, 1);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let state = state();
        let err = get_record("nope".to_string(), &state).await.unwrap_err();

        let response: ErrorResponse = serde_json::from_str(&err).unwrap();
        assert_eq!(response.error_type, ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected() {
        let state = state();
        let mut dto = cat("a1", 1);
        dto.prompt = "   ".to_string();

        let err = save_record(dto, &state).await.unwrap_err();
        let response: ErrorResponse = serde_json::from_str(&err).unwrap();
        assert_eq!(response.error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_stats_after_saves() {
        let state = state();
        save_record(cat("a1", 1), &state).await.unwrap();
        save_record(cat("a2", 2), &state).await.unwrap();

        let stats = vault_stats(&state).await.unwrap();
        assert_eq!(stats.record_count, 2);
        assert!(stats.size_bytes > 0);
    }
}
