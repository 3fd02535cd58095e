// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are front-end friendly representations
// - DTOs are simple, serializable structs
// - Field names follow the front end (camelCase)
// - Absent optional fields are omitted, not sent as null

use serde::{Deserialize, Serialize};

use crate::db::DatabaseStats;
use crate::domain::{GroundingSource, ResultRecord, ViewState};
use crate::services::VaultSummary;

// ============================================================================
// RECORD DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSourceDto {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecordDto {
    pub id: String,
    pub prompt: String,
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
    pub sources: Vec<GroundingSourceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neural_paths: Option<Vec<String>>,
    pub timestamp: i64,
    /// RFC 3339 rendering of `timestamp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Incoming result from the generation side.
///
/// `id` and `timestamp` are normally assigned by the producer; when they
/// are missing a fresh id and the current time are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecordDto {
    #[serde(default)]
    pub id: Option<String>,
    pub prompt: String,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub audio_data: Option<String>,
    #[serde(default)]
    pub sources: Vec<GroundingSourceDto>,
    #[serde(default)]
    pub neural_paths: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// ============================================================================
// VAULT / VIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSummaryDto {
    pub cached_records: usize,
    pub stored_records: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatsDto {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub record_count: i64,
    pub source_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStateDto {
    pub mode: String,
    pub language: String,
    pub generation_mode: String,
    pub mobile_menu_open: bool,
}

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

impl From<GroundingSource> for GroundingSourceDto {
    fn from(source: GroundingSource) -> Self {
        Self {
            title: source.title,
            uri: source.uri,
        }
    }
}

impl From<ResultRecord> for ResultRecordDto {
    fn from(record: ResultRecord) -> Self {
        let created_at = record.created_at().map(|d| d.to_rfc3339());
        Self {
            id: record.id,
            prompt: record.prompt,
            story: record.story,
            image_url: record.image_url,
            video_url: record.video_url,
            audio_data: record.audio_data,
            sources: record.sources.into_iter().map(GroundingSourceDto::from).collect(),
            neural_paths: record.neural_paths,
            timestamp: record.timestamp,
            created_at,
        }
    }
}

impl SaveRecordDto {
    /// Build the domain record, filling in identity and time when absent
    pub fn into_record(self) -> ResultRecord {
        let mut record = ResultRecord::new(self.prompt, self.story);
        if let Some(id) = self.id {
            record.id = id;
        }
        if let Some(timestamp) = self.timestamp {
            record.timestamp = timestamp;
        }
        record.image_url = self.image_url;
        record.video_url = self.video_url;
        record.audio_data = self.audio_data;
        record.sources = self
            .sources
            .into_iter()
            .map(|s| GroundingSource::new(s.title, s.uri))
            .collect();
        record.neural_paths = self.neural_paths;
        record
    }
}

impl From<VaultSummary> for VaultSummaryDto {
    fn from(summary: VaultSummary) -> Self {
        Self {
            cached_records: summary.cached,
            stored_records: summary.stored,
        }
    }
}

impl From<DatabaseStats> for DatabaseStatsDto {
    fn from(stats: DatabaseStats) -> Self {
        Self {
            size_bytes: stats.size_bytes,
            page_count: stats.page_count,
            page_size: stats.page_size,
            record_count: stats.record_count,
            source_count: stats.source_count,
        }
    }
}

impl From<ViewState> for ViewStateDto {
    fn from(state: ViewState) -> Self {
        Self {
            mode: state.mode.to_string(),
            language: state.language.to_string(),
            generation_mode: state.generation_mode.to_string(),
            mobile_menu_open: state.mobile_menu_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_dto_keeps_producer_identity() {
        let dto: SaveRecordDto = serde_json::from_str(
            r#"{"id":"a1","prompt":"a cat","story":"Once...","sources":[],"timestamp":1000}"#,
        )
        .unwrap();
        let record = dto.into_record();

        assert_eq!(record.id, "a1");
        assert_eq!(record.timestamp, 1000);
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_save_dto_assigns_missing_identity() {
        let dto: SaveRecordDto = serde_json::from_str(r#"{"prompt":"a cat"}"#).unwrap();
        let record = dto.into_record();

        assert!(!record.id.is_empty());
        assert!(record.timestamp > 0);
        assert_eq!(record.story, "");
    }

    #[test]
    fn test_record_dto_omits_absent_media() {
        let record = ResultRecord {
            id: "a1".to_string(),
            prompt: "a cat".to_string(),
            story: "Once...".to_string(),
            image_url: None,
            video_url: None,
            audio_data: Some("UklGR".to_string()),
            sources: vec![GroundingSource::new("Wiki", "https://wiki.example")],
            neural_paths: None,
            timestamp: 1000,
        };
        let json = serde_json::to_value(ResultRecordDto::from(record)).unwrap();

        assert!(json.get("imageUrl").is_none());
        assert_eq!(json["audioData"], "UklGR");
        assert_eq!(json["sources"][0]["uri"], "https://wiki.example");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:01+00:00");
    }
}
