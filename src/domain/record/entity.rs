use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::MediaRef;

/// A citation attached to a generated result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

impl GroundingSource {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// One generation result kept in the Vault.
///
/// The producer assigns `id` and `timestamp`; the store never rewrites them.
/// A saved record is only ever replaced whole or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Opaque identifier, unique within the Vault
    pub id: String,

    /// Text the user submitted
    pub prompt: String,

    /// Generated narrative (may be empty)
    pub story: String,

    /// Remote URL or data URI of the generated image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Remote URL or data URI of the generated video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Embedded encoded audio payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,

    /// Citations, in display order
    #[serde(default)]
    pub sources: Vec<GroundingSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neural_paths: Option<Vec<String>>,

    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

impl ResultRecord {
    /// Create a fresh record the way the generation side does:
    /// random id, current wall-clock time, no media attached.
    pub fn new(prompt: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            story: story.into(),
            image_url: None,
            video_url: None,
            audio_data: None,
            sources: Vec::new(),
            neural_paths: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_video(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    pub fn with_audio(mut self, audio_data: impl Into<String>) -> Self {
        self.audio_data = Some(audio_data.into());
        self
    }

    pub fn with_sources(mut self, sources: Vec<GroundingSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_neural_paths(mut self, paths: Vec<String>) -> Self {
        self.neural_paths = Some(paths);
        self
    }

    /// Creation time as a UTC datetime, if the millisecond value is in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn image(&self) -> Option<MediaRef<'_>> {
        self.image_url.as_deref().map(MediaRef::classify)
    }

    pub fn video(&self) -> Option<MediaRef<'_>> {
        self.video_url.as_deref().map(MediaRef::classify)
    }

    pub fn has_media(&self) -> bool {
        self.image_url.is_some() || self.video_url.is_some() || self.audio_data.is_some()
    }
}

impl std::fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.prompt, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_id_and_timestamp() {
        let a = ResultRecord::new("a cat", "Once...");
        let b = ResultRecord::new("a cat", "Once...");

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert!(a.timestamp > 0);
        assert!(a.created_at().is_some());
        assert!(!a.has_media());
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_absent_fields() {
        let record = ResultRecord {
            id: "a1".to_string(),
            prompt: "a cat".to_string(),
            story: "Once...".to_string(),
            image_url: Some("https://img.example/cat.png".to_string()),
            video_url: None,
            audio_data: None,
            sources: vec![],
            neural_paths: None,
            timestamp: 1000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["imageUrl"], "https://img.example/cat.png");
        assert!(json.get("videoUrl").is_none());
        assert!(json.get("audioData").is_none());
        assert!(json.get("neuralPaths").is_none());
        assert_eq!(json["timestamp"], 1000);
    }

    #[test]
    fn test_json_without_optional_fields_parses() {
        let json = r#"{"id":"a1","prompt":"a cat","story":"","timestamp":1000}"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "a1");
        assert!(record.sources.is_empty());
        assert!(record.neural_paths.is_none());
    }

    #[test]
    fn test_created_at_matches_millis() {
        let mut record = ResultRecord::new("p", "s");
        record.timestamp = 1_700_000_000_123;
        let created = record.created_at().unwrap();
        assert_eq!(created.timestamp_millis(), 1_700_000_000_123);
    }
}
