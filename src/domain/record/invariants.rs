use super::entity::ResultRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates all ResultRecord invariants
/// Checked before a record is handed to the store
pub fn validate_record(record: &ResultRecord) -> DomainResult<()> {
    validate_id(&record.id)?;
    validate_timestamp(record.timestamp)?;
    validate_media("imageUrl", record.image_url.as_deref())?;
    validate_media("videoUrl", record.video_url.as_deref())?;
    validate_media("audioData", record.audio_data.as_deref())?;
    validate_sources(record)?;
    Ok(())
}

fn validate_id(id: &str) -> DomainResult<()> {
    if id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Record id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_timestamp(timestamp: i64) -> DomainResult<()> {
    if timestamp < 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Record timestamp {} cannot be negative",
            timestamp
        )));
    }
    Ok(())
}

/// Present media must carry something; absence is expressed with None
fn validate_media(field: &str, value: Option<&str>) -> DomainResult<()> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "{} is present but empty",
                field
            )));
        }
    }
    Ok(())
}

fn validate_sources(record: &ResultRecord) -> DomainResult<()> {
    for (idx, source) in record.sources.iter().enumerate() {
        if source.uri.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "Source #{} has an empty uri",
                idx
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold true for ResultRecord:
///
/// 1. Identity is assigned by the producer and never changes
/// 2. Id cannot be blank
/// 3. Timestamp is a non-negative epoch-millisecond value
/// 4. Story may be empty, prompt is kept as given
/// 5. Optional media is either absent or non-blank
/// 6. Sources keep their order and each has a uri

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::GroundingSource;

    #[test]
    fn test_valid_record() {
        let record = ResultRecord::new("a cat", "")
            .with_image("data:image/png;base64,AAAA")
            .with_sources(vec![GroundingSource::new("Wiki", "https://wiki.example/cat")]);
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_blank_id_fails() {
        let mut record = ResultRecord::new("a cat", "Once...");
        record.id = "  ".to_string();
        assert!(validate_record(&record).is_err());
    }

    #[test]
    fn test_negative_timestamp_fails() {
        let mut record = ResultRecord::new("a cat", "Once...");
        record.timestamp = -1;
        assert!(validate_record(&record).is_err());
    }

    #[test]
    fn test_empty_media_fails() {
        let record = ResultRecord::new("a cat", "Once...").with_video("");
        let err = validate_record(&record).unwrap_err();
        assert!(err.to_string().contains("videoUrl"));
    }

    #[test]
    fn test_source_without_uri_fails() {
        let record = ResultRecord::new("a cat", "Once...")
            .with_sources(vec![GroundingSource::new("No link", " ")]);
        assert!(validate_record(&record).is_err());
    }
}
