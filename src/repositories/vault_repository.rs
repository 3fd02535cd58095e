// src/repositories/vault_repository.rs

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseStats, VaultConfig,
};
use crate::domain::record::{GroundingSource, ResultRecord};
use crate::error::{AppError, AppResult};

/// Durable local persistence of result records.
///
/// `list_all` returns records newest first (timestamp descending, then id).
/// `save` is an upsert keyed by id and reports whether a stored record was
/// replaced. `delete` of an absent id is a no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaultStore: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<ResultRecord>>;
    async fn get(&self, id: &str) -> AppResult<Option<ResultRecord>>;
    async fn save(&self, record: &ResultRecord) -> AppResult<bool>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct SqliteVaultStore {
    config: Option<VaultConfig>,
    pool: OnceCell<Arc<ConnectionPool>>,
}

impl SqliteVaultStore {
    /// Store that opens its pool on first use
    pub fn new(config: VaultConfig) -> Self {
        Self {
            config: Some(config),
            pool: OnceCell::new(),
        }
    }

    /// Store over an existing pool; the schema is applied immediately
    pub fn from_pool(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }
        Ok(Self {
            config: None,
            pool: OnceCell::new_with(Some(pool)),
        })
    }

    async fn pool(&self) -> AppResult<Arc<ConnectionPool>> {
        let pool = self
            .pool
            .get_or_try_init(|| async {
                let config = self.config.clone().ok_or_else(|| {
                    AppError::StorageUnavailable("Vault has no pool and no config".to_string())
                })?;
                let pool = tokio::task::spawn_blocking(move || open_pool(&config)).await??;
                Ok::<_, AppError>(pool)
            })
            .await?;
        Ok(Arc::clone(pool))
    }

    /// Run blocking SQLite work on a pooled connection
    async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = self.pool().await?;
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            f(&mut *conn)
        })
        .await?
    }

    /// Integrity check followed by size and row counts
    pub async fn database_stats(&self) -> AppResult<DatabaseStats> {
        self.run(|conn| {
            verify_database_integrity(conn)?;
            get_database_stats(conn)
        })
        .await
    }
}

fn open_pool(config: &VaultConfig) -> AppResult<Arc<ConnectionPool>> {
    let pool = create_connection_pool(config)?;
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }
    log::info!("Vault opened at {}", config.database_path.display());
    Ok(Arc::new(pool))
}

fn row_to_record(row: &Row) -> Result<ResultRecord, rusqlite::Error> {
    let neural_paths = match row.get::<_, Option<String>>("neural_paths")? {
        Some(json) => Some(
            serde_json::from_str::<Vec<String>>(&json)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        ),
        None => None,
    };

    Ok(ResultRecord {
        id: row.get("id")?,
        prompt: row.get("prompt")?,
        story: row.get("story")?,
        image_url: row.get("image_url")?,
        video_url: row.get("video_url")?,
        audio_data: row.get("audio_data")?,
        sources: Vec::new(),
        neural_paths,
        timestamp: row.get("timestamp")?,
    })
}

const SELECT_RECORDS: &str = "SELECT id, prompt, story, image_url, video_url, audio_data, neural_paths, timestamp
     FROM vault_records";

fn load_all(conn: &mut Connection) -> AppResult<Vec<ResultRecord>> {
    // One read transaction so records and sources come from the same snapshot
    let tx = conn.transaction().map_err(AppError::read)?;

    let mut records: Vec<ResultRecord> = {
        let mut stmt = tx
            .prepare(&format!("{} ORDER BY timestamp DESC, id ASC", SELECT_RECORDS))
            .map_err(AppError::read)?;
        let rows = stmt
            .query_map([], row_to_record)
            .map_err(AppError::read)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::read)?;
        rows
    };

    let mut sources: HashMap<String, Vec<GroundingSource>> = HashMap::new();
    {
        let mut stmt = tx
            .prepare("SELECT record_id, title, uri FROM record_sources ORDER BY record_id, position")
            .map_err(AppError::read)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    GroundingSource {
                        title: row.get(1)?,
                        uri: row.get(2)?,
                    },
                ))
            })
            .map_err(AppError::read)?;
        for row in rows {
            let (record_id, source) = row.map_err(AppError::read)?;
            sources.entry(record_id).or_default().push(source);
        }
    }

    tx.commit().map_err(AppError::read)?;

    for record in &mut records {
        if let Some(list) = sources.remove(&record.id) {
            record.sources = list;
        }
    }

    Ok(records)
}

fn load_one(conn: &mut Connection, id: &str) -> AppResult<Option<ResultRecord>> {
    let tx = conn.transaction().map_err(AppError::read)?;

    let record = tx
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_RECORDS),
            params![id],
            row_to_record,
        )
        .optional()
        .map_err(AppError::read)?;

    let record = match record {
        Some(mut record) => {
            let mut stmt = tx
                .prepare("SELECT title, uri FROM record_sources WHERE record_id = ?1 ORDER BY position")
                .map_err(AppError::read)?;
            record.sources = stmt
                .query_map(params![id], |row| {
                    Ok(GroundingSource {
                        title: row.get(0)?,
                        uri: row.get(1)?,
                    })
                })
                .map_err(AppError::read)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(AppError::read)?;
            Some(record)
        }
        None => None,
    };

    tx.commit().map_err(AppError::read)?;
    Ok(record)
}

/// Upsert the record row and replace its sources in one transaction.
/// Any failure drops the transaction, leaving the previous state intact.
/// Returns true when a row with the same id already existed.
fn write_record(conn: &mut Connection, record: &ResultRecord) -> AppResult<bool> {
    let neural_paths = record
        .neural_paths
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| AppError::StorageWrite(format!("Cannot serialize neural paths: {}", e)))?;

    let tx = conn.transaction().map_err(AppError::write)?;

    let existed: bool = tx
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM vault_records WHERE id = ?1)",
            params![record.id],
            |row| row.get(0),
        )
        .map_err(AppError::write)?;

    tx.execute(
        "INSERT INTO vault_records (id, prompt, story, image_url, video_url, audio_data, neural_paths, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
             prompt = excluded.prompt,
             story = excluded.story,
             image_url = excluded.image_url,
             video_url = excluded.video_url,
             audio_data = excluded.audio_data,
             neural_paths = excluded.neural_paths,
             timestamp = excluded.timestamp",
        params![
            record.id,
            record.prompt,
            record.story,
            record.image_url,
            record.video_url,
            record.audio_data,
            neural_paths,
            record.timestamp,
        ],
    )
    .map_err(AppError::write)?;

    tx.execute(
        "DELETE FROM record_sources WHERE record_id = ?1",
        params![record.id],
    )
    .map_err(AppError::write)?;

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO record_sources (record_id, position, title, uri)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(AppError::write)?;
        for (position, source) in record.sources.iter().enumerate() {
            stmt.execute(params![record.id, position as i64, source.title, source.uri])
                .map_err(AppError::write)?;
        }
    }

    tx.commit().map_err(AppError::write)?;
    Ok(existed)
}

fn remove_record(conn: &mut Connection, id: &str) -> AppResult<bool> {
    let tx = conn.transaction().map_err(AppError::write)?;

    tx.execute("DELETE FROM record_sources WHERE record_id = ?1", params![id])
        .map_err(AppError::write)?;
    let removed = tx
        .execute("DELETE FROM vault_records WHERE id = ?1", params![id])
        .map_err(AppError::write)?;

    tx.commit().map_err(AppError::write)?;
    Ok(removed > 0)
}

#[async_trait]
impl VaultStore for SqliteVaultStore {
    async fn list_all(&self) -> AppResult<Vec<ResultRecord>> {
        self.run(load_all).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<ResultRecord>> {
        let id = id.to_string();
        self.run(move |conn| load_one(conn, &id)).await
    }

    async fn save(&self, record: &ResultRecord) -> AppResult<bool> {
        let record = record.clone();
        self.run(move |conn| {
            let replaced = write_record(conn, &record)?;
            log::debug!(
                "Saved record {} ({} sources, replaced: {})",
                record.id,
                record.sources.len(),
                replaced
            );
            Ok(replaced)
        })
        .await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let id = id.to_string();
        self.run(move |conn| {
            if remove_record(conn, &id)? {
                log::debug!("Deleted record {}", id);
            } else {
                log::debug!("Delete of unknown record {} ignored", id);
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> AppResult<u64> {
        self.run(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM vault_records", [], |row| row.get(0))
                .map_err(AppError::read)?;
            Ok(count as u64)
        })
        .await
    }
}
