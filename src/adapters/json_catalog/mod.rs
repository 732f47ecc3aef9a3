// JSON catalog adapter - Clip catalog persisted as a JSON file
//
// Replaces the original on-device database: one record per saved clip,
// listed newest first, media and thumbnail files removed together with
// their record. Storage failures are propagated to the caller; only the
// absent-id case of `remove` is treated as success.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::errors::{TrimError, TrimResult};
use crate::domain::model::ClipRecord;
use crate::ports::CatalogPort;

pub struct JsonCatalogAdapter {
    path: PathBuf,
}

impl JsonCatalogAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> TrimResult<Vec<ClipRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TrimError::catalog_failed(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            TrimError::catalog_failed(format!("corrupt catalog {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, records: &[ClipRecord]) -> TrimResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TrimError::catalog_failed(format!("cannot create catalog dir: {}", e))
                })?;
            }
        }
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| TrimError::catalog_failed(format!("cannot serialize catalog: {}", e)))?;
        std::fs::write(&self.path, content).map_err(|e| {
            TrimError::catalog_failed(format!("cannot write {}: {}", self.path.display(), e))
        })
    }

    /// Media file removal is best-effort: a stale uri must not block
    /// catalog cleanup.
    fn remove_file_best_effort(uri: &str) {
        let path = Path::new(uri);
        if !path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(path) {
            warn!(uri, %e, "could not remove media file");
        }
    }

    fn remove_record_files(record: &ClipRecord) {
        Self::remove_file_best_effort(&record.media_uri);
        if let Some(thumb) = &record.thumbnail_uri {
            Self::remove_file_best_effort(thumb);
        }
    }
}

#[async_trait]
impl CatalogPort for JsonCatalogAdapter {
    async fn add(&self, record: ClipRecord) -> TrimResult<()> {
        let mut records = self.read_all()?;
        debug!(id = %record.id, name = %record.name, "adding clip to catalog");
        records.retain(|r| r.id != record.id);
        records.push(record);
        self.write_all(&records)
    }

    async fn list(&self) -> TrimResult<Vec<ClipRecord>> {
        let mut records = self.read_all()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn remove(&self, id: &str) -> TrimResult<()> {
        let mut records = self.read_all()?;
        let Some(pos) = records.iter().position(|r| r.id == id) else {
            debug!(id, "remove for absent clip id, nothing to do");
            return Ok(());
        };
        let record = records.remove(pos);
        self.write_all(&records)?;
        Self::remove_record_files(&record);
        Ok(())
    }

    async fn clear(&self) -> TrimResult<()> {
        let records = self.read_all()?;
        self.write_all(&[])?;
        for record in &records {
            Self::remove_record_files(record);
        }
        Ok(())
    }
}
