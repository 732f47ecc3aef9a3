// Library interactor - Catalog browsing and maintenance use cases

use std::sync::Arc;

use crate::domain::errors::TrimResult;
use crate::domain::model::ClipRecord;
use crate::ports::{CatalogPort, LogPort};

/// Interactor for the saved-clip library
pub struct LibraryInteractor {
    catalog: Arc<dyn CatalogPort>,
    log: Arc<dyn LogPort>,
}

impl LibraryInteractor {
    pub fn new(catalog: Arc<dyn CatalogPort>, log: Arc<dyn LogPort>) -> Self {
        Self { catalog, log }
    }

    /// All saved clips, newest first
    pub async fn list(&self) -> TrimResult<Vec<ClipRecord>> {
        self.catalog.list().await
    }

    /// Remove one clip and its media files. Removing an absent id
    /// succeeds; storage failures are propagated, never swallowed.
    pub async fn remove(&self, id: &str) -> TrimResult<()> {
        self.log.info(&format!("Removing clip {}", id)).await;
        self.catalog.remove(id).await
    }

    /// Remove every clip and its media files
    pub async fn clear(&self) -> TrimResult<()> {
        self.log.warn("Clearing the entire clip catalog").await;
        self.catalog.clear().await
    }
}
