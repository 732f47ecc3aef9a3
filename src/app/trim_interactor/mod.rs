// Trim interactor - Orchestrates the export handoff use case
//
// Validates the committed selection, invokes the external encode step,
// derives a best-effort preview thumbnail from the output, and posts the
// record to the catalog. The catalog add is the sole commit point: any
// earlier failure leaves no partial entry.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::{TrimError, TrimResult};
use crate::domain::model::{ClipRecord, ExportRequest, THUMBNAIL_COUNT};
use crate::ports::{CatalogPort, ConfigPort, EncodePort, LogPort};
use crate::thumbs::ThumbnailSampler;

/// Interactor for committing a trim selection
pub struct TrimInteractor {
    encode: Arc<dyn EncodePort>,
    catalog: Arc<dyn CatalogPort>,
    config: Arc<dyn ConfigPort>,
    log: Arc<dyn LogPort>,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports
    pub fn new(
        encode: Arc<dyn EncodePort>,
        catalog: Arc<dyn CatalogPort>,
        config: Arc<dyn ConfigPort>,
        log: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            encode,
            catalog,
            config,
            log,
        }
    }

    /// Commit an export request against the known media duration.
    ///
    /// Returns the catalogued record. The encoder is never called for a
    /// range that fails validation, and session state owned by the caller
    /// is untouched on any failure so the user can retry.
    pub async fn commit(
        &self,
        request: ExportRequest,
        media_duration: f64,
    ) -> TrimResult<ClipRecord> {
        self.validate(&request, media_duration)?;

        self.log
            .info(&format!(
                "Trimming {} [{:.2}s..{:.2}s]",
                request.source_uri, request.start_seconds, request.end_seconds
            ))
            .await;

        let output_uri = self
            .encode
            .trim(
                &request.source_uri,
                request.start_seconds,
                request.duration_seconds,
            )
            .await?;

        // Preview thumbnail from the output clip. Best effort: a clip
        // without a preview image still gets catalogued.
        let thumbnail_uri = self.sample_preview(&output_uri, request.duration_seconds).await;
        if thumbnail_uri.is_none() {
            self.log
                .warn("No preview thumbnail could be extracted, using placeholder")
                .await;
        }

        let record = ClipRecord::from_export(&request, output_uri, thumbnail_uri, Utc::now());
        self.catalog.add(record.clone()).await?;

        self.log
            .info(&format!("Clip {} saved to catalog", record.id))
            .await;
        Ok(record)
    }

    fn validate(&self, request: &ExportRequest, media_duration: f64) -> TrimResult<()> {
        if media_duration <= 0.0 || !media_duration.is_finite() {
            return Err(TrimError::DurationUnknown);
        }
        if request.duration_seconds <= 0.0 {
            return Err(TrimError::invalid_range(
                "selection duration must be positive",
            ));
        }
        if request.duration_seconds > media_duration {
            return Err(TrimError::invalid_range(format!(
                "selection of {:.2}s exceeds media duration {:.2}s",
                request.duration_seconds, media_duration
            )));
        }
        Ok(())
    }

    async fn sample_preview(&self, output_uri: &str, clip_duration: f64) -> Option<String> {
        let count = self
            .config
            .get_or_default("thumbnail_count", &THUMBNAIL_COUNT.to_string())
            .await
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(THUMBNAIL_COUNT);

        let sampler = ThumbnailSampler::new(Arc::clone(&self.encode));
        let set = sampler.sample(output_uri, clip_duration, count).await;
        set.first_uri().map(|s| s.to_string())
    }
}
