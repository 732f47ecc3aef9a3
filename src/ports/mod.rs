// Ports - Interface definitions (contracts) for external collaborators

use async_trait::async_trait;

use crate::domain::errors::TrimResult;
use crate::domain::model::ClipRecord;

/// Port for the clip catalog store
///
/// `add` is the sole commit point of an export: a failed add leaves no
/// partial entry. `remove` is idempotent; removing an absent id succeeds.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Persist a record for a saved clip
    async fn add(&self, record: ClipRecord) -> TrimResult<()>;

    /// All records, newest `created_at` first
    async fn list(&self) -> TrimResult<Vec<ClipRecord>>;

    /// Remove a record and its media files; absent ids are not an error
    async fn remove(&self, id: &str) -> TrimResult<()>;

    /// Remove all records and associated media files
    async fn clear(&self) -> TrimResult<()>;
}

/// Port for the external trim/encode operation
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Cut `[start, start + duration]` out of the source media, returning
    /// the output media uri. Fails with `EncodeFailed`.
    async fn trim(
        &self,
        source_uri: &str,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> TrimResult<String>;

    /// Extract a single frame at `at_seconds` as an image, returning its
    /// uri. Fails with `ThumbnailSampleFailed`.
    async fn extract_frame(&self, media_uri: &str, at_seconds: f64) -> TrimResult<String>;
}

/// Port for the media playback backend
///
/// Position updates are pulled by the owning session loop and fed to the
/// playback synchronizer; the backend never mutates selection state.
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// Load a media item and return its duration in seconds
    async fn load(&self, media_uri: &str) -> TrimResult<f64>;

    /// Start playback from the current position
    async fn play(&self) -> TrimResult<()>;

    /// Pause playback, keeping the current position
    async fn pause(&self) -> TrimResult<()>;

    /// Seek to an absolute position in seconds
    async fn seek(&self, seconds: f64) -> TrimResult<()>;

    /// Current playback position in seconds
    async fn position(&self) -> TrimResult<f64>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get(&self, key: &str) -> TrimResult<Option<String>>;

    /// Get configuration value with default
    async fn get_or_default(&self, key: &str, default: &str) -> TrimResult<String>;

    /// Set configuration value
    async fn set(&self, key: &str, value: &str) -> TrimResult<()>;

    /// Load configuration from file
    async fn load_file(&self, file_path: &str) -> TrimResult<()>;

    /// Save configuration to file
    async fn save_file(&self, file_path: &str) -> TrimResult<()>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}
