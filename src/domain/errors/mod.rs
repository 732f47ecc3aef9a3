//! Error types for the trim-session core

use thiserror::Error;

/// Main error type for clip-trim operations
#[derive(Error, Debug)]
pub enum TrimError {
    /// Selection violates duration/bounds invariants
    #[error("Invalid selection range: {reason}")]
    InvalidRange { reason: String },

    /// Pixel/seconds conversions requested before media duration is known
    #[error("Media duration is unknown or zero; timeline conversions are disabled")]
    DurationUnknown,

    /// Media backend not ready or errored
    #[error("Playback unavailable: {reason}")]
    PlaybackUnavailable { reason: String },

    /// External encode step failed
    #[error("Encode failed: {reason}")]
    EncodeFailed { reason: String },

    /// Single thumbnail extraction attempt failed (per-attempt, never fatal)
    #[error("Thumbnail sampling failed at {at_seconds}s: {reason}")]
    ThumbnailSampleFailed { at_seconds: f64, reason: String },

    /// Catalog store rejected an operation
    #[error("Catalog operation failed: {reason}")]
    CatalogFailed { reason: String },

    /// Bad user-supplied arguments (time strings, ids, paths)
    #[error("Bad arguments: {reason}")]
    BadArgs { reason: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrimError {
    /// Shorthand for `InvalidRange` with a formatted reason
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        TrimError::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Shorthand for `PlaybackUnavailable`
    pub fn playback_unavailable(reason: impl Into<String>) -> Self {
        TrimError::PlaybackUnavailable {
            reason: reason.into(),
        }
    }

    /// Shorthand for `EncodeFailed`
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        TrimError::EncodeFailed {
            reason: reason.into(),
        }
    }

    /// Shorthand for `CatalogFailed`
    pub fn catalog_failed(reason: impl Into<String>) -> Self {
        TrimError::CatalogFailed {
            reason: reason.into(),
        }
    }

    /// Shorthand for `BadArgs`
    pub fn bad_args(reason: impl Into<String>) -> Self {
        TrimError::BadArgs {
            reason: reason.into(),
        }
    }
}

/// Result type alias for clip-trim operations
pub type TrimResult<T> = std::result::Result<T, TrimError>;
