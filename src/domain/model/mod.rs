// Domain models - Core types and data structures

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{TrimError, TrimResult};

/// Minimum selection duration in seconds, enforced for both handles
pub const MIN_TRIM_SECONDS: f64 = 1.0;

/// Number of evenly spaced preview frames per timeline strip
pub const THUMBNAIL_COUNT: usize = 10;

/// Round a seconds value to 2 decimal places for external reporting
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Convert to Duration
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds.max(0.0))
    }

    /// Parse time string: seconds, MM:SS.ms, or HH:MM:SS.ms
    pub fn parse(time_str: &str) -> TrimResult<Self> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 {
                return Err(TrimError::bad_args("Time cannot be negative"));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.len() {
            2 => {
                let minutes = parts[0]
                    .parse::<u32>()
                    .map_err(|_| TrimError::bad_args("Invalid minutes format"))?;
                let seconds_part = parts[1]
                    .parse::<f64>()
                    .map_err(|_| TrimError::bad_args("Invalid seconds format"))?;
                if seconds_part < 0.0 || seconds_part >= 60.0 {
                    return Err(TrimError::bad_args("Seconds must be in [0, 60)"));
                }
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds_part))
            }
            3 => {
                let hours = parts[0]
                    .parse::<u32>()
                    .map_err(|_| TrimError::bad_args("Invalid hours format"))?;
                let minutes = parts[1]
                    .parse::<u32>()
                    .map_err(|_| TrimError::bad_args("Invalid minutes format"))?;
                let seconds_part = parts[2]
                    .parse::<f64>()
                    .map_err(|_| TrimError::bad_args("Invalid seconds format"))?;
                if minutes >= 60 {
                    return Err(TrimError::bad_args("Minutes must be less than 60"));
                }
                if seconds_part < 0.0 || seconds_part >= 60.0 {
                    return Err(TrimError::bad_args("Seconds must be in [0, 60)"));
                }
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
                ))
            }
            _ => Err(TrimError::bad_args(
                "Invalid time format. Supported formats: seconds (e.g., 123.45), \
                 MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
            )),
        }
    }

    /// Format as HH:MM:SS.ms (hours omitted when zero)
    pub fn format_hms(&self) -> String {
        let hours = (self.seconds / 3600.0) as u32;
        let minutes = ((self.seconds % 3600.0) / 60.0) as u32;
        let seconds = (self.seconds % 60.0) as u32;
        let milliseconds = ((self.seconds % 1.0) * 1000.0).round() as u32;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Immutable timeline geometry: interactive strip width, media duration,
/// and the minimum selection duration the handles enforce. Set once when
/// media metadata loads; read-only afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineExtent {
    width_px: f64,
    media_duration: f64,
    min_trim_seconds: f64,
}

impl TimelineExtent {
    /// Create a new extent with the default minimum trim duration
    pub fn new(width_px: f64, media_duration: f64) -> TrimResult<Self> {
        Self::with_min_trim(width_px, media_duration, MIN_TRIM_SECONDS)
    }

    /// Create a new extent with a custom minimum trim duration
    pub fn with_min_trim(
        width_px: f64,
        media_duration: f64,
        min_trim_seconds: f64,
    ) -> TrimResult<Self> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(TrimError::bad_args("Timeline width must be positive"));
        }
        if !media_duration.is_finite() || media_duration < 0.0 {
            return Err(TrimError::bad_args("Media duration cannot be negative"));
        }
        if !min_trim_seconds.is_finite() || min_trim_seconds <= 0.0 {
            return Err(TrimError::bad_args(
                "Minimum trim duration must be positive",
            ));
        }
        Ok(Self {
            width_px,
            media_duration,
            min_trim_seconds,
        })
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn media_duration(&self) -> f64 {
        self.media_duration
    }

    pub fn min_trim_seconds(&self) -> f64 {
        self.min_trim_seconds
    }

    /// Minimum handle gap in pixels, derived from the minimum trim duration
    pub fn min_gap_px(&self) -> TrimResult<f64> {
        if self.media_duration <= 0.0 {
            return Err(TrimError::DurationUnknown);
        }
        Ok(self.min_trim_seconds * self.width_px / self.media_duration)
    }
}

/// Media cursor state. Never authoritative for selection bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackCursor {
    pub position_seconds: f64,
    pub is_playing: bool,
}

/// A single sampled preview frame
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailEntry {
    pub index: usize,
    pub image_uri: String,
}

/// Ordered, possibly-sparse preview frames for the timeline strip.
/// Entries stay in index order; missing indices mean the extraction
/// attempt failed and was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThumbnailSet {
    entries: Vec<ThumbnailEntry>,
}

impl ThumbnailSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful extraction. Indices must arrive in ascending order.
    pub fn push(&mut self, index: usize, image_uri: String) {
        debug_assert!(self.entries.last().map_or(true, |e| e.index < index));
        self.entries.push(ThumbnailEntry { index, image_uri });
    }

    pub fn entries(&self) -> &[ThumbnailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First present entry, used as the representative preview image
    pub fn first_uri(&self) -> Option<&str> {
        self.entries.first().map(|e| e.image_uri.as_str())
    }
}

/// Immutable snapshot of a committed selection, handed to the encoder
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub source_uri: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub duration_seconds: f64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ExportRequest {
    /// Build an export request; the selection duration must be positive
    pub fn new(source_uri: String, start_seconds: f64, end_seconds: f64) -> TrimResult<Self> {
        let start = round2(start_seconds);
        let end = round2(end_seconds);
        let duration = round2(end - start);
        if duration <= 0.0 {
            return Err(TrimError::invalid_range(format!(
                "selection duration must be positive, got {:.2}s",
                duration
            )));
        }
        if source_uri.is_empty() {
            return Err(TrimError::bad_args("Source media uri cannot be empty"));
        }
        Ok(Self {
            source_uri,
            start_seconds: start,
            end_seconds: end,
            duration_seconds: duration,
            name: None,
            description: None,
        })
    }

    /// Attach the user-supplied name and description
    pub fn with_details(mut self, name: Option<String>, description: Option<String>) -> Self {
        self.name = name.filter(|s| !s.trim().is_empty());
        self.description = description.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Catalog record for a saved clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub media_uri: String,
    pub source_media_uri: String,
    pub thumbnail_uri: Option<String>,
    pub duration_seconds: f64,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub created_at: DateTime<Utc>,
}

// Disambiguates ids minted within the same millisecond
static CLIP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl ClipRecord {
    /// Assemble a record from a completed export
    pub fn from_export(
        request: &ExportRequest,
        media_uri: String,
        thumbnail_uri: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!(
                "clip_{}_{}",
                created_at.timestamp_millis(),
                CLIP_SEQUENCE.fetch_add(1, Ordering::Relaxed)
            ),
            name: request
                .name
                .clone()
                .unwrap_or_else(|| "Untitled clip".to_string()),
            description: request.description.clone().unwrap_or_default(),
            media_uri,
            source_media_uri: request.source_uri.clone(),
            thumbnail_uri,
            duration_seconds: request.duration_seconds,
            start_seconds: request.start_seconds,
            end_seconds: request.end_seconds,
            created_at,
        }
    }
}
