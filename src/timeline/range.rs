//! Selection range model
//!
//! Holds the authoritative `[start, end]` selection in timeline pixels and
//! the linear pixel/seconds conversions. Setters clamp rather than reject,
//! so a drag can never leave the model in a stale position; the invariant
//! `0 <= start_px <= end_px - min_gap_px <= W` holds after every call.

use crate::domain::errors::{TrimError, TrimResult};
use crate::domain::model::{round2, TimelineExtent};

/// Mutable selection bounds over a fixed timeline extent.
///
/// Created when media duration becomes known, initialized to the full
/// extent. Mutated exclusively by the gesture translator; read by the
/// playback synchronizer and the export handoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeModel {
    extent: TimelineExtent,
    start_px: f64,
    end_px: f64,
}

impl RangeModel {
    /// Create a model spanning the full timeline `[0, W]`
    pub fn new(width_px: f64, media_duration: f64) -> TrimResult<Self> {
        Ok(Self::from_extent(TimelineExtent::new(width_px, media_duration)?))
    }

    /// Create a model with a custom minimum selection duration
    pub fn with_min_trim(
        width_px: f64,
        media_duration: f64,
        min_trim_seconds: f64,
    ) -> TrimResult<Self> {
        Ok(Self::from_extent(TimelineExtent::with_min_trim(
            width_px,
            media_duration,
            min_trim_seconds,
        )?))
    }

    fn from_extent(extent: TimelineExtent) -> Self {
        Self {
            start_px: 0.0,
            end_px: extent.width_px(),
            extent,
        }
    }

    pub fn extent(&self) -> &TimelineExtent {
        &self.extent
    }

    pub fn start_px(&self) -> f64 {
        self.start_px
    }

    pub fn end_px(&self) -> f64 {
        self.end_px
    }

    /// Move the start handle. The input is clamped to `[0, end - min_gap]`;
    /// a value past the end handle lands exactly `min_gap_px` away.
    pub fn set_start_px(&mut self, px: f64) -> TrimResult<()> {
        let gap = self.extent.min_gap_px()?;
        let upper = (self.end_px - gap).max(0.0);
        self.start_px = px.clamp(0.0, upper);
        Ok(())
    }

    /// Move the end handle. The input is clamped to `[start + min_gap, W]`.
    pub fn set_end_px(&mut self, px: f64) -> TrimResult<()> {
        let gap = self.extent.min_gap_px()?;
        let lower = (self.start_px + gap).min(self.extent.width_px());
        self.end_px = px.clamp(lower, self.extent.width_px());
        Ok(())
    }

    /// Linear pixel-to-seconds conversion, clamped to `[0, duration]`
    pub fn seconds_for(&self, px: f64) -> TrimResult<f64> {
        let duration = self.extent.media_duration();
        if duration <= 0.0 {
            return Err(TrimError::DurationUnknown);
        }
        let clamped = px.clamp(0.0, self.extent.width_px());
        Ok((clamped / self.extent.width_px() * duration).clamp(0.0, duration))
    }

    /// Linear seconds-to-pixel conversion, clamped to `[0, W]`
    pub fn pixel_for(&self, seconds: f64) -> TrimResult<f64> {
        let duration = self.extent.media_duration();
        if duration <= 0.0 {
            return Err(TrimError::DurationUnknown);
        }
        let clamped = seconds.clamp(0.0, duration);
        Ok((clamped / duration * self.extent.width_px()).clamp(0.0, self.extent.width_px()))
    }

    /// Selection start in seconds, rounded to 2 decimals for reporting
    pub fn start_seconds(&self) -> TrimResult<f64> {
        Ok(round2(self.seconds_for(self.start_px)?))
    }

    /// Selection end in seconds, rounded to 2 decimals for reporting
    pub fn end_seconds(&self) -> TrimResult<f64> {
        Ok(round2(self.seconds_for(self.end_px)?))
    }

    /// Selection duration in seconds, rounded to 2 decimals
    pub fn selection_duration(&self) -> TrimResult<f64> {
        Ok(round2(self.end_seconds()? - self.start_seconds()?))
    }
}
