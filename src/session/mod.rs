//! Trim session
//!
//! One session per media item: owns the range model, the gesture
//! translator, the playback synchronizer, and the thumbnail strip, and
//! routes gesture side effects between them. This is the single
//! parameterized implementation that replaces per-screen copies of the
//! drag/playback wiring.
//!
//! All methods are called from one logical event queue; handlers run to
//! completion, so a drag mutation is never interleaved with a synchronizer
//! read.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::TrimResult;
use crate::domain::model::{ExportRequest, PlaybackCursor, ThumbnailSet};
use crate::playback::PlaybackSynchronizer;
use crate::ports::{EncodePort, PlaybackPort};
use crate::thumbs::ThumbnailSampler;
use crate::timeline::{GestureEffect, GestureTranslator, Handle, RangeModel};

pub struct TrimSession {
    media_uri: String,
    range: RangeModel,
    translator: GestureTranslator,
    synchronizer: PlaybackSynchronizer,
    thumbnails: ThumbnailSet,
}

impl TrimSession {
    /// Load the media item, size the timeline, and sample the thumbnail
    /// strip (`thumbnail_count` of 0 skips the strip). The selection
    /// starts at the full extent; `min_trim_seconds` sets the smallest
    /// selection the handles can produce.
    pub async fn open(
        media_uri: &str,
        timeline_width_px: f64,
        min_trim_seconds: f64,
        thumbnail_count: usize,
        playback: Arc<dyn PlaybackPort>,
        encode: Arc<dyn EncodePort>,
    ) -> TrimResult<Self> {
        let duration = playback.load(media_uri).await?;
        let range = RangeModel::with_min_trim(timeline_width_px, duration, min_trim_seconds)?;

        let sampler = ThumbnailSampler::new(encode);
        let thumbnails = sampler.sample(media_uri, duration, thumbnail_count).await;
        info!(
            media_uri,
            duration,
            thumbnails = thumbnails.len(),
            "trim session opened"
        );

        Ok(Self {
            media_uri: media_uri.to_string(),
            range,
            translator: GestureTranslator::new(),
            synchronizer: PlaybackSynchronizer::new(playback),
            thumbnails,
        })
    }

    pub fn media_uri(&self) -> &str {
        &self.media_uri
    }

    pub fn range(&self) -> &RangeModel {
        &self.range
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.synchronizer.cursor()
    }

    pub fn is_playing(&self) -> bool {
        self.synchronizer.is_playing()
    }

    /// Press-and-move on a handle. Pauses the preview when a drag starts
    /// during playback.
    pub async fn begin_drag(&mut self, handle: Handle, pointer_x: f64) -> TrimResult<()> {
        let effect =
            self.translator
                .begin_drag(handle, pointer_x, &self.range, self.is_playing());
        if let Some(GestureEffect::PausePlayback) = effect {
            self.synchronizer.pause().await?;
        }
        Ok(())
    }

    /// Drag move; writes through the range model with clamping
    pub fn drag_to(&mut self, handle: Handle, pointer_x: f64) -> TrimResult<()> {
        self.translator.drag_to(handle, pointer_x, &mut self.range)
    }

    /// Drag release; the cursor follows the moved handle
    pub async fn end_drag(&mut self, handle: Handle) -> TrimResult<()> {
        if let Some(GestureEffect::SeekTo(seconds)) =
            self.translator.end_drag(handle, &self.range)?
        {
            self.synchronizer.seek_to(seconds).await?;
        }
        Ok(())
    }

    /// Start preview playback from the selection start
    pub async fn play(&mut self) -> TrimResult<()> {
        self.synchronizer.play(&self.range).await
    }

    /// Pause preview playback in place
    pub async fn pause(&mut self) -> TrimResult<()> {
        self.synchronizer.pause().await
    }

    /// Play/pause toggle, the single transport control the screen exposes
    pub async fn toggle_play(&mut self) -> TrimResult<()> {
        if self.is_playing() {
            self.pause().await
        } else {
            self.play().await
        }
    }

    /// Relative seek clamped to the media bounds
    pub async fn seek_by(&mut self, delta_seconds: f64) -> TrimResult<f64> {
        self.synchronizer.seek_by(delta_seconds, &self.range).await
    }

    /// Backend position update; returns `true` on auto-stop at the
    /// selection end
    pub async fn on_position_update(&mut self, position_seconds: f64) -> TrimResult<bool> {
        self.synchronizer
            .on_position_update(position_seconds, &self.range)
            .await
    }

    /// Snapshot the current selection for the export handoff
    pub fn export_request(&self) -> TrimResult<ExportRequest> {
        ExportRequest::new(
            self.media_uri.clone(),
            self.range.start_seconds()?,
            self.range.end_seconds()?,
        )
    }
}
