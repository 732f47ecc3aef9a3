//! Playback synchronizer
//!
//! Drives the media backend so the preview cursor stays inside the active
//! selection: `play()` always starts from the selection start, and every
//! position update is checked against the selection end. Crossing the end
//! pauses the backend and seeks back to the start (auto-stop), without any
//! user action.

use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::TrimResult;
use crate::domain::model::PlaybackCursor;
use crate::ports::PlaybackPort;
use crate::timeline::RangeModel;

/// Synchronizer states. `play()` is only valid from `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Selection-bounded preview playback over an abstract media backend
pub struct PlaybackSynchronizer {
    port: Arc<dyn PlaybackPort>,
    state: PlaybackState,
    cursor: PlaybackCursor,
}

impl PlaybackSynchronizer {
    pub fn new(port: Arc<dyn PlaybackPort>) -> Self {
        Self {
            port,
            state: PlaybackState::Stopped,
            cursor: PlaybackCursor::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// Seek to the selection start and begin playback. A call while already
    /// `Playing` is ignored. Backend failures surface as
    /// `PlaybackUnavailable` and leave the state `Stopped`.
    pub async fn play(&mut self, range: &RangeModel) -> TrimResult<()> {
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        let start = range.start_seconds()?;
        self.port.seek(start).await?;
        self.port.play().await?;
        self.cursor = PlaybackCursor {
            position_seconds: start,
            is_playing: true,
        };
        self.state = PlaybackState::Playing;
        debug!(start, "preview playback started");
        Ok(())
    }

    /// Pause playback without seeking. A call while `Stopped` is ignored.
    pub async fn pause(&mut self) -> TrimResult<()> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        self.port.pause().await?;
        self.cursor.is_playing = false;
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    /// Seek the cursor to an absolute position (drag release follows the
    /// moved handle here)
    pub async fn seek_to(&mut self, seconds: f64) -> TrimResult<()> {
        self.port.seek(seconds).await?;
        self.cursor.position_seconds = seconds;
        Ok(())
    }

    /// Relative seek, clamped to `[0, media duration]`. Returns the new
    /// position.
    pub async fn seek_by(&mut self, delta_seconds: f64, range: &RangeModel) -> TrimResult<f64> {
        let current = self.port.position().await?;
        let target = (current + delta_seconds).clamp(0.0, range.extent().media_duration());
        self.port.seek(target).await?;
        self.cursor.position_seconds = target;
        Ok(target)
    }

    /// Feed one backend position update. While `Playing`, a position at or
    /// past the selection end pauses the backend, seeks back to the
    /// selection start, and transitions to `Stopped`. Returns `true` when
    /// that auto-stop fired.
    pub async fn on_position_update(
        &mut self,
        position_seconds: f64,
        range: &RangeModel,
    ) -> TrimResult<bool> {
        self.cursor.position_seconds = position_seconds;
        if self.state != PlaybackState::Playing {
            return Ok(false);
        }
        let end = range.end_seconds()?;
        if position_seconds < end {
            return Ok(false);
        }

        let start = range.start_seconds()?;
        self.port.pause().await?;
        self.port.seek(start).await?;
        self.cursor = PlaybackCursor {
            position_seconds: start,
            is_playing: false,
        };
        self.state = PlaybackState::Stopped;
        debug!(position_seconds, end, "auto-stop at selection end");
        Ok(true)
    }
}
