//! Gesture-to-range translation
//!
//! Converts continuous pointer-drag coordinates into range-model updates.
//! Each handle runs its own `Idle -> Dragging -> Idle` state machine, so a
//! start-handle drag can never disturb the end handle's state. Playback
//! side effects are returned as values and applied by the owning session,
//! keeping this module free of the media backend.

use tracing::trace;

use crate::domain::errors::TrimResult;
use crate::timeline::range::RangeModel;

/// Width of a handle's touch target in timeline pixels
pub const HANDLE_HIT_WIDTH_PX: f64 = 32.0;

/// Which selection bound a gesture is addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Start,
    End,
}

/// Side effect requested by a gesture transition, applied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// A drag began while the preview was playing
    PausePlayback,
    /// A drag ended; the cursor follows the moved handle
    SeekTo(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { grab_offset_px: f64 },
}

/// Per-handle drag state machines over a shared range model
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTranslator {
    start: DragState,
    end: DragState,
}

impl Default for GestureTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTranslator {
    pub fn new() -> Self {
        Self {
            start: DragState::Idle,
            end: DragState::Idle,
        }
    }

    fn state(&self, handle: Handle) -> &DragState {
        match handle {
            Handle::Start => &self.start,
            Handle::End => &self.end,
        }
    }

    fn state_mut(&mut self, handle: Handle) -> &mut DragState {
        match handle {
            Handle::Start => &mut self.start,
            Handle::End => &mut self.end,
        }
    }

    fn handle_px(handle: Handle, range: &RangeModel) -> f64 {
        match handle {
            Handle::Start => range.start_px(),
            Handle::End => range.end_px(),
        }
    }

    pub fn is_dragging(&self, handle: Handle) -> bool {
        matches!(self.state(handle), DragState::Dragging { .. })
    }

    /// Press-and-move inside a handle's hit region. Records the grab offset
    /// so subsequent moves track the finger, not the handle edge. Returns
    /// `PausePlayback` when playback was active, `None` when the press
    /// missed the handle.
    pub fn begin_drag(
        &mut self,
        handle: Handle,
        pointer_x: f64,
        range: &RangeModel,
        is_playing: bool,
    ) -> Option<GestureEffect> {
        let handle_px = Self::handle_px(handle, range);
        if pointer_x < handle_px || pointer_x > handle_px + HANDLE_HIT_WIDTH_PX {
            return None;
        }

        *self.state_mut(handle) = DragState::Dragging {
            grab_offset_px: pointer_x - handle_px,
        };
        trace!(?handle, pointer_x, handle_px, "drag started");

        if is_playing {
            Some(GestureEffect::PausePlayback)
        } else {
            None
        }
    }

    /// Move event while dragging. The would-be position (pointer minus grab
    /// offset) is written through the range model, which clamps it against
    /// the counterpart handle. A move on an idle handle is ignored.
    pub fn drag_to(
        &mut self,
        handle: Handle,
        pointer_x: f64,
        range: &mut RangeModel,
    ) -> TrimResult<()> {
        let grab_offset_px = match *self.state(handle) {
            DragState::Dragging { grab_offset_px } => grab_offset_px,
            DragState::Idle => return Ok(()),
        };

        let target_px = pointer_x - grab_offset_px;
        match handle {
            Handle::Start => range.set_start_px(target_px)?,
            Handle::End => range.set_end_px(target_px)?,
        }
        Ok(())
    }

    /// Release. Transitions back to `Idle` and asks the caller to seek the
    /// media cursor to the moved handle's time.
    pub fn end_drag(
        &mut self,
        handle: Handle,
        range: &RangeModel,
    ) -> TrimResult<Option<GestureEffect>> {
        if !self.is_dragging(handle) {
            return Ok(None);
        }
        *self.state_mut(handle) = DragState::Idle;

        let seconds = match handle {
            Handle::Start => range.start_seconds()?,
            Handle::End => range.end_seconds()?,
        };
        trace!(?handle, seconds, "drag released");
        Ok(Some(GestureEffect::SeekTo(seconds)))
    }
}
