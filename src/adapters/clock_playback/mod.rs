// Clock playback adapter - wall-clock playback simulation
//
// Stands in for a device media player: positions advance in real time
// while "playing". Used by the `preview` command to exercise the
// session/synchronizer wiring without a display or audio stack.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;

use crate::adapters::ffmpeg_encode::ffprobe_duration;
use crate::domain::errors::{TrimError, TrimResult};
use crate::ports::PlaybackPort;

#[derive(Debug, Clone, Copy)]
struct ClockState {
    duration: f64,
    base_position: f64,
    playing_since: Option<Instant>,
}

pub struct ClockPlaybackAdapter {
    // Probed duration for `new()`, fixed for `with_duration()`
    fixed_duration: Option<f64>,
    state: Mutex<Option<ClockState>>,
}

impl ClockPlaybackAdapter {
    /// Probe the media with ffprobe on `load`
    pub fn new() -> Self {
        Self {
            fixed_duration: None,
            state: Mutex::new(None),
        }
    }

    /// Skip probing and report a fixed duration (tests, dry runs)
    pub fn with_duration(duration: f64) -> Self {
        Self {
            fixed_duration: Some(duration),
            state: Mutex::new(None),
        }
    }

    fn loaded(&self) -> TrimResult<ClockState> {
        self.state
            .lock()
            .unwrap()
            .ok_or_else(|| TrimError::playback_unavailable("no media loaded"))
    }

    fn current_position(state: &ClockState) -> f64 {
        let elapsed = state
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        (state.base_position + elapsed).clamp(0.0, state.duration)
    }
}

impl Default for ClockPlaybackAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaybackPort for ClockPlaybackAdapter {
    async fn load(&self, media_uri: &str) -> TrimResult<f64> {
        let duration = match self.fixed_duration {
            Some(d) => d,
            None => ffprobe_duration(media_uri).await?,
        };
        *self.state.lock().unwrap() = Some(ClockState {
            duration,
            base_position: 0.0,
            playing_since: None,
        });
        Ok(duration)
    }

    async fn play(&self) -> TrimResult<()> {
        let mut guard = self.state.lock().unwrap();
        let state = guard
            .as_mut()
            .ok_or_else(|| TrimError::playback_unavailable("no media loaded"))?;
        if state.playing_since.is_none() {
            state.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    async fn pause(&self) -> TrimResult<()> {
        let mut guard = self.state.lock().unwrap();
        let state = guard
            .as_mut()
            .ok_or_else(|| TrimError::playback_unavailable("no media loaded"))?;
        state.base_position = Self::current_position(state);
        state.playing_since = None;
        Ok(())
    }

    async fn seek(&self, seconds: f64) -> TrimResult<()> {
        let mut guard = self.state.lock().unwrap();
        let state = guard
            .as_mut()
            .ok_or_else(|| TrimError::playback_unavailable("no media loaded"))?;
        state.base_position = seconds.clamp(0.0, state.duration);
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    async fn position(&self) -> TrimResult<f64> {
        let state = self.loaded()?;
        Ok(Self::current_position(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn operations_require_a_loaded_media() {
        let player = ClockPlaybackAdapter::with_duration(10.0);
        assert!(matches!(
            player.play().await,
            Err(TrimError::PlaybackUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn position_advances_while_playing() {
        let player = ClockPlaybackAdapter::with_duration(10.0);
        assert_eq!(player.load("fake.mp4").await.unwrap(), 10.0);

        player.seek(2.0).await.unwrap();
        assert_eq!(player.position().await.unwrap(), 2.0);

        player.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        let pos = player.position().await.unwrap();
        assert!(pos > 2.0 && pos < 3.0, "pos={}", pos);

        player.pause().await.unwrap();
        let frozen = player.position().await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(player.position().await.unwrap(), frozen);
    }

    #[tokio::test]
    async fn seek_clamps_to_duration() {
        let player = ClockPlaybackAdapter::with_duration(10.0);
        player.load("fake.mp4").await.unwrap();
        player.seek(99.0).await.unwrap();
        assert_eq!(player.position().await.unwrap(), 10.0);
        player.seek(-5.0).await.unwrap();
        assert_eq!(player.position().await.unwrap(), 0.0);
    }
}
