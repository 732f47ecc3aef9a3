//! End-to-end tests for the trim session and export handoff

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use clipcut::adapters::{TomlConfigAdapter, TracingLogAdapter};
use clipcut::app::TrimInteractor;
use clipcut::domain::errors::{TrimError, TrimResult};
use clipcut::domain::model::ClipRecord;
use clipcut::ports::{CatalogPort, EncodePort, PlaybackPort};
use clipcut::session::TrimSession;
use clipcut::timeline::{Handle, HANDLE_HIT_WIDTH_PX};
use clipcut::{MIN_TRIM_SECONDS, THUMBNAIL_COUNT};

// Test doubles

/// Scripted media backend with a fixed duration
struct ScriptedPlayer {
    duration: f64,
    seeks: Mutex<Vec<f64>>,
    playing: Mutex<bool>,
}

impl ScriptedPlayer {
    fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            seeks: Mutex::new(Vec::new()),
            playing: Mutex::new(false),
        }
    }

    fn last_seek(&self) -> Option<f64> {
        self.seeks.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl PlaybackPort for ScriptedPlayer {
    async fn load(&self, _media_uri: &str) -> TrimResult<f64> {
        Ok(self.duration)
    }

    async fn play(&self) -> TrimResult<()> {
        *self.playing.lock().unwrap() = true;
        Ok(())
    }

    async fn pause(&self) -> TrimResult<()> {
        *self.playing.lock().unwrap() = false;
        Ok(())
    }

    async fn seek(&self, seconds: f64) -> TrimResult<()> {
        self.seeks.lock().unwrap().push(seconds);
        Ok(())
    }

    async fn position(&self) -> TrimResult<f64> {
        Ok(self.last_seek().unwrap_or(0.0))
    }
}

/// Encoder double recording trim invocations
#[derive(Default)]
struct RecordingEncoder {
    trims: Mutex<Vec<(String, f64, f64)>>,
    fail_trim: bool,
    fail_frames: bool,
}

impl RecordingEncoder {
    fn failing_trim() -> Self {
        Self {
            fail_trim: true,
            ..Default::default()
        }
    }

    fn trim_calls(&self) -> Vec<(String, f64, f64)> {
        self.trims.lock().unwrap().clone()
    }
}

#[async_trait]
impl EncodePort for RecordingEncoder {
    async fn trim(
        &self,
        source_uri: &str,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> TrimResult<String> {
        if self.fail_trim {
            return Err(TrimError::encode_failed("muxer exploded"));
        }
        self.trims
            .lock()
            .unwrap()
            .push((source_uri.to_string(), start_seconds, duration_seconds));
        Ok("clips/trimmed_out.mp4".to_string())
    }

    async fn extract_frame(&self, _media_uri: &str, at_seconds: f64) -> TrimResult<String> {
        if self.fail_frames {
            return Err(TrimError::ThumbnailSampleFailed {
                at_seconds,
                reason: "no decoder".to_string(),
            });
        }
        Ok(format!("thumbnails/thumb_{}.jpg", at_seconds))
    }
}

/// In-memory catalog recording adds
#[derive(Default)]
struct MemoryCatalog {
    records: Mutex<Vec<ClipRecord>>,
}

impl MemoryCatalog {
    fn records(&self) -> Vec<ClipRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogPort for MemoryCatalog {
    async fn add(&self, record: ClipRecord) -> TrimResult<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn list(&self) -> TrimResult<Vec<ClipRecord>> {
        Ok(self.records())
    }

    async fn remove(&self, id: &str) -> TrimResult<()> {
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn clear(&self) -> TrimResult<()> {
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

fn interactor(encode: &Arc<RecordingEncoder>, catalog: &Arc<MemoryCatalog>) -> TrimInteractor {
    TrimInteractor::new(
        Arc::clone(encode) as Arc<dyn EncodePort>,
        Arc::clone(catalog) as Arc<dyn CatalogPort>,
        Arc::new(TomlConfigAdapter::new()),
        Arc::new(TracingLogAdapter::new()),
    )
}

/// Session over a 300 px timeline with the default minimum trim and no
/// thumbnail strip
async fn open_plain(
    playback: Arc<dyn PlaybackPort>,
    encode: Arc<dyn EncodePort>,
) -> TrimSession {
    TrimSession::open("video.mp4", 300.0, MIN_TRIM_SECONDS, 0, playback, encode)
        .await
        .unwrap()
}

/// Drag a handle so its edge lands on the pixel for `to_seconds`
async fn drag_to_seconds(session: &mut TrimSession, handle: Handle, to_seconds: f64) {
    let from_px = match handle {
        Handle::Start => session.range().start_px(),
        Handle::End => session.range().end_px(),
    };
    let to_px = session.range().pixel_for(to_seconds).unwrap();
    let grab = HANDLE_HIT_WIDTH_PX / 2.0;
    session.begin_drag(handle, from_px + grab).await.unwrap();
    session.drag_to(handle, to_px + grab).unwrap();
    session.end_drag(handle).await.unwrap();
}

// Session behavior

#[tokio::test]
async fn open_initializes_full_selection_and_thumbnails() {
    let player = Arc::new(ScriptedPlayer::with_duration(20.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let session = TrimSession::open(
        "video.mp4",
        300.0,
        MIN_TRIM_SECONDS,
        THUMBNAIL_COUNT,
        player,
        encoder,
    )
    .await
    .unwrap();

    assert_eq!(session.range().start_seconds().unwrap(), 0.0);
    assert_eq!(session.range().end_seconds().unwrap(), 20.0);
    assert_eq!(session.thumbnails().len(), 10);
}

#[tokio::test]
async fn custom_min_trim_bounds_the_selection() {
    let player = Arc::new(ScriptedPlayer::with_duration(20.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let mut session = TrimSession::open("video.mp4", 300.0, 2.0, 0, player, encoder)
        .await
        .unwrap();

    // 2 s minimum over 20 s / 300 px: the gap is 30 px. Dragging the
    // start handle toward the end clamps 2 s short of it.
    drag_to_seconds(&mut session, Handle::Start, 19.5).await;
    assert_eq!(session.range().start_seconds().unwrap(), 18.0);
    assert_eq!(session.range().selection_duration().unwrap(), 2.0);
}

#[tokio::test]
async fn drag_release_seeks_the_cursor() {
    let player = Arc::new(ScriptedPlayer::with_duration(20.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let mut session = open_plain(player.clone(), encoder).await;

    drag_to_seconds(&mut session, Handle::Start, 4.0).await;
    assert_eq!(player.last_seek(), Some(4.0));
    assert_eq!(session.cursor().position_seconds, 4.0);
}

#[tokio::test]
async fn drag_while_playing_pauses_preview() {
    let player = Arc::new(ScriptedPlayer::with_duration(20.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let mut session = open_plain(player.clone(), encoder).await;

    session.play().await.unwrap();
    assert!(session.is_playing());

    session
        .begin_drag(Handle::Start, session.range().start_px() + 1.0)
        .await
        .unwrap();
    assert!(!session.is_playing());
    assert!(!*player.playing.lock().unwrap());
}

#[tokio::test]
async fn playback_auto_stops_at_selection_end() {
    let player = Arc::new(ScriptedPlayer::with_duration(10.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let mut session = open_plain(player.clone(), encoder).await;

    // Selection [2 s, 5 s] on a 10 s / 300 px timeline
    drag_to_seconds(&mut session, Handle::Start, 2.0).await;
    drag_to_seconds(&mut session, Handle::End, 5.0).await;

    session.play().await.unwrap();
    assert!(!session.on_position_update(4.9).await.unwrap());
    assert!(session.on_position_update(5.01).await.unwrap());

    assert!(!session.is_playing());
    assert_eq!(session.cursor().position_seconds, 2.0);
    assert_eq!(player.last_seek(), Some(2.0));
}

// Export handoff

#[tokio::test]
async fn end_to_end_drag_and_commit() {
    let player = Arc::new(ScriptedPlayer::with_duration(20.0));
    let encoder = Arc::new(RecordingEncoder::default());
    let catalog = Arc::new(MemoryCatalog::default());
    let mut session =
        open_plain(player, Arc::clone(&encoder) as Arc<dyn EncodePort>).await;

    drag_to_seconds(&mut session, Handle::Start, 4.0).await;
    drag_to_seconds(&mut session, Handle::End, 12.0).await;

    let request = session
        .export_request()
        .unwrap()
        .with_details(Some("Holiday".to_string()), None);
    let record = interactor(&encoder, &catalog)
        .commit(request, session.range().extent().media_duration())
        .await
        .unwrap();

    assert_eq!(
        encoder.trim_calls(),
        vec![("video.mp4".to_string(), 4.0, 8.0)]
    );
    let records = catalog.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duration_seconds, 8.0);
    assert_eq!(records[0].name, "Holiday");
    assert_eq!(record.media_uri, "clips/trimmed_out.mp4");
    assert!(record.thumbnail_uri.is_some());
}

#[tokio::test]
async fn degenerate_selection_never_reaches_the_encoder() {
    let encoder = Arc::new(RecordingEncoder::default());
    let catalog = Arc::new(MemoryCatalog::default());

    // Bypass ExportRequest::new validation with a hand-built zero range
    let request = clipcut::ExportRequest::new("video.mp4".to_string(), 0.0, 1.0);
    assert!(request.is_ok());
    let err = clipcut::ExportRequest::new("video.mp4".to_string(), 0.0, 0.0).unwrap_err();
    assert!(matches!(err, TrimError::InvalidRange { .. }));

    // A request longer than the media is rejected by the interactor
    let request = clipcut::ExportRequest::new("video.mp4".to_string(), 0.0, 30.0).unwrap();
    let err = interactor(&encoder, &catalog)
        .commit(request, 20.0)
        .await
        .unwrap_err();
    assert!(matches!(err, TrimError::InvalidRange { .. }));
    assert!(encoder.trim_calls().is_empty());
    assert!(catalog.records().is_empty());
}

#[tokio::test]
async fn unknown_media_duration_blocks_commit() {
    let encoder = Arc::new(RecordingEncoder::default());
    let catalog = Arc::new(MemoryCatalog::default());

    let request = clipcut::ExportRequest::new("video.mp4".to_string(), 0.0, 5.0).unwrap();
    let err = interactor(&encoder, &catalog)
        .commit(request, 0.0)
        .await
        .unwrap_err();

    assert!(matches!(err, TrimError::DurationUnknown));
    assert!(encoder.trim_calls().is_empty());
    assert!(catalog.records().is_empty());
}

#[tokio::test]
async fn encode_failure_leaves_no_catalog_entry() {
    let encoder = Arc::new(RecordingEncoder::failing_trim());
    let catalog = Arc::new(MemoryCatalog::default());

    let request = clipcut::ExportRequest::new("video.mp4".to_string(), 2.0, 6.0).unwrap();
    let err = interactor(&encoder, &catalog)
        .commit(request, 20.0)
        .await
        .unwrap_err();

    assert!(matches!(err, TrimError::EncodeFailed { .. }));
    assert!(catalog.records().is_empty());
}

#[tokio::test]
async fn missing_preview_thumbnail_is_tolerated() {
    let encoder = Arc::new(RecordingEncoder {
        fail_frames: true,
        ..Default::default()
    });
    let catalog = Arc::new(MemoryCatalog::default());

    let request = clipcut::ExportRequest::new("video.mp4".to_string(), 2.0, 6.0).unwrap();
    let record = interactor(&encoder, &catalog)
        .commit(request, 20.0)
        .await
        .unwrap();

    assert!(record.thumbnail_uri.is_none());
    assert_eq!(catalog.records().len(), 1);
}
