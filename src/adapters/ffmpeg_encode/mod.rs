// FFmpeg encode adapter - trim and frame extraction via the ffmpeg binary
//
// The trim is a stream copy (`-c copy`), so no re-encoding happens; frame
// extraction grabs a single frame at the requested timestamp. Both shell
// out to ffmpeg with tokio, and ffprobe supplies media durations.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::{TrimError, TrimResult};
use crate::ports::EncodePort;

/// Last stderr lines kept in an error reason
const STDERR_TAIL_LINES: usize = 5;

// Disambiguates output names minted within the same millisecond
static OUTPUT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn next_output_id() -> String {
    format!(
        "{}_{}",
        Utc::now().timestamp_millis(),
        OUTPUT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    )
}

pub struct FfmpegEncodeAdapter {
    media_dir: PathBuf,
    thumbnail_dir: PathBuf,
    overwrite: bool,
}

impl FfmpegEncodeAdapter {
    pub fn new(media_dir: impl Into<PathBuf>, thumbnail_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
            thumbnail_dir: thumbnail_dir.into(),
            overwrite: true,
        }
    }

    /// When disabled, ffmpeg refuses to replace an existing output file
    /// and the operation fails instead
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn overwrite_flag(&self) -> &'static str {
        if self.overwrite {
            "-y"
        } else {
            "-n"
        }
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("; ")
    }

    async fn run_ffmpeg(args: &[String]) -> TrimResult<()> {
        debug!(?args, "running ffmpeg");
        let output = Command::new("ffmpeg")
            .args(args)
            .output()
            .await
            .map_err(|e| TrimError::encode_failed(format!("cannot run ffmpeg: {}", e)))?;
        if !output.status.success() {
            return Err(TrimError::encode_failed(Self::stderr_tail(&output.stderr)));
        }
        Ok(())
    }

    fn trimmed_output_path(&self) -> PathBuf {
        self.media_dir
            .join(format!("trimmed_{}.mp4", next_output_id()))
    }

    fn thumbnail_output_path(&self, at_seconds: f64) -> PathBuf {
        self.thumbnail_dir.join(format!(
            "thumb_{}_{}.jpg",
            next_output_id(),
            (at_seconds * 100.0).round() as i64
        ))
    }
}

/// Media duration in seconds via ffprobe
pub async fn ffprobe_duration(media_uri: &str) -> TrimResult<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            media_uri,
        ])
        .output()
        .await
        .map_err(|e| TrimError::playback_unavailable(format!("cannot run ffprobe: {}", e)))?;
    if !output.status.success() {
        return Err(TrimError::playback_unavailable(format!(
            "ffprobe failed for {}",
            media_uri
        )));
    }
    let text = String::from_utf8_lossy(&output.stdout);
    text.trim()
        .parse::<f64>()
        .map_err(|e| TrimError::playback_unavailable(format!("unparseable duration: {}", e)))
}

#[async_trait]
impl EncodePort for FfmpegEncodeAdapter {
    async fn trim(
        &self,
        source_uri: &str,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> TrimResult<String> {
        std::fs::create_dir_all(&self.media_dir)?;
        let output_path = self.trimmed_output_path();

        let args = vec![
            self.overwrite_flag().to_string(),
            "-ss".to_string(),
            format!("{:.2}", start_seconds),
            "-i".to_string(),
            source_uri.to_string(),
            "-t".to_string(),
            format!("{:.2}", duration_seconds),
            "-c".to_string(),
            "copy".to_string(),
            output_path.to_string_lossy().to_string(),
        ];
        Self::run_ffmpeg(&args).await?;

        if !output_path.exists() {
            return Err(TrimError::encode_failed(
                "ffmpeg reported success but produced no output file",
            ));
        }
        Ok(output_path.to_string_lossy().to_string())
    }

    async fn extract_frame(&self, media_uri: &str, at_seconds: f64) -> TrimResult<String> {
        std::fs::create_dir_all(&self.thumbnail_dir)?;
        let output_path = self.thumbnail_output_path(at_seconds);

        let args = vec![
            self.overwrite_flag().to_string(),
            "-ss".to_string(),
            format!("{:.2}", at_seconds),
            "-i".to_string(),
            media_uri.to_string(),
            "-vframes".to_string(),
            "1".to_string(),
            "-q:v".to_string(),
            "2".to_string(),
            output_path.to_string_lossy().to_string(),
        ];
        Self::run_ffmpeg(&args)
            .await
            .map_err(|e| TrimError::ThumbnailSampleFailed {
                at_seconds,
                reason: e.to_string(),
            })?;

        if !output_path.exists() {
            return Err(TrimError::ThumbnailSampleFailed {
                at_seconds,
                reason: "no frame written".to_string(),
            });
        }
        Ok(output_path.to_string_lossy().to_string())
    }
}
