//! Command execution

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::adapters::{ffmpeg_encode::ffprobe_duration, ClockPlaybackAdapter};
use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{ClearArgs, ListArgs, PreviewArgs, RemoveArgs, TrimArgs};
use crate::domain::model::{ExportRequest, TimeSpec, MIN_TRIM_SECONDS, THUMBNAIL_COUNT};
use crate::ports::{ConfigPort, PlaybackPort};
use crate::session::TrimSession;
use crate::timeline::{Handle, HANDLE_HIT_WIDTH_PX};

/// Timeline width used by the headless preview simulation, in pixels
const PREVIEW_TIMELINE_WIDTH_PX: f64 = 300.0;

/// Poll interval for simulated position updates
const PREVIEW_TICK: Duration = Duration::from_millis(100);

/// Configured value parsed from the config port, falling back to the
/// built-in default for missing or unparseable entries
async fn configured<T: std::str::FromStr>(
    config: &Arc<dyn ConfigPort>,
    key: &str,
    default: T,
) -> T {
    config
        .get(key)
        .await
        .ok()
        .flatten()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_range(start: &str, end: &str) -> Result<(f64, f64)> {
    let start = TimeSpec::parse(start).map_err(|e| anyhow!("Invalid start time: {}", e))?;
    let end = TimeSpec::parse(end).map_err(|e| anyhow!("Invalid end time: {}", e))?;
    Ok((start.seconds, end.seconds))
}

/// Execute the trim command: validate, encode, catalogue
pub async fn execute_trim(args: TrimArgs) -> Result<()> {
    let (start, end) = parse_range(&args.start, &args.end)?;
    let media_duration = ffprobe_duration(&args.input).await?;

    let request = ExportRequest::new(args.input, start, end)?
        .with_details(args.name, args.description);

    let container = DefaultAppContainer::new().await?;
    let record = container
        .trim_interactor()
        .commit(request, media_duration)
        .await?;

    println!("Saved clip {} ({:.2}s) -> {}", record.id, record.duration_seconds, record.media_uri);
    if let Some(thumb) = &record.thumbnail_uri {
        println!("Preview thumbnail: {}", thumb);
    }
    Ok(())
}

/// Execute the preview command: drive a trim session against the
/// wall-clock playback simulator and report the auto-stop.
pub async fn execute_preview(args: PreviewArgs) -> Result<()> {
    let (start, end) = parse_range(&args.start, &args.end)?;
    let container = DefaultAppContainer::new().await?;

    let playback = Arc::new(ClockPlaybackAdapter::new());
    let config = container.config_port();
    let min_trim_seconds = configured(&config, "min_trim_seconds", MIN_TRIM_SECONDS).await;
    let thumbnail_count = if args.no_thumbnails {
        0
    } else {
        configured(&config, "thumbnail_count", THUMBNAIL_COUNT).await
    };
    let mut session = TrimSession::open(
        &args.input,
        PREVIEW_TIMELINE_WIDTH_PX,
        min_trim_seconds,
        thumbnail_count,
        playback.clone(),
        container.encode_port(),
    )
    .await?;

    info!(
        duration = session.range().extent().media_duration(),
        thumbnails = session.thumbnails().len(),
        "session opened"
    );

    // Walk both handles to the requested times the way a finger would:
    // grab, move, release.
    drag_handle(&mut session, Handle::Start, start).await?;
    drag_handle(&mut session, Handle::End, end).await?;

    let selection_start = session.range().start_seconds()?;
    let selection_end = session.range().end_seconds()?;
    println!("Previewing [{:.2}s .. {:.2}s]", selection_start, selection_end);

    session.play().await?;
    loop {
        tokio::time::sleep(PREVIEW_TICK).await;
        let position = playback.position().await?;
        if session.on_position_update(position).await? {
            break;
        }
        print!("\r  position {:>6.2}s", position);
        use std::io::Write;
        std::io::stdout().flush().ok();
    }
    println!("\rAuto-stopped at selection end; cursor back at {:.2}s", session.cursor().position_seconds);
    Ok(())
}

async fn drag_handle(session: &mut TrimSession, handle: Handle, to_seconds: f64) -> Result<()> {
    let from_px = match handle {
        Handle::Start => session.range().start_px(),
        Handle::End => session.range().end_px(),
    };
    let to_px = session.range().pixel_for(to_seconds)?;

    // Grab the middle of the handle and carry the offset through the move
    let grab_x = from_px + HANDLE_HIT_WIDTH_PX / 2.0;
    session.begin_drag(handle, grab_x).await?;
    session.drag_to(handle, to_px + HANDLE_HIT_WIDTH_PX / 2.0)?;
    session.end_drag(handle).await?;
    Ok(())
}

/// Execute the list command
pub async fn execute_list(args: ListArgs) -> Result<()> {
    let container = DefaultAppContainer::new().await?;
    let records = container.library_interactor().list().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }
    for record in records {
        println!(
            "{}  {}  {:.2}s  [{:.2}s..{:.2}s]  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.duration_seconds,
            record.start_seconds,
            record.end_seconds,
            record.name,
        );
    }
    Ok(())
}

/// Execute the remove command
pub async fn execute_remove(args: RemoveArgs) -> Result<()> {
    let container = DefaultAppContainer::new().await?;
    container.library_interactor().remove(&args.id).await?;
    println!("Removed {}", args.id);
    Ok(())
}

/// Execute the clear command
pub async fn execute_clear(args: ClearArgs) -> Result<()> {
    if !args.yes {
        return Err(anyhow!(
            "clear removes every clip and its media files; pass --yes to confirm"
        ));
    }
    let container = DefaultAppContainer::new().await?;
    container.library_interactor().clear().await?;
    println!("Catalog cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TomlConfigAdapter;

    #[tokio::test]
    async fn configured_values_override_built_in_defaults() {
        let config: Arc<dyn ConfigPort> = Arc::new(TomlConfigAdapter::new());
        config.set("min_trim_seconds", "2.5").await.unwrap();
        config.set("thumbnail_count", "4").await.unwrap();

        assert_eq!(
            configured(&config, "min_trim_seconds", MIN_TRIM_SECONDS).await,
            2.5
        );
        assert_eq!(configured(&config, "thumbnail_count", THUMBNAIL_COUNT).await, 4);
    }

    #[tokio::test]
    async fn unparseable_config_falls_back_to_defaults() {
        let config: Arc<dyn ConfigPort> = Arc::new(TomlConfigAdapter::new());
        config.set("thumbnail_count", "plenty").await.unwrap();

        assert_eq!(
            configured(&config, "thumbnail_count", THUMBNAIL_COUNT).await,
            THUMBNAIL_COUNT
        );
        assert_eq!(configured(&config, "absent_key", 7_usize).await, 7);
    }
}
