//! ClipCut
//!
//! Trims locally stored video clips and catalogues the results. The same
//! session core that backs the interactive timeline (drag handles, preview
//! playback with auto-stop, thumbnail strip) is exposed here behind a small
//! command surface.
//!
//! # Usage
//!
//! ```bash
//! clipcut trim --input video.mp4 --start 0:04 --end 0:12 --name "Holiday"
//! clipcut preview --input video.mp4 --start 4 --end 12
//! clipcut list
//! clipcut remove --id clip_1735689600000_0
//! clipcut clear --yes
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::error;

use clipcut::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    let result = match cli.command {
        Commands::Trim(args) => commands::execute_trim(args).await,
        Commands::Preview(args) => commands::execute_preview(args).await,
        Commands::List(args) => commands::execute_list(args).await,
        Commands::Remove(args) => commands::execute_remove(args).await,
        Commands::Clear(args) => commands::execute_clear(args).await,
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
