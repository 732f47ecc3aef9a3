//! CLI module for ClipCut
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipCut - trim video clips and catalogue the results
#[derive(Parser)]
#[command(name = "clipcut")]
#[command(about = "ClipCut - trim video clips and catalogue the results")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trim a selection out of a video and save it to the catalog
    Trim(args::TrimArgs),
    /// Simulate a preview playback of a selection (drag, play, auto-stop)
    Preview(args::PreviewArgs),
    /// List catalogued clips, newest first
    List(args::ListArgs),
    /// Remove one clip and its media files
    Remove(args::RemoveArgs),
    /// Remove every clip and its media files
    Clear(args::ClearArgs),
}
