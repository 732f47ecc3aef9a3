//! Command-line argument definitions

use clap::Args;

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Selection start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// Selection end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Clip name shown in the catalog
    #[arg(short, long)]
    pub name: Option<String>,

    /// Clip description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Selection start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// Selection end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Skip the thumbnail strip sampling
    #[arg(long)]
    pub no_thumbnails: bool,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Catalog id of the clip (e.g. clip_1735689600000_0)
    #[arg(long)]
    pub id: String,
}

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm removal of all clips and their files
    #[arg(long)]
    pub yes: bool,
}
