// Adapters - External system implementations

pub mod clock_playback;
pub mod ffmpeg_encode;
pub mod json_catalog;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use clock_playback::ClockPlaybackAdapter;
pub use ffmpeg_encode::FfmpegEncodeAdapter;
pub use json_catalog::JsonCatalogAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
