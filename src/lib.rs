//! ClipCut session core
//!
//! The engine behind a clip-trimming screen: a pixel timeline with two
//! draggable handles selects a `[start, end]` range of a media item, a
//! playback synchronizer previews the selection with auto-stop at the
//! selection end, and a commit hands the validated range to an external
//! encoder and catalog. External collaborators (catalog store, encoder,
//! media player) sit behind ports in [`ports`]; production adapters live
//! in [`adapters`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod playback;
pub mod ports;
pub mod session;
pub mod thumbs;
pub mod timeline;

// Re-export commonly used types
pub use domain::errors::{TrimError, TrimResult};
pub use domain::model::{
    ClipRecord, ExportRequest, PlaybackCursor, ThumbnailSet, TimeSpec, TimelineExtent,
    MIN_TRIM_SECONDS, THUMBNAIL_COUNT,
};
pub use playback::{PlaybackState, PlaybackSynchronizer};
pub use session::TrimSession;
pub use thumbs::ThumbnailSampler;
pub use timeline::{GestureEffect, GestureTranslator, Handle, RangeModel};
