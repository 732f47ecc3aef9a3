// Playback layer - keeps the media cursor aligned to the active selection

pub mod synchronizer;

pub use synchronizer::{PlaybackState, PlaybackSynchronizer};
