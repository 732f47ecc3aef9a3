// Thumbnail layer - evenly spaced preview frames for the timeline strip

pub mod sampler;

pub use sampler::{sample_times, ThumbnailSampler};
