//! Thumbnail sampler
//!
//! Derives a fixed number of time-evenly-spaced preview frames for the
//! timeline strip. Each extraction attempt is independent: a failure is
//! logged and skipped, never aborting the remaining attempts, so the
//! resulting set may be sparse or even empty.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::model::ThumbnailSet;
use crate::ports::EncodePort;

/// Extraction schedule: `count` timestamps at `i * duration / count`.
/// The iterator is finite and consumed once per media load.
pub fn sample_times(duration: f64, count: usize) -> impl Iterator<Item = (usize, f64)> {
    (0..count).map(move |i| (i, i as f64 * duration / count as f64))
}

/// Best-effort frame extraction over the encode collaborator
pub struct ThumbnailSampler {
    encode: Arc<dyn EncodePort>,
}

impl ThumbnailSampler {
    pub fn new(encode: Arc<dyn EncodePort>) -> Self {
        Self { encode }
    }

    /// Run the extraction schedule against `media_uri`. Returns a
    /// possibly-sparse set in index order; zero successes is not an error,
    /// the caller simply renders no thumbnails.
    pub async fn sample(&self, media_uri: &str, duration: f64, count: usize) -> ThumbnailSet {
        let mut set = ThumbnailSet::new();
        if count == 0 || duration <= 0.0 {
            return set;
        }

        for (index, at_seconds) in sample_times(duration, count) {
            match self.encode.extract_frame(media_uri, at_seconds).await {
                Ok(image_uri) => set.push(index, image_uri),
                Err(err) => {
                    warn!(index, at_seconds, %err, "thumbnail extraction failed, skipping");
                }
            }
        }
        debug!(
            media_uri,
            sampled = set.len(),
            requested = count,
            "thumbnail sampling finished"
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::errors::{TrimError, TrimResult};

    /// Encode stub that fails extraction for a chosen set of indices
    struct FlakyEncoder {
        fail_indices: Vec<usize>,
        attempts: Mutex<usize>,
    }

    impl FlakyEncoder {
        fn failing_at(fail_indices: Vec<usize>) -> Self {
            Self {
                fail_indices,
                attempts: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl EncodePort for FlakyEncoder {
        async fn trim(
            &self,
            _source_uri: &str,
            _start_seconds: f64,
            _duration_seconds: f64,
        ) -> TrimResult<String> {
            unreachable!("sampler never trims");
        }

        async fn extract_frame(&self, _media_uri: &str, at_seconds: f64) -> TrimResult<String> {
            let index = {
                let mut attempts = self.attempts.lock().unwrap();
                let i = *attempts;
                *attempts += 1;
                i
            };
            if self.fail_indices.contains(&index) {
                return Err(TrimError::ThumbnailSampleFailed {
                    at_seconds,
                    reason: "decoder glitch".to_string(),
                });
            }
            Ok(format!("thumb_{}.jpg", index))
        }
    }

    #[test]
    fn schedule_is_evenly_spaced() {
        let times: Vec<(usize, f64)> = sample_times(20.0, 10).collect();
        assert_eq!(times.len(), 10);
        assert_eq!(times[0], (0, 0.0));
        assert_eq!(times[1], (1, 2.0));
        assert_eq!(times[9], (9, 18.0));
    }

    #[tokio::test]
    async fn failures_are_skipped_not_fatal() {
        let encoder = Arc::new(FlakyEncoder::failing_at(vec![2, 5, 8]));
        let sampler = ThumbnailSampler::new(encoder);

        let set = sampler.sample("video.mp4", 20.0, 10).await;
        assert_eq!(set.len(), 7);
        let indices: Vec<usize> = set.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 3, 4, 6, 7, 9]);
    }

    #[tokio::test]
    async fn all_failures_yield_empty_set() {
        let encoder = Arc::new(FlakyEncoder::failing_at((0..10).collect()));
        let sampler = ThumbnailSampler::new(encoder);

        let set = sampler.sample("video.mp4", 20.0, 10).await;
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn zero_count_is_a_no_op() {
        let encoder = Arc::new(FlakyEncoder::failing_at(vec![]));
        let sampler = ThumbnailSampler::new(encoder);

        let set = sampler.sample("video.mp4", 20.0, 0).await;
        assert!(set.is_empty());
    }
}
