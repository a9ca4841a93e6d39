//! Clip transcription pipeline implementation.
//!
//! Orchestrates the complete batch flow:
//! classify → filter → stabilize → render

use crate::classify::classifier::Classifier;
use crate::classify::detection::{Detection, FrameObservation};
use crate::classify::filter::ConfidenceFilter;
use crate::defaults;
use crate::error::Result;
use crate::stabilize::transcript::TranscriptResult;
use crate::stabilize::window::{SlidingWindowStabilizer, StabilizerConfig};
use std::sync::Arc;

/// Configuration for the clip pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ClipPipelineConfig {
    /// Minimum confidence for a frame's best detection to be admitted.
    pub confidence_threshold: f64,
    /// Stabilizer window size and ratio.
    pub stabilizer: StabilizerConfig,
}

impl Default for ClipPipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::BATCH_CONFIDENCE_THRESHOLD,
            stabilizer: StabilizerConfig::default(),
        }
    }
}

/// Batch pipeline for a recorded clip.
///
/// Stateless apart from its configuration; independent clips can be
/// processed in parallel with separate or shared instances.
pub struct ClipPipeline {
    filter: ConfidenceFilter,
    stabilizer: SlidingWindowStabilizer,
}

impl ClipPipeline {
    /// Creates a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClipPipelineConfig::default())
    }

    /// Creates a pipeline with custom configuration.
    pub fn with_config(config: ClipPipelineConfig) -> Self {
        Self {
            filter: ConfidenceFilter::new(config.confidence_threshold),
            stabilizer: SlidingWindowStabilizer::with_config(config.stabilizer),
        }
    }

    /// Transcribes a clip given its encoded frames and a classifier.
    ///
    /// Frames are classified in order so observations stay paired to their
    /// source frame index. The first classifier failure aborts the whole
    /// clip; inference errors are failures, distinct from the stabilization
    /// statuses.
    pub fn transcribe_clip<T: Classifier>(
        &self,
        classifier: &T,
        frames: &[Vec<u8>],
    ) -> Result<TranscriptResult> {
        let mut observations = Vec::with_capacity(frames.len());
        for frame in frames {
            let detections = classifier.classify(frame)?;
            observations.push(self.filter.admit(&detections));
        }
        Ok(self.stabilizer.stabilize(&observations))
    }

    /// Transcribes a clip from pre-classified per-frame detection lists.
    ///
    /// This is the entry point when classification happened elsewhere (the
    /// batch CLI path); one list per frame, in frame order.
    pub fn transcribe_detections(&self, frames: &[Vec<Detection>]) -> TranscriptResult {
        let observations: Vec<FrameObservation> =
            frames.iter().map(|f| self.filter.admit(f)).collect();
        self.stabilizer.stabilize(&observations)
    }

    /// Stabilizes an already-filtered observation sequence.
    pub fn stabilize(&self, observations: &[FrameObservation]) -> TranscriptResult {
        self.stabilizer.stabilize(observations)
    }
}

impl Default for ClipPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared-classifier convenience: transcribe one clip with an `Arc`'d model.
pub fn transcribe_clip(
    classifier: Arc<dyn Classifier>,
    frames: &[Vec<u8>],
    config: ClipPipelineConfig,
) -> Result<TranscriptResult> {
    ClipPipeline::with_config(config).transcribe_clip(&classifier, frames)
}
