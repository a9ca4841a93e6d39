//! Detection data types produced by the classifier boundary.

use serde::{Deserialize, Serialize};

/// One candidate classification for a frame.
///
/// A frame may yield zero, one, or many detections; confidence is a
/// probability in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Gesture class label.
    pub label: String,
    /// Classifier confidence score.
    pub confidence: f64,
}

impl Detection {
    /// Creates a new detection.
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// The single admitted label for a frame after confidence filtering,
/// or `None` if no detection cleared the threshold.
///
/// Ordered by frame index; order is significant and must be preserved.
pub type FrameObservation = Option<String>;
