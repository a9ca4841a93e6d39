//! Default configuration constants for gestext.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

use std::time::Duration;

/// Default confidence threshold for batch clip transcription.
///
/// A frame's best detection must score at least this to be admitted as an
/// observation. 0.60 is tuned for the deployed gesture models and rejects
/// most spurious single-frame detections.
pub const BATCH_CONFIDENCE_THRESHOLD: f64 = 0.60;

/// Default confidence threshold for the streaming aggregator.
///
/// Streaming admission is more permissive than batch because the rolling
/// majority vote already absorbs isolated misclassifications.
pub const STREAM_CONFIDENCE_THRESHOLD: f64 = 0.50;

/// Default sliding window size in observations (batch mode).
///
/// Windows are evaluated over the filtered observation sequence, so this
/// counts detected frames, not wall-clock frames.
pub const WINDOW_SIZE: usize = 10;

/// Default stability ratio in (0, 1] (batch mode).
///
/// A window emits a stable symbol only when its dominant label covers at
/// least `ceil(ratio * window_size)` observations.
pub const STABILITY_RATIO: f64 = 0.60;

/// Default streaming flush interval.
///
/// The aggregator reports the majority label of the most recently completed
/// interval of this length.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Labels the streaming aggregator counts; anything else is ignored.
pub const RECOGNIZED_LABELS: &[&str] = &["Hello", "I Love You", "No", "OK", "Yes"];

/// Label reported before the first interval has completed.
pub const WAITING_LABEL: &str = "Waiting...";

/// Label reported when a completed interval accumulated no admitted detections.
pub const NO_DETECTION_LABEL: &str = "No valid detection";

/// Returns the default recognized-label allow-list as owned strings.
pub fn recognized_labels() -> Vec<String> {
    RECOGNIZED_LABELS.iter().map(|s| s.to_string()).collect()
}
