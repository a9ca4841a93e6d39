//! Sliding-window majority-vote stabilizer for recorded clips.
//!
//! Consumes the full per-frame observation sequence and emits the
//! deduplicated sequence of stable symbols, rendered to text.

use crate::classify::detection::FrameObservation;
use crate::defaults;
use crate::stabilize::transcript::{TranscriptBuilder, TranscriptResult};

/// Configuration for the sliding-window stabilizer.
#[derive(Debug, Clone, Copy)]
pub struct StabilizerConfig {
    /// Number of consecutive filtered observations per window.
    pub window_size: usize,
    /// Fraction of a window, in (0, 1], the dominant label must cover.
    pub stability_ratio: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
            stability_ratio: defaults::STABILITY_RATIO,
        }
    }
}

impl StabilizerConfig {
    /// Absolute count the dominant label must reach within a window.
    pub fn stability_count(&self) -> usize {
        (self.stability_ratio * self.window_size as f64).ceil() as usize
    }
}

/// Batch stabilizer: overlapping windows over the filtered observation
/// sequence, one majority-vote decision per window.
///
/// Windows are defined over detected frames only; absent observations are
/// dropped before windowing, so temporal gaps do not affect window
/// boundaries. That is deliberate: changing it would shift output for
/// thresholds tuned against the deployed behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingWindowStabilizer {
    config: StabilizerConfig,
}

impl SlidingWindowStabilizer {
    /// Creates a stabilizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stabilizer with custom configuration.
    pub fn with_config(config: StabilizerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Stabilizes a clip's observation sequence into a transcript result.
    pub fn stabilize(&self, observations: &[FrameObservation]) -> TranscriptResult {
        if observations.is_empty() {
            return TranscriptResult::NoFramesProcessed;
        }

        let filtered: Vec<&str> = observations
            .iter()
            .filter_map(|obs| obs.as_deref())
            .collect();

        if filtered.is_empty() {
            return TranscriptResult::NoSignal;
        }

        let stable = self.stable_symbols(&filtered);

        match TranscriptBuilder::render(&stable) {
            Some(text) => TranscriptResult::Text(text),
            None => TranscriptResult::Unstable,
        }
    }

    /// Evaluates every overlapping window and returns the raw stable-symbol
    /// sequence, before duplicate collapsing.
    ///
    /// One window per start index `i` in `[0, len - window_size]`; a
    /// sequence shorter than a window yields nothing.
    pub fn stable_symbols<'a>(&self, filtered: &[&'a str]) -> Vec<&'a str> {
        let window_size = self.config.window_size;
        if window_size == 0 || filtered.len() < window_size {
            return Vec::new();
        }

        let required = self.config.stability_count();
        let mut stable = Vec::new();

        for window in filtered.windows(window_size) {
            let (label, count) = dominant_label(window);
            if count >= required {
                stable.push(label);
            }
        }

        stable
    }
}

/// Most frequent label in a window and its count.
///
/// Ties go to the label appearing first within the window.
fn dominant_label<'a>(window: &[&'a str]) -> (&'a str, usize) {
    // First-occurrence order; strict comparison keeps the earlier label on ties.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &label in window {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best = ("", 0);
    for (label, count) in counts {
        if count > best.1 {
            best = (label, count);
        }
    }
    best
}
