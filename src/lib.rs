//! gestext - Gesture stream stabilization
//!
//! Turns noisy per-frame gesture classifications into stable text
//! transcripts: a sliding-window stabilizer for recorded clips and a
//! time-window aggregator for live streams.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod defaults;
pub mod error;
pub mod ipc;
pub mod pipeline;
pub mod stabilize;
pub mod stream;

// Core types (classify → stabilize/aggregate → render)
pub use classify::classifier::{Classifier, MockClassifier};
pub use classify::detection::{Detection, FrameObservation};
pub use classify::filter::{AllowListFilter, ConfidenceFilter};
pub use stabilize::transcript::{TranscriptBuilder, TranscriptResult};
pub use stabilize::window::{SlidingWindowStabilizer, StabilizerConfig};
pub use stream::aggregator::{AggregatorConfig, TimeWindowAggregator};
pub use stream::clock::{Clock, SystemClock};
pub use stream::session::StreamSession;

// Batch pipeline
pub use pipeline::clip::{ClipPipeline, ClipPipelineConfig};

// Error handling
pub use error::{GestextError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.2.0+abc1234"` when git hash is available, `"0.2.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
