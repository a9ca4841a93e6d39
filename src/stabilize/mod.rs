//! Temporal stabilization of observation sequences (batch mode).

pub mod transcript;
pub mod window;

pub use transcript::{TranscriptBuilder, TranscriptResult};
pub use window::{SlidingWindowStabilizer, StabilizerConfig};
