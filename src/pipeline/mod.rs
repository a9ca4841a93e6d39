//! Batch clip processing: classify → filter → stabilize → render.

pub mod clip;

pub use clip::{ClipPipeline, ClipPipelineConfig};
