//! Batch command implementation: parse frame classifications, stabilize,
//! print the transcript.

use crate::classify::detection::Detection;
use crate::config::Config;
use crate::error::{GestextError, Result};
use crate::pipeline::clip::ClipPipeline;
use std::io::Read;
use std::path::Path;

/// Run the transcribe command: read per-frame detections → stabilize → print.
///
/// Input is JSON lines: one array of detections per frame, in frame order.
/// An empty array is a frame with no detections; blank lines are skipped.
///
/// # Arguments
/// * `config` - Base configuration (already carrying any CLI overrides)
/// * `input` - Input file path, or None to read stdin
/// * `quiet` - Suppress progress messages
///
/// # Returns
/// Ok(()) after printing the transcript or status, or an error
pub fn run_transcribe_command(config: Config, input: Option<&Path>, quiet: bool) -> Result<()> {
    config.validate()?;

    let contents = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let frames = parse_frames(&contents)?;

    if !quiet {
        eprintln!("Stabilizing {} frames...", frames.len());
    }

    let pipeline = ClipPipeline::with_config(config.clip_config());
    let result = pipeline.transcribe_detections(&frames);

    println!("{}", result);
    Ok(())
}

/// Parse JSONL frame classifications into per-frame detection lists.
///
/// Line order is frame order; it must be preserved so observations stay
/// paired to their source frame index.
pub fn parse_frames(contents: &str) -> Result<Vec<Vec<Detection>>> {
    let mut frames = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let detections: Vec<Detection> =
            serde_json::from_str(line).map_err(|e| GestextError::InvalidInput {
                message: format!("frame {} is not a detection array: {}", idx + 1, e),
            })?;
        frames.push(detections);
    }
    Ok(frames)
}
