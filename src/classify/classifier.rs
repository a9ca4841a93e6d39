//! The classifier seam.
//!
//! The detection model itself (training, architecture, inference execution)
//! lives outside this crate; the engine only consumes its per-frame output.

use crate::classify::detection::Detection;
use crate::error::{GestextError, Result};
use std::sync::{Arc, Mutex};

/// Trait for per-frame gesture classification.
///
/// This trait allows swapping implementations (a real model binding vs mock).
pub trait Classifier: Send + Sync {
    /// Classify a single encoded frame.
    ///
    /// # Arguments
    /// * `frame` - Encoded frame bytes; the engine is agnostic to the format
    ///
    /// # Returns
    /// Zero or more detections for the frame, or an inference error
    fn classify(&self, frame: &[u8]) -> Result<Vec<Detection>>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the classifier is ready
    fn is_ready(&self) -> bool;
}

/// Implement Classifier for Arc<T> to allow sharing across sessions.
impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    fn classify(&self, frame: &[u8]) -> Result<Vec<Detection>> {
        (**self).classify(frame)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock classifier for testing.
///
/// Replays a scripted sequence of per-frame outputs; once the script is
/// exhausted it keeps returning the last entry (or no detections if the
/// script was empty).
pub struct MockClassifier {
    model_name: String,
    script: Mutex<ScriptState>,
    should_fail: bool,
}

struct ScriptState {
    frames: Vec<Vec<Detection>>,
    next: usize,
}

impl MockClassifier {
    /// Create a new mock classifier that detects nothing.
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            script: Mutex::new(ScriptState {
                frames: Vec::new(),
                next: 0,
            }),
            should_fail: false,
        }
    }

    /// Configure the mock to replay the given per-frame detection lists.
    pub fn with_script(mut self, frames: Vec<Vec<Detection>>) -> Self {
        self.script = Mutex::new(ScriptState { frames, next: 0 });
        self
    }

    /// Configure the mock to fail on classify.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Classifier for MockClassifier {
    fn classify(&self, _frame: &[u8]) -> Result<Vec<Detection>> {
        if self.should_fail {
            return Err(GestextError::Inference {
                message: "mock inference failure".to_string(),
            });
        }

        let mut state = self.script.lock().map_err(|_| GestextError::Inference {
            message: "mock script lock poisoned".to_string(),
        })?;

        if state.frames.is_empty() {
            return Ok(Vec::new());
        }

        let idx = state.next.min(state.frames.len() - 1);
        if state.next < state.frames.len() {
            state.next += 1;
        }
        Ok(state.frames[idx].clone())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}
