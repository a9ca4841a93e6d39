//! Transcript rendering shared by the stabilization paths.
//!
//! Collapses consecutive duplicate stable symbols and joins the survivors
//! with single spaces. Duplicates are compared against the last raw symbol,
//! never against rendered text.

use std::fmt;

/// Outcome of stabilizing a clip's observation sequence.
///
/// The status variants are defined results, not errors: an empty or
/// all-absent input is a normal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptResult {
    /// Rendered transcript text.
    Text(String),
    /// The clip contained no frames at all.
    NoFramesProcessed,
    /// Frames existed but none passed the confidence filter.
    NoSignal,
    /// Observations existed but no window met the stability threshold.
    Unstable,
}

impl TranscriptResult {
    /// Human-readable message for the status variants, or the text itself.
    pub fn message(&self) -> &str {
        match self {
            TranscriptResult::Text(text) => text,
            TranscriptResult::NoFramesProcessed => "no frames processed",
            TranscriptResult::NoSignal => "no signal",
            TranscriptResult::Unstable => "sequence too unstable",
        }
    }

    /// Returns true if stabilization produced transcript text.
    pub fn is_text(&self) -> bool {
        matches!(self, TranscriptResult::Text(_))
    }
}

impl fmt::Display for TranscriptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Accumulates stable symbols into a rendered transcript.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    symbols: Vec<String>,
}

impl TranscriptBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stable symbol, dropping it if it repeats the previous raw symbol.
    pub fn push(&mut self, symbol: &str) {
        if self.symbols.last().map(String::as_str) != Some(symbol) {
            self.symbols.push(symbol.to_string());
        }
    }

    /// Number of symbols kept after collapsing.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbols were kept.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Renders the collapsed symbols, or `None` if none were pushed.
    pub fn finish(self) -> Option<String> {
        if self.symbols.is_empty() {
            None
        } else {
            Some(self.symbols.join(" "))
        }
    }

    /// Renders a full symbol sequence in one call.
    pub fn render<S: AsRef<str>>(symbols: &[S]) -> Option<String> {
        let mut builder = Self::new();
        for symbol in symbols {
            builder.push(symbol.as_ref());
        }
        builder.finish()
    }
}
