use crate::defaults;
use crate::error::{GestextError, Result};
use crate::pipeline::clip::ClipPipelineConfig;
use crate::stabilize::window::StabilizerConfig;
use crate::stream::aggregator::AggregatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub batch: BatchConfig,
    pub stream: StreamConfig,
}

/// Batch (clip transcription) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub confidence_threshold: f64,
    pub window_size: usize,
    pub stability_ratio: f64,
}

/// Streaming aggregator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    pub confidence_threshold: f64,
    pub flush_interval_secs: u64,
    pub recognized_labels: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::BATCH_CONFIDENCE_THRESHOLD,
            window_size: defaults::WINDOW_SIZE,
            stability_ratio: defaults::STABILITY_RATIO,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::STREAM_CONFIDENCE_THRESHOLD,
            flush_interval_secs: defaults::FLUSH_INTERVAL.as_secs(),
            recognized_labels: defaults::recognized_labels(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - GESTEXT_WINDOW_SIZE → batch.window_size
    /// - GESTEXT_STABILITY_RATIO → batch.stability_ratio
    /// - GESTEXT_FLUSH_INTERVAL → stream.flush_interval_secs
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(window) = std::env::var("GESTEXT_WINDOW_SIZE")
            && let Ok(value) = window.parse::<usize>()
        {
            self.batch.window_size = value;
        }

        if let Ok(ratio) = std::env::var("GESTEXT_STABILITY_RATIO")
            && let Ok(value) = ratio.parse::<f64>()
        {
            self.batch.stability_ratio = value;
        }

        if let Ok(interval) = std::env::var("GESTEXT_FLUSH_INTERVAL")
            && let Ok(value) = interval.parse::<u64>()
        {
            self.stream.flush_interval_secs = value;
        }

        self
    }

    /// Validate configuration values.
    ///
    /// Thresholds are probabilities, the stability ratio lives in (0, 1],
    /// and windows/intervals must be non-degenerate.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.batch.confidence_threshold) {
            return Err(GestextError::ConfigInvalidValue {
                key: "batch.confidence_threshold".to_string(),
                message: "must be in [0, 1]".to_string(),
            });
        }
        if self.batch.window_size == 0 {
            return Err(GestextError::ConfigInvalidValue {
                key: "batch.window_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.batch.stability_ratio > 0.0 && self.batch.stability_ratio <= 1.0) {
            return Err(GestextError::ConfigInvalidValue {
                key: "batch.stability_ratio".to_string(),
                message: "must be in (0, 1]".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.stream.confidence_threshold) {
            return Err(GestextError::ConfigInvalidValue {
                key: "stream.confidence_threshold".to_string(),
                message: "must be in [0, 1]".to_string(),
            });
        }
        if self.stream.flush_interval_secs == 0 {
            return Err(GestextError::ConfigInvalidValue {
                key: "stream.flush_interval_secs".to_string(),
                message: "must be at least 1 second".to_string(),
            });
        }
        if self.stream.recognized_labels.is_empty() {
            return Err(GestextError::ConfigInvalidValue {
                key: "stream.recognized_labels".to_string(),
                message: "must list at least one label".to_string(),
            });
        }
        Ok(())
    }

    /// Streaming flush interval as a `Duration`.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.stream.flush_interval_secs)
    }

    /// Stabilizer configuration derived from the batch section.
    pub fn stabilizer_config(&self) -> StabilizerConfig {
        StabilizerConfig {
            window_size: self.batch.window_size,
            stability_ratio: self.batch.stability_ratio,
        }
    }

    /// Clip pipeline configuration derived from the batch section.
    pub fn clip_config(&self) -> ClipPipelineConfig {
        ClipPipelineConfig {
            confidence_threshold: self.batch.confidence_threshold,
            stabilizer: self.stabilizer_config(),
        }
    }

    /// Aggregator configuration derived from the stream section.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            confidence_threshold: self.stream.confidence_threshold,
            flush_interval: self.flush_interval(),
            recognized_labels: self.stream.recognized_labels.clone(),
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/gestext/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("gestext")
            .join("config.toml")
    }
}
