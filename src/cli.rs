//! Command-line interface for gestext
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Gesture stream stabilization
#[derive(Parser, Debug)]
#[command(
    name = "gestext",
    version,
    about = "Stabilize noisy gesture classification streams into text transcripts"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Parse a flush interval string into seconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`5s`, `2m`), and compound (`1m30s`).
fn parse_interval_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs())
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe a recorded clip from per-frame detection lists (JSON lines)
    Transcribe {
        /// Input file; reads stdin when omitted
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Sliding window size in observations
        #[arg(long, value_name = "N")]
        window_size: Option<usize>,

        /// Stability ratio in (0, 1]
        #[arg(long, value_name = "RATIO")]
        stability_ratio: Option<f64>,

        /// Minimum confidence for a frame's best detection
        #[arg(long, value_name = "THRESHOLD")]
        confidence_threshold: Option<f64>,
    },

    /// Start the streaming daemon (foreground process for systemd)
    Daemon {
        /// Path to Unix socket (default: $XDG_RUNTIME_DIR/gestext.sock)
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,

        /// Flush interval override (default: 5s). Examples: 3s, 500s, 2m
        #[arg(long, value_name = "DURATION", value_parser = parse_interval_secs)]
        flush_interval: Option<u64>,
    },

    /// Send one frame's detections to the daemon and print the current label
    Frame {
        /// JSON array of detections, e.g. '[{"label":"Hello","confidence":0.9}]'
        #[arg(value_name = "DETECTIONS")]
        detections: String,

        /// Path to Unix socket (default: $XDG_RUNTIME_DIR/gestext.sock)
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
    },

    /// Print the daemon's currently reported label
    Label {
        /// Path to Unix socket (default: $XDG_RUNTIME_DIR/gestext.sock)
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
    },

    /// Get daemon status
    Status {
        /// Path to Unix socket (default: $XDG_RUNTIME_DIR/gestext.sock)
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
    },

    /// Shut the daemon down
    Shutdown {
        /// Path to Unix socket (default: $XDG_RUNTIME_DIR/gestext.sock)
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["gestext"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_transcribe_with_overrides() {
        let cli = Cli::try_parse_from([
            "gestext",
            "transcribe",
            "clip.jsonl",
            "--window-size",
            "15",
            "--stability-ratio",
            "0.8",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Transcribe {
                input,
                window_size,
                stability_ratio,
                confidence_threshold,
            }) => {
                assert_eq!(input, Some(PathBuf::from("clip.jsonl")));
                assert_eq!(window_size, Some(15));
                assert_eq!(stability_ratio, Some(0.8));
                assert_eq!(confidence_threshold, None);
            }
            _ => panic!("Expected Transcribe command"),
        }
    }

    #[test]
    fn test_daemon_flush_interval_formats() {
        let cli = Cli::try_parse_from(["gestext", "daemon", "--flush-interval", "2m"]).unwrap();
        match cli.command {
            Some(Commands::Daemon { flush_interval, .. }) => {
                assert_eq!(flush_interval, Some(120));
            }
            _ => panic!("Expected Daemon command"),
        }

        let cli = Cli::try_parse_from(["gestext", "daemon", "--flush-interval", "7"]).unwrap();
        match cli.command {
            Some(Commands::Daemon { flush_interval, .. }) => {
                assert_eq!(flush_interval, Some(7));
            }
            _ => panic!("Expected Daemon command"),
        }
    }

    #[test]
    fn test_parse_interval_secs_rejects_garbage() {
        assert!(parse_interval_secs("soon").is_err());
    }

    #[test]
    fn test_frame_takes_json_argument() {
        let cli = Cli::try_parse_from([
            "gestext",
            "frame",
            r#"[{"label":"Hello","confidence":0.9}]"#,
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Frame { detections, .. }) => {
                assert!(detections.contains("Hello"));
            }
            _ => panic!("Expected Frame command"),
        }
    }

    #[test]
    fn test_global_quiet_flag() {
        let cli = Cli::try_parse_from(["gestext", "-q", "label"]).unwrap();
        assert!(cli.quiet);
    }
}
