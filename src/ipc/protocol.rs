//! JSON message protocol for IPC communication between CLI and daemon.

use crate::classify::detection::Detection;
use serde::{Deserialize, Serialize};

/// Commands sent by CLI (or any frame source) to the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Record one frame's detections and return the current label
    Frame { detections: Vec<Detection> },
    /// Get the currently reported label
    Label,
    /// Get daemon status
    Status,
    /// Shutdown the daemon
    Shutdown,
}

impl Command {
    /// Serialize command to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize command from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Responses sent by daemon to CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Currently reported label
    Label { label: String },
    /// Current daemon status
    Status {
        label: String,
        pending_detections: u64,
        daemon_version: String,
    },
    /// Command succeeded with nothing to report
    Ok,
    /// Error occurred
    Error { message: String },
}

impl Response {
    /// Serialize response to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize response from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Command Tests

    #[test]
    fn test_command_frame_json_roundtrip() {
        let cmd = Command::Frame {
            detections: vec![Detection::new("Hello", 0.9), Detection::new("No", 0.4)],
        };
        let json = cmd.to_json().expect("should serialize");
        let deserialized = Command::from_json(&json).expect("should deserialize");
        assert_eq!(cmd, deserialized);
    }

    #[test]
    fn test_command_all_variants_serialize() {
        let commands = vec![
            Command::Frame { detections: vec![] },
            Command::Label,
            Command::Status,
            Command::Shutdown,
        ];

        for cmd in commands {
            let json = cmd.to_json().expect("should serialize");
            let deserialized = Command::from_json(&json).expect("should deserialize");
            assert_eq!(cmd, deserialized, "roundtrip failed for {:?}", cmd);
        }
    }

    #[test]
    fn test_json_format_is_snake_case() {
        let cmd = Command::Label;
        let json = cmd.to_json().expect("should serialize");
        assert!(
            json.contains("\"type\":\"label\""),
            "JSON should use snake_case. Got: {}",
            json
        );

        let cmd = Command::Frame { detections: vec![] };
        let json = cmd.to_json().expect("should serialize");
        assert!(
            json.contains("\"type\":\"frame\""),
            "JSON should use snake_case. Got: {}",
            json
        );
    }

    #[test]
    fn test_frame_command_wire_format() {
        let json = r#"{"type":"frame","detections":[{"label":"Yes","confidence":0.8}]}"#;
        let cmd = Command::from_json(json).expect("should deserialize");
        match cmd {
            Command::Frame { detections } => {
                assert_eq!(detections.len(), 1);
                assert_eq!(detections[0].label, "Yes");
            }
            _ => panic!("Expected Frame command"),
        }
    }

    #[test]
    fn test_malformed_command_is_rejected() {
        assert!(Command::from_json("not json").is_err());
        assert!(Command::from_json(r#"{"type":"frame"}"#).is_err());
        assert!(Command::from_json(r#"{"type":"unknown"}"#).is_err());
    }

    // Response Tests

    #[test]
    fn test_response_label_json_roundtrip() {
        let resp = Response::Label {
            label: "Hello".to_string(),
        };
        let json = resp.to_json().expect("should serialize");
        let deserialized = Response::from_json(&json).expect("should deserialize");
        assert_eq!(resp, deserialized);
    }

    #[test]
    fn test_response_status_json_roundtrip() {
        let resp = Response::Status {
            label: "Waiting...".to_string(),
            pending_detections: 7,
            daemon_version: "0.2.0".to_string(),
        };
        let json = resp.to_json().expect("should serialize");
        let deserialized = Response::from_json(&json).expect("should deserialize");
        assert_eq!(resp, deserialized);
    }

    #[test]
    fn test_response_error_json_roundtrip() {
        let resp = Response::Error {
            message: "invalid frame payload".to_string(),
        };
        let json = resp.to_json().expect("should serialize");
        let deserialized = Response::from_json(&json).expect("should deserialize");
        assert_eq!(resp, deserialized);
    }
}
