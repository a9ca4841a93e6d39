//! Command handler implementation for the daemon.

use crate::classify::detection::Detection;
use crate::daemon::DaemonState;
use crate::error::GestextError;
use crate::ipc::protocol::{Command, Response};
use crate::ipc::server::{CommandHandler, ShutdownSignal};
use std::sync::Arc;

/// Command handler for daemon IPC commands.
pub struct DaemonCommandHandler {
    state: Arc<DaemonState>,
    shutdown: ShutdownSignal,
}

impl DaemonCommandHandler {
    /// Creates a new command handler.
    pub fn new(state: DaemonState, shutdown: ShutdownSignal) -> Self {
        Self {
            state: Arc::new(state),
            shutdown,
        }
    }

    /// Record one frame and return the current label.
    fn record_frame(&self, detections: Vec<Detection>) -> Response {
        if let Err(e) = validate_detections(&detections) {
            // Invalid payloads never touch the aggregator.
            return Response::Error {
                message: e.to_string(),
            };
        }

        let label = self.state.aggregator.record_frame(&detections);
        Response::Label { label }
    }

    /// Return the currently reported label without recording anything.
    fn current_label(&self) -> Response {
        Response::Label {
            label: self.state.aggregator.current_label(),
        }
    }

    /// Get daemon status.
    fn status(&self) -> Response {
        Response::Status {
            label: self.state.aggregator.current_label(),
            pending_detections: self.state.aggregator.pending_detections(),
            daemon_version: crate::version_string(),
        }
    }
}

/// Reject detections whose confidence is not a probability.
fn validate_detections(detections: &[Detection]) -> crate::error::Result<()> {
    for det in detections {
        if !det.confidence.is_finite() || !(0.0..=1.0).contains(&det.confidence) {
            return Err(GestextError::InvalidInput {
                message: format!(
                    "confidence {} for label '{}' is outside [0, 1]",
                    det.confidence, det.label
                ),
            });
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl CommandHandler for DaemonCommandHandler {
    async fn handle(&self, command: Command) -> Response {
        match command {
            Command::Frame { detections } => self.record_frame(detections),
            Command::Label => self.current_label(),
            Command::Status => self.status(),
            Command::Shutdown => {
                self.shutdown.trigger().await;
                Response::Ok
            }
        }
    }
}
