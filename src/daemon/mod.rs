//! Daemon mode for gestext - owns the streaming aggregator and IPC server.

pub mod handler;

use crate::config::Config;
use crate::error::Result;
use crate::ipc::server::IpcServer;
use crate::stream::aggregator::TimeWindowAggregator;
use handler::DaemonCommandHandler;
use std::path::PathBuf;
use std::sync::Arc;

/// Daemon state: the process-lifetime aggregator.
///
/// All streaming mutation funnels through the aggregator's single
/// synchronized entry point; the daemon holds no other mutable state.
pub struct DaemonState {
    /// Streaming aggregator (lives for the whole daemon process)
    pub aggregator: Arc<TimeWindowAggregator>,
}

impl DaemonState {
    /// Creates daemon state from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            aggregator: Arc::new(TimeWindowAggregator::new(config.aggregator_config())),
        }
    }
}

/// Run the daemon: start the IPC server, serve frames until shutdown.
///
/// # Arguments
/// * `config` - Configuration (validated before the server starts)
/// * `socket_path` - Path to Unix socket for IPC
/// * `quiet` - Suppress status messages
///
/// # Returns
/// Ok(()) on graceful shutdown, error otherwise
pub async fn run_daemon(config: Config, socket_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    config.validate()?;

    let socket_path = socket_path.unwrap_or_else(IpcServer::default_socket_path);
    let server = IpcServer::new(socket_path.clone())?;

    let state = DaemonState::new(&config);
    let handler = DaemonCommandHandler::new(state, server.shutdown_signal());

    if !quiet {
        eprintln!(
            "gestext daemon listening on {} (flush interval {}s)",
            socket_path.display(),
            config.stream.flush_interval_secs
        );
    }

    server.start(handler).await?;
    server.stop().await?;

    if !quiet {
        eprintln!("gestext daemon stopped");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_daemon_state_starts_waiting() {
        let state = DaemonState::new(&Config::default());
        assert_eq!(state.aggregator.current_label(), defaults::WAITING_LABEL);
        assert_eq!(state.aggregator.pending_detections(), 0);
    }
}
