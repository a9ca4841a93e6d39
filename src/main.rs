use anyhow::Result;
use clap::{CommandFactory, Parser};
use gestext::app::run_transcribe_command;
use gestext::cli::{Cli, Commands};
use gestext::config::Config;
use gestext::daemon::run_daemon;
use gestext::ipc::client::send_command;
use gestext::ipc::protocol::{Command, Response};
use gestext::ipc::server::IpcServer;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            if std::io::stdin().is_terminal() {
                Cli::command().print_help()?;
            } else {
                // Pipe mode: stdin has JSONL frame classifications
                let config = load_config(cli.config.as_deref())?;
                run_transcribe_command(config, None, cli.quiet)?;
            }
        }
        Some(Commands::Transcribe {
            input,
            window_size,
            stability_ratio,
            confidence_threshold,
        }) => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(w) = window_size {
                config.batch.window_size = w;
            }
            if let Some(r) = stability_ratio {
                config.batch.stability_ratio = r;
            }
            if let Some(t) = confidence_threshold {
                config.batch.confidence_threshold = t;
            }
            run_transcribe_command(config, input.as_deref(), cli.quiet)?;
        }
        Some(Commands::Daemon {
            socket,
            flush_interval,
        }) => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(secs) = flush_interval {
                config.stream.flush_interval_secs = secs;
            }
            run_daemon(config, socket, cli.quiet).await?;
        }
        Some(Commands::Frame { detections, socket }) => {
            let detections = serde_json::from_str(&detections)
                .map_err(|e| anyhow::anyhow!("detections must be a JSON array: {}", e))?;
            handle_ipc_command(socket, Command::Frame { detections }).await?;
        }
        Some(Commands::Label { socket }) => {
            handle_ipc_command(socket, Command::Label).await?;
        }
        Some(Commands::Status { socket }) => {
            handle_ipc_command(socket, Command::Status).await?;
        }
        Some(Commands::Shutdown { socket }) => {
            handle_ipc_command(socket, Command::Shutdown).await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "gestext", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/gestext/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path)?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

/// Send IPC command to daemon and handle response.
async fn handle_ipc_command(socket: Option<std::path::PathBuf>, command: Command) -> Result<()> {
    let socket_path = socket.unwrap_or_else(IpcServer::default_socket_path);

    match send_command(&socket_path, command).await {
        Ok(response) => match response {
            Response::Ok => {
                println!("{}", "ok".green());
            }
            Response::Label { label } => {
                println!("{}", label);
            }
            Response::Status {
                label,
                pending_detections,
                daemon_version,
            } => {
                let client_version = gestext::version_string();

                println!("Status:");
                println!("  {}  {}", "Client:".dimmed(), client_version);
                print!("  {}  {}", "Daemon:".dimmed(), daemon_version);
                if client_version != daemon_version {
                    print!(" {}", "(version mismatch!)".yellow());
                }
                println!();
                println!("  {}   {}", "Label:".dimmed(), label);
                println!("  {} {}", "Pending:".dimmed(), pending_detections);
            }
            Response::Error { message } => {
                eprintln!("{}", format!("Error: {}", message).red());
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!(
                "{}",
                format!("Failed to communicate with daemon: {}", e).red()
            );
            eprintln!("Is the daemon running? Start it with: gestext daemon");
            std::process::exit(1);
        }
    }

    Ok(())
}
