use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wagate::client::{BridgeClient, stream_events};
use wagate::config::Config;
use wagate::server::{AppState, build_app};
use wagate::session::{SessionWatch, drive};

/// Wagate - expose a WhatsApp messaging account as a small HTTP API
#[derive(Parser, Debug)]
#[command(version = wagate::build_info::VERSION, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wagate.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config).await?;

    // CLI port overrides config
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let session = SessionWatch::new();

    // Bridge lifecycle events flow: event stream -> channel -> session watch.
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::spawn(stream_events(
        config.bridge.base_url.clone(),
        Duration::from_secs(config.bridge.reconnect_delay_seconds),
        event_tx,
    ));
    tokio::spawn(drive(session.clone(), event_rx));

    let state = AppState {
        session,
        client: Arc::new(BridgeClient::new(config.bridge.base_url.clone())),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let ip: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %addr, bridge = %config.bridge.base_url, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
