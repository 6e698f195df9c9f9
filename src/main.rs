//! search-gateway: serve a local document index over a minimal HTTP/1.1 surface.

mod assets;
mod config;
mod decode;
mod http;
mod index;
mod json;
mod router;
mod server;
mod suggest;
mod tokenize;

use std::path::PathBuf;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::ServerConfig;
use crate::server::Server;

#[derive(Parser)]
#[command(name = "search-gateway")]
#[command(about = "Index local text files and serve search, suggestions and a web UI")]
struct Cli {
    /// Port to listen on (invalid values fall back to 8080).
    port: Option<String>,

    /// Directory to auto-index instead of the default `data/` candidates. Repeatable.
    #[arg(long)]
    data_dir: Vec<PathBuf>,

    /// Root containing `web/` assets instead of the default candidates. Repeatable.
    #[arg(long)]
    web_root: Vec<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let port = config::parse_port(cli.port.as_deref());
    let cwd = std::env::current_dir()?;
    let config = ServerConfig::new(port, &cwd)
        .with_asset_roots(cli.web_root)
        .with_data_dirs(cli.data_dir);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run_serve(config))
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = match server::bind(config.port) {
        Ok(listener) => listener,
        Err(e) => {
            error!("{}", e);
            anyhow::bail!("Failed to start server");
        }
    };
    info!("Server started on http://localhost:{}", config.port);
    info!("Press Ctrl+C to stop the server");

    let server = Server::new(config);

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutting down server...");
                on_signal.cancel();
            }
            Err(e) => warn!("unable to listen for Ctrl+C: {}", e),
        }
    });

    server.run(listener, shutdown).await;
    Ok(())
}
