//! Sequential accept loop: one connection is read, routed, answered and
//! closed before the next one is accepted.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::assets;
use crate::config::ServerConfig;
use crate::http::{InboundRequest, READ_BUFFER_SIZE};
use crate::index::SearchEngine;
use crate::router::Router;

/// Pending-connection queue length passed to `listen`.
pub const LISTEN_BACKLOG: u32 = 10;

/// Fatal startup failures. None of these are retried.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Error creating socket: {0}")]
    Socket(#[source] io::Error),

    #[error("Error binding socket to port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Error listening on socket: {0}")]
    Listen(#[source] io::Error),
}

/// Create a listening socket on all IPv4 interfaces with address reuse enabled.
///
/// Must be called from within a Tokio runtime.
pub fn bind(port: u16) -> Result<TcpListener, ServerError> {
    let socket = TcpSocket::new_v4().map_err(ServerError::Socket)?;
    socket.set_reuseaddr(true).map_err(ServerError::Socket)?;
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    socket
        .bind(addr)
        .map_err(|source| ServerError::Bind { port, source })?;
    socket.listen(LISTEN_BACKLOG).map_err(ServerError::Listen)
}

pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    /// Build a server and index any `*.txt` files in the first existing data directory.
    pub fn new(config: ServerConfig) -> Self {
        let mut engine = SearchEngine::new();
        auto_index(&mut engine, &config.data_dirs);
        Self::with_engine(config, engine)
    }

    /// Build a server over an already populated engine.
    pub fn with_engine(config: ServerConfig, engine: SearchEngine) -> Self {
        let router = Router::new(engine, config.asset_roots.clone());
        Self { config, router }
    }

    /// Serve until `shutdown` is cancelled.
    ///
    /// Cancellation interrupts a pending accept but never a request in progress.
    pub async fn run(self, listener: TcpListener, shutdown: CancellationToken) {
        info!(
            "Serving {} documents on port {}",
            self.router.engine().document_count(),
            self.config.port
        );
        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => accepted,
            };
            match accepted {
                Ok((stream, peer)) => {
                    if let Err(e) = handle_connection(&self.router, stream, peer).await {
                        warn!("connection from {} failed: {}", peer, e);
                    }
                }
                Err(e) => warn!("Error accepting connection: {}", e),
            }
        }
        info!("Server stopped");
    }
}

/// Index the `*.txt` files of the first existing directory in `data_dirs`.
/// A missing data directory is not an error.
pub fn auto_index(engine: &mut SearchEngine, data_dirs: &[PathBuf]) -> usize {
    let Some(dir) = assets::resolve_dir(data_dirs) else {
        debug!("no data directory found, starting with an empty index");
        return 0;
    };
    let files = assets::text_files(dir);
    if files.is_empty() {
        return 0;
    }
    let indexed = engine.index_documents(&files);
    info!("Auto-indexed {} sample files from {}", indexed, dir.display());
    indexed
}

async fn handle_connection(
    router: &Router,
    mut stream: TcpStream,
    peer: SocketAddr,
) -> io::Result<()> {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let n = stream.read(&mut buffer).await?;
    let Some(request) = InboundRequest::parse(&buffer[..n]) else {
        debug!("{} closed without sending a request", peer);
        return Ok(());
    };

    let outcome = router.dispatch(&request);
    debug!(
        "{} \"{} {} {}\" -> {}",
        peer,
        request.method,
        request.path,
        request.protocol,
        outcome.status()
    );
    if let Some(query) = &request.query {
        trace!("raw query string: {}", query);
    }
    stream.write_all(&outcome.into_response()).await?;
    stream.shutdown().await
}
