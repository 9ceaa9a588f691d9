//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones y atiende cada una en su propio thread. Los threads no
//! comparten estado mutable: solo el router (inmutable) y el storage.

use super::connection::handle_connection;
use crate::config::Config;
use crate::error::ServerError;
use crate::router::Router;
use crate::storage::{FileStorage, Storage};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1: un request por conexión, un thread por conexión
pub struct Server {
    config: Config,
    router: Arc<Router>,
    storage: Arc<dyn Storage>,
}

impl Server {
    /// Servidor con las rutas por defecto y storage en `config.directory`
    pub fn new(config: Config) -> Self {
        let storage = FileStorage::new(config.directory.clone());
        Self::with_parts(config, Router::with_default_routes(), Arc::new(storage))
    }

    pub fn with_parts(config: Config, router: Router, storage: Arc<dyn Storage>) -> Self {
        Self {
            config,
            router: Arc::new(router),
            storage,
        }
    }

    /// Crea el listener en `host:port`
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address();

        let addr = address
            .to_socket_addrs()
            .map_err(|e| ServerError::Config(format!("invalid address {}: {}", address, e)))?
            .next()
            .ok_or_else(|| ServerError::Config(format!("address {} did not resolve", address)))?;

        bind_listener(addr, self.config.backlog)
            .map_err(|source| ServerError::Bind { addr: address, source })
    }

    /// Loop de accept. Un error en una conexión nunca detiene el loop.
    pub fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        tracing::info!(address = %listener.local_addr()?, "waiting for clients to connect");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.spawn_connection(stream) {
                        tracing::error!(error = %e, "failed to start connection thread");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }

    pub fn run(&self) -> Result<(), ServerError> {
        let listener = self.bind()?;
        self.serve(listener)
    }

    fn spawn_connection(&self, stream: TcpStream) -> io::Result<()> {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_read_timeout(Some(self.config.read_timeout()))?;
        stream.set_write_timeout(Some(self.config.write_timeout()))?;

        let router = Arc::clone(&self.router);
        let storage = Arc::clone(&self.storage);
        let max_request_bytes = self.config.max_request_bytes;

        thread::Builder::new()
            .name("connection".to_string())
            .spawn(move || {
                let span = tracing::info_span!("connection", peer = %peer);
                let _guard = span.enter();

                let mut stream = stream;
                if let Err(e) = handle_connection(&mut stream, &router, storage.as_ref(), max_request_bytes) {
                    tracing::warn!(error = %e, "connection aborted");
                }
            })?;

        Ok(())
    }
}

/// Listener con `SO_REUSEADDR` y, en Unix, `SO_REUSEPORT`
fn bind_listener(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos", target_os = "cygwin"))))]
    socket.set_reuse_port(true)?;

    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    Ok(socket.into())
}
