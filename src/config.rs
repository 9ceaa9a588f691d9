//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./mini_http_server --directory /tmp/files --port 4221 \
//!   --read-timeout-ms 2000 \
//!   --max-request-bytes 65536
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILES_DIRECTORY=/tmp/files HTTP_PORT=8080 ./mini_http_server
//! ```

use crate::error::ServerError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Tamaño mínimo aceptado para `--max-request-bytes`
pub const MIN_REQUEST_BYTES: usize = 1024;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "mini_http_server")]
#[command(about = "Servidor HTTP/1.1 mínimo con rutas de echo y archivos")]
#[command(version)]
pub struct Config {
    /// Directorio raíz para las rutas /files/
    #[arg(long, env = "FILES_DIRECTORY")]
    pub directory: PathBuf,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor (0 = efímero)
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Tamaño de la cola de conexiones pendientes
    #[arg(long, default_value = "128", env = "HTTP_BACKLOG")]
    pub backlog: i32,

    // === Timeouts ===

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Timeout de escritura por conexión en milisegundos
    #[arg(long = "write-timeout-ms", default_value = "5000", env = "WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: u64,

    // === Límites ===

    /// Máximo de bytes aceptados para un request (headers + body)
    #[arg(long = "max-request-bytes", default_value = "1048576", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Filtro de logging (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// Si falta `--directory`, clap termina el proceso con código distinto de 0.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Configuración por defecto sobre un directorio dado
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            host: "0.0.0.0".to_string(),
            port: 4221,
            backlog: 128,
            read_timeout_ms: 5_000,
            write_timeout_ms: 5_000,
            max_request_bytes: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Cualquier error aquí es fatal al arrancar.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.directory.is_dir() {
            return Err(ServerError::Config(format!(
                "directory {} does not exist or is not a directory",
                self.directory.display()
            )));
        }

        if self.backlog <= 0 {
            return Err(ServerError::Config("backlog must be >= 1".to_string()));
        }

        // Un timeout de 0 lo rechaza set_read_timeout
        if self.read_timeout_ms == 0 {
            return Err(ServerError::Config("read timeout must be > 0".to_string()));
        }
        if self.write_timeout_ms == 0 {
            return Err(ServerError::Config("write timeout must be > 0".to_string()));
        }

        if self.max_request_bytes < MIN_REQUEST_BYTES {
            return Err(ServerError::Config(format!(
                "max request bytes must be >= {}",
                MIN_REQUEST_BYTES
            )));
        }

        Ok(())
    }

    /// Loguea un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            directory = %self.directory.display(),
            backlog = self.backlog,
            read_timeout_ms = self.read_timeout_ms,
            write_timeout_ms = self.write_timeout_ms,
            max_request_bytes = self.max_request_bytes,
            "server configuration"
        );
    }
}
