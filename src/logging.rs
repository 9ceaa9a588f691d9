//! # Logging
//! src/logging.rs
//!
//! Inicializa el subscriber de `tracing`. `RUST_LOG` tiene prioridad sobre
//! el nivel pasado por CLI.

use crate::error::ServerError;
use tracing_subscriber::EnvFilter;

/// Instala el subscriber global
///
/// Debe llamarse una sola vez al arrancar el proceso.
pub fn init(level: &str) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| ServerError::Logging(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
