//! # Errores del Servidor
//! src/error.rs
//!
//! Dos familias:
//! - `ServerError`: fallos de arranque (config, bind, logging). Son fatales
//!   para el proceso.
//! - `ConnectionError`: fallos de transporte de una conexión. Abortan solo
//!   esa conexión; el loop de accept sigue.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Error o timeout leyendo el request
    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),

    /// El request superó el límite configurado
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// Error o timeout enviando la response
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}
