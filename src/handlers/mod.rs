//! # Handlers de Rutas
//! src/handlers/mod.rs
//!
//! Cada handler es una función pura `(Request, Storage) -> Response`.
//! Los errores del storage se convierten aquí en 404/500 y nunca se
//! propagan más arriba.
//!
//! - `basic`: `/`, `/echo/`, `/user-agent` y el 404 por defecto
//! - `files`: lectura y escritura bajo `/files/`

pub mod basic;
pub mod files;

pub use basic::{echo_handler, not_found_handler, root_handler, user_agent_handler};
pub use files::{files_read_handler, files_write_handler};

/// Parte del path que sigue a `prefix`, o vacío si no lo contiene
pub(crate) fn path_suffix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or_default()
}
