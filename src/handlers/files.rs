//! # Handlers de Archivos
//! src/handlers/files.rs
//!
//! `GET /files/{nombre}` lee del storage y `POST /files/{nombre}` escribe
//! el body del request. Un error del storage es terminal para el request:
//! no hay reintentos.

use super::path_suffix;
use crate::http::{Request, Response, StatusCode};
use crate::storage::{Storage, StorageError};

pub const FILES_PREFIX: &str = "/files/";

/// Handler para `GET /files/{nombre}`
///
/// 200 `application/octet-stream` con los bytes exactos del archivo.
/// Cualquier fallo al leer se reporta como 404.
pub fn files_read_handler(req: &Request, storage: &dyn Storage) -> Response {
    let filename = path_suffix(req.path(), FILES_PREFIX);

    match storage.read(filename) {
        Ok(contents) => Response::octet_stream(contents),
        Err(StorageError::NotFound(_)) => Response::not_found(),
        Err(e) => {
            tracing::warn!(filename, error = %e, "failed to read file");
            Response::not_found()
        }
    }
}

/// Handler para `POST /files/{nombre}`
///
/// 201 si se escribió el archivo, 500 ante cualquier error.
pub fn files_write_handler(req: &Request, storage: &dyn Storage) -> Response {
    let filename = path_suffix(req.path(), FILES_PREFIX);

    match storage.write(filename, req.body()) {
        Ok(()) => {
            tracing::debug!(filename, bytes = req.body().len(), "file written");
            Response::text(StatusCode::Created, "File created successfully")
        }
        Err(e) => {
            tracing::warn!(filename, error = %e, "failed to write file");
            Response::text(StatusCode::InternalServerError, "Failed to open file for writing")
        }
    }
}
