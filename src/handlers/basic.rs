//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! - `/`: saludo fijo
//! - `/echo/{texto}`: devuelve el texto del path
//! - `/user-agent`: devuelve el header `User-Agent`
//! - cualquier otra ruta: 404

use super::path_suffix;
use crate::http::{Request, Response, StatusCode};
use crate::storage::Storage;

pub const ECHO_PREFIX: &str = "/echo/";

/// Handler para `/`
///
/// Siempre 200 con body `Ok`.
pub fn root_handler(_req: &Request, _storage: &dyn Storage) -> Response {
    Response::text(StatusCode::Ok, "Ok")
}

/// Handler para `/echo/{texto}`
///
/// El body es el resto del path después de `/echo/`, sin decodificar.
/// Un sufijo vacío produce un body vacío con 200.
pub fn echo_handler(req: &Request, _storage: &dyn Storage) -> Response {
    Response::text(StatusCode::Ok, path_suffix(req.path(), ECHO_PREFIX))
}

/// Handler para `/user-agent`
///
/// Sin header `User-Agent` responde 404 `Not Found`.
pub fn user_agent_handler(req: &Request, _storage: &dyn Storage) -> Response {
    match req.header("User-Agent") {
        Some(user_agent) => Response::text(StatusCode::Ok, user_agent),
        None => Response::not_found(),
    }
}

pub fn not_found_handler(_req: &Request, _storage: &dyn Storage) -> Response {
    Response::not_found()
}
