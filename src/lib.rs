//! # Mini HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo: acepta conexiones TCP, parsea un request por
//! conexión, lo despacha a un handler y responde antes de cerrar.
//!
//! ## Arquitectura
//!
//! ```text
//! conexión → read_request → Request::parse → Router → handler → Response::to_bytes → conexión
//! ```
//!
//! - `http`: Parsing de requests y serialización de responses
//! - `router`: Tabla ordenada de rutas (primera coincidencia gana)
//! - `handlers`: `/`, `/echo/`, `/user-agent`, `/files/`
//! - `storage`: Colaborador de archivos bajo el directorio configurado
//! - `server`: Listener TCP y manejo de cada conexión
//! - `config`: Argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use mini_http_server::config::Config;
//! use mini_http_server::server::Server;
//!
//! let config = Config::with_directory("/tmp");
//! config.validate().expect("invalid configuration");
//! Server::new(config).run().expect("server failed");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
pub mod storage;
