//! # Módulo HTTP
//!
//! Subconjunto de HTTP/1.1 implementado a mano:
//!
//! - Parsing de requests (request line, headers, body)
//! - Construcción y serialización de responses
//! - Códigos de estado
//!
//! No hay keep-alive, chunked encoding ni pipelining: una request y una
//! response por conexión.

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
