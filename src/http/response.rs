//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Las respuestas del servidor llevan siempre exactamente dos headers:
//! `Content-Type` y `Content-Length`. El largo se calcula del body real
//! al serializar, nunca se acepta desde afuera.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 2\r\n
//! \r\n
//! Ok
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use mini_http_server::http::{Response, StatusCode};
//!
//! let response = Response::text(StatusCode::Ok, "Ok");
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"Content-Length: 2\r\n\r\nOk"));
//! ```

use super::StatusCode;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Valor del header `Content-Type`
    content_type: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta `text/plain` sin body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            body: Vec::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para archivos binarios.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Respuesta `text/plain` con el mensaje dado
    pub fn text(status: StatusCode, message: &str) -> Self {
        Self::new(status).with_body(message)
    }

    /// 200 con contenido binario (`application/octet-stream`)
    pub fn octet_stream(body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type(OCTET_STREAM)
            .with_body_bytes(body)
    }

    /// 404 con body `Not Found`
    pub fn not_found() -> Self {
        Self::text(StatusCode::NotFound, "Not Found")
    }

    /// 400 con body `Bad Request`
    pub fn bad_request() -> Self {
        Self::text(StatusCode::BadRequest, "Bad Request")
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - `Content-Type` y `Content-Length`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
            self.status,
            self.content_type,
            self.body.len()
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Largo que se anunciará en `Content-Length`
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}
