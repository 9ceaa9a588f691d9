//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser de requests escrito como funciones puras: primero se separa el
//! bloque de headers del body, luego el bloque se parte en líneas y cada
//! línea en nombre/valor. No hay cursor compartido entre etapas.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/report.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.64\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION` (la versión es opcional y no se valida)
//! 2. **Headers**: Pares `Name: Value`; las líneas sin `:` se ignoran
//! 3. **Empty Line**: `\r\n\r\n` marca el fin de los headers
//! 4. **Body**: todos los bytes recibidos después del terminador

use std::fmt;
use thiserror::Error;

/// Secuencia que separa los headers del body
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Método HTTP de la request line
///
/// Solo GET y POST tienen significado para el router; cualquier otro token
/// se conserva tal cual para que las rutas "cualquier método" lo acepten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro token (PUT, DELETE, HEAD, ...)
    Other(String),
}

impl Method {
    /// Construye el método desde el token de la request line
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing (MalformedRequest)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No llegó ninguna request line
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene método y path válidos
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST, ...)
    method: Method,

    /// Path tal cual llegó, sin decodificar ni quitar query string
    path: String,

    /// Versión HTTP si venía en la request line
    version: Option<String>,

    /// Headers en orden de llegada; puede haber nombres repetidos
    headers: Vec<(String, String)>,

    /// Bytes después de `\r\n\r\n`
    body: Vec<u8>,
}

/// Busca el inicio del terminador `\r\n\r\n` en el buffer
pub fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}

impl Request {
    /// Parsea un request desde los bytes recibidos
    ///
    /// El body no se valida contra `Content-Length`: se toma lo que haya
    /// después del terminador.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use mini_http_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nuser-agent: curl/7.64\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl/7.64"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, body) = match find_header_end(buffer) {
            Some(end) => (&buffer[..end], &buffer[end + HEADER_TERMINATOR.len()..]),
            None => (buffer, &[][..]),
        };

        let (line_bytes, header_bytes) = match head.iter().position(|&b| b == b'\n') {
            Some(newline) => (&head[..newline], &head[newline + 1..]),
            None => (head, &[][..]),
        };
        let line_bytes = line_bytes.strip_suffix(&b"\r"[..]).unwrap_or(line_bytes);

        // El path se usa tal cual: no se reescriben bytes inválidos
        let request_line = std::str::from_utf8(line_bytes).map_err(|_| {
            ParseError::InvalidRequestLine(String::from_utf8_lossy(line_bytes).into_owned())
        })?;

        if request_line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (method, path, version) = Self::parse_request_line(request_line)?;

        let header_text = String::from_utf8_lossy(header_bytes);
        let headers = Self::parse_headers(header_text.lines());

        Ok(Request {
            method,
            path,
            version,
            headers,
            body: body.to_vec(),
        })
    }

    /// Parsea la request line
    ///
    /// Los tokens se separan por espacios; los espacios repetidos no
    /// generan tokens vacíos.
    fn parse_request_line(line: &str) -> Result<(Method, String, Option<String>), ParseError> {
        let mut tokens = line.split(' ').filter(|token| !token.is_empty());

        match (tokens.next(), tokens.next()) {
            (Some(method), Some(path)) if path.starts_with('/') => Ok((
                Method::from_token(method),
                path.to_string(),
                tokens.next().map(str::to_string),
            )),
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }

    /// Parsea los headers (best-effort)
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        for line in lines {
            if line.is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
                _ => tracing::debug!(line, "skipping malformed header line"),
            }
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header sin distinguir mayúsculas en el nombre
    ///
    /// Si el nombre está repetido gana la primera aparición.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header_name, _)| header_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Valor de `Content-Length` si existe y es un número válido
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")?.parse().ok()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
