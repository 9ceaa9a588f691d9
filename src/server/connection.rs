//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Pipeline secuencial de una conexión:
//!
//! ```text
//! read_request → Request::parse → Router::route → write_response
//! ```
//!
//! Solo bloquea en dos puntos: al leer el request y al escribir la
//! response. Los errores de transporte abortan la conexión sin response.

use crate::error::ConnectionError;
use crate::http::request::{find_header_end, HEADER_TERMINATOR};
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use crate::storage::Storage;
use std::io::{self, Read, Write};
use std::time::Instant;

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 1024;

/// Lee un request completo del stream
///
/// Lee hasta tener el bloque de headers. Si trae `Content-Length`, sigue
/// leyendo hasta completar el body anunciado. Termina antes si el peer
/// cierra. El buffer crece según lo recibido; superar `max_bytes` es error.
pub fn read_request<R: Read>(stream: &mut R, max_bytes: usize) -> Result<Vec<u8>, ConnectionError> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ConnectionError::Read(e)),
        };

        buffer.extend_from_slice(&chunk[..n]);

        if buffer.len() > max_bytes {
            return Err(ConnectionError::TooLarge { limit: max_bytes });
        }

        if is_complete(&buffer) {
            break;
        }
    }

    Ok(buffer)
}

/// Indica si el buffer ya tiene headers completos y el body anunciado
fn is_complete(buffer: &[u8]) -> bool {
    let Some(end) = find_header_end(buffer) else {
        return false;
    };

    let body_start = end + HEADER_TERMINATOR.len();
    let announced = Request::parse(&buffer[..body_start])
        .ok()
        .and_then(|request| request.content_length())
        .unwrap_or(0);

    buffer.len() - body_start >= announced
}

/// Serializa la response y la envía completa
pub fn write_response<W: Write>(stream: &mut W, response: &Response) -> Result<(), ConnectionError> {
    stream
        .write_all(&response.to_bytes())
        .and_then(|()| stream.flush())
        .map_err(ConnectionError::Write)
}

/// Atiende una conexión: un request, una response
///
/// Un request malformado recibe 400 antes de cerrar.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    router: &Router,
    storage: &dyn Storage,
    max_request_bytes: usize,
) -> Result<(), ConnectionError> {
    let start = Instant::now();

    let raw = read_request(stream, max_request_bytes)?;
    if raw.is_empty() {
        tracing::debug!("peer closed without sending a request");
        return Ok(());
    }

    tracing::debug!(bytes = raw.len(), "request received");

    let (response, method, path) = match Request::parse(&raw) {
        Ok(request) => {
            let response = router.route(&request, storage);
            (response, request.method().to_string(), request.path().to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "malformed request");
            (Response::bad_request(), "-".to_string(), "-".to_string())
        }
    };

    write_response(stream, &response)?;

    let status = response.status();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            class = status_class(status),
            bytes = response.content_length(),
            latency_ms,
            "request failed"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            class = status_class(status),
            bytes = response.content_length(),
            latency_ms,
            "request served"
        );
    }

    Ok(())
}

/// Clase del status para el access log
fn status_class(status: StatusCode) -> &'static str {
    if status.is_success() {
        "success"
    } else if status.is_client_error() {
        "client_error"
    } else if status.is_server_error() {
        "server_error"
    } else {
        "other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Stream en memoria: lee de `input` en trozos de `chunk` bytes
    struct MockStream {
        input: Cursor<Vec<u8>>,
        chunk: usize,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self::chunked(input, usize::MAX)
        }

        fn chunked(input: &[u8], chunk: usize) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                chunk,
                output: Vec::new(),
            }
        }

        fn output_text(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(self.chunk);
            self.input.read(&mut buf[..len])
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingStream;

    impl Read for FailingStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"))
        }
    }

    impl Write for FailingStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn setup() -> (TempDir, FileStorage, Router) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        (dir, storage, Router::with_default_routes())
    }

    #[test]
    fn test_read_request_stops_at_header_end() {
        let mut stream = MockStream::new(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
        let raw = read_request(&mut stream, 4096).unwrap();

        assert_eq!(raw, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
    }

    #[test]
    fn test_read_request_joins_partial_reads() {
        let mut stream = MockStream::chunked(b"GET /echo/abc HTTP/1.1\r\nUser-Agent: y\r\n\r\n", 3);
        let raw = read_request(&mut stream, 4096).unwrap();

        let request = Request::parse(&raw).unwrap();
        assert_eq!(request.path(), "/echo/abc");
        assert_eq!(request.header("user-agent"), Some("y"));
    }

    #[test]
    fn test_read_request_waits_for_announced_body() {
        let body = vec![b'z'; 5000];
        let mut input = format!("POST /files/big HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len())
            .into_bytes();
        input.extend_from_slice(&body);

        let mut stream = MockStream::chunked(&input, 700);
        let raw = read_request(&mut stream, 1 << 20).unwrap();

        assert_eq!(Request::parse(&raw).unwrap().body(), &body[..]);
    }

    #[test]
    fn test_read_request_without_terminator_reads_until_eof() {
        let mut stream = MockStream::new(b"GET / HTTP/1.1\r\n");
        let raw = read_request(&mut stream, 4096).unwrap();

        assert_eq!(raw, b"GET / HTTP/1.1\r\n");
    }

    #[test]
    fn test_read_request_too_large() {
        let input = vec![b'a'; 5000];
        let mut stream = MockStream::new(&input);

        let result = read_request(&mut stream, 2048);
        assert!(matches!(result, Err(ConnectionError::TooLarge { limit: 2048 })));
    }

    #[test]
    fn test_read_request_error() {
        let result = read_request(&mut FailingStream, 4096);
        assert!(matches!(result, Err(ConnectionError::Read(_))));
    }

    #[test]
    fn test_write_response_error() {
        let result = write_response(&mut FailingStream, &Response::not_found());
        assert!(matches!(result, Err(ConnectionError::Write(_))));
    }

    #[test]
    fn test_handle_connection_echo() {
        let (_dir, storage, router) = setup();
        let mut stream = MockStream::new(b"GET /echo/hello HTTP/1.1\r\n\r\n");

        handle_connection(&mut stream, &router, &storage, 4096).unwrap();

        assert_eq!(
            stream.output_text(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello"
        );
    }

    #[test]
    fn test_handle_connection_file_upload() {
        let (dir, storage, router) = setup();
        let mut stream =
            MockStream::chunked(b"POST /files/up.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello", 4);

        handle_connection(&mut stream, &router, &storage, 4096).unwrap();

        assert!(stream.output_text().starts_with("HTTP/1.1 201 Created\r\n"));
        assert_eq!(std::fs::read(dir.path().join("up.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(StatusCode::Ok), "success");
        assert_eq!(status_class(StatusCode::Created), "success");
        assert_eq!(status_class(StatusCode::BadRequest), "client_error");
        assert_eq!(status_class(StatusCode::NotFound), "client_error");
        assert_eq!(status_class(StatusCode::InternalServerError), "server_error");
    }

    #[test]
    fn test_handle_connection_non_utf8_path() {
        let (_dir, storage, router) = setup();
        let mut stream = MockStream::new(b"GET /echo/a\xFFb HTTP/1.1\r\n\r\n");

        handle_connection(&mut stream, &router, &storage, 4096).unwrap();

        assert!(stream.output_text().starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(stream.output.ends_with(b"\r\n\r\nBad Request"));
    }

    #[test]
    fn test_handle_connection_malformed_request() {
        let (_dir, storage, router) = setup();
        let mut stream = MockStream::new(b"\x00\x01\x02\x03garbage\r\n\r\n");

        handle_connection(&mut stream, &router, &storage, 4096).unwrap();

        assert_eq!(
            stream.output_text(),
            "HTTP/1.1 400 Bad Request\r\nContent-Type: text/plain\r\nContent-Length: 11\r\n\r\nBad Request"
        );
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let (_dir, storage, router) = setup();
        let mut stream = MockStream::new(b"");

        handle_connection(&mut stream, &router, &storage, 4096).unwrap();
        assert!(stream.output.is_empty());
    }

    #[test]
    fn test_handle_connection_read_failure_sends_nothing() {
        let (_dir, storage, router) = setup();

        let result = handle_connection(&mut FailingStream, &router, &storage, 4096);
        assert!(matches!(result, Err(ConnectionError::Read(_))));
    }
}
