//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Lista ordenada de rutas evaluada contra `(método, path)`: gana la
//! primera que coincide. El path se compara tal cual llegó, sin
//! decodificar ni quitar la query string.
//!
//! ## Tabla por defecto
//!
//! ```text
//! 1. exacto  /            cualquiera  → root
//! 2. prefijo /echo/       cualquiera  → echo
//! 3. prefijo /files/      GET         → files (lectura)
//! 4. prefijo /files/      POST        → files (escritura)
//! 5. prefijo /user-agent  cualquiera  → user-agent
//! 6. sin coincidencia                 → 404
//! ```

use crate::handlers;
use crate::http::{Method, Request, Response};
use crate::storage::Storage;

/// Tipo de función handler
///
/// Un handler recibe el Request y el storage y retorna una Response
pub type Handler = fn(&Request, &dyn Storage) -> Response;

/// Patrón de path de una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// El path debe ser idéntico
    Exact(String),

    /// El path debe empezar con el prefijo
    Prefix(String),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(expected) => path == expected.as_str(),
            PathPattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// Ruta: patrón + método aceptado (`None` = cualquiera) + handler
#[derive(Clone)]
pub struct Route {
    pattern: PathPattern,
    method: Option<Method>,
    handler: Handler,
}

impl Route {
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().map_or(true, |expected| expected == method)
            && self.pattern.matches(path)
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }
}

/// Router que mapea (método, path) a handlers
#[derive(Clone)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Handler,
}

impl Router {
    /// Crea un router vacío; todo request termina en 404
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: handlers::not_found_handler,
        }
    }

    /// Router con la tabla de rutas del servidor
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();

        router.register(PathPattern::Exact("/".into()), None, handlers::root_handler);
        router.register(PathPattern::Prefix("/echo/".into()), None, handlers::echo_handler);
        router.register(
            PathPattern::Prefix("/files/".into()),
            Some(Method::GET),
            handlers::files_read_handler,
        );
        router.register(
            PathPattern::Prefix("/files/".into()),
            Some(Method::POST),
            handlers::files_write_handler,
        );
        router.register(
            PathPattern::Prefix("/user-agent".into()),
            None,
            handlers::user_agent_handler,
        );

        router
    }

    /// Registra una ruta al final de la lista (menor prioridad)
    pub fn register(&mut self, pattern: PathPattern, method: Option<Method>, handler: Handler) {
        self.routes.push(Route {
            pattern,
            method,
            handler,
        });
    }

    /// Primera ruta que coincide con `(method, path)`
    pub fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(method, path))
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si ninguna ruta coincide se usa el handler 404.
    pub fn route(&self, request: &Request, storage: &dyn Storage) -> Response {
        let handler = self
            .find(request.method(), request.path())
            .map_or(self.fallback, Route::handler);

        handler(request, storage)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use crate::storage::FileStorage;
    use tempfile::TempDir;

    fn dispatch(router: &Router, raw: &str) -> Response {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a"), b"file-a").unwrap();
        let storage = FileStorage::new(dir.path());

        router.route(&Request::parse(raw.as_bytes()).unwrap(), &storage)
    }

    #[test]
    fn test_router_creation() {
        assert!(Router::new().is_empty());
        assert_eq!(Router::with_default_routes().len(), 5);
    }

    #[test]
    fn test_default_router_is_empty() {
        assert!(Router::default().is_empty());

        let response = dispatch(&Router::default(), "GET / HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_path_pattern() {
        let exact = PathPattern::Exact("/".into());
        assert!(exact.matches("/"));
        assert!(!exact.matches("/x"));

        let prefix = PathPattern::Prefix("/echo/".into());
        assert!(prefix.matches("/echo/"));
        assert!(prefix.matches("/echo/abc"));
        assert!(!prefix.matches("/echo"));
    }

    #[test]
    fn test_find_uses_method_filter() {
        let router = Router::with_default_routes();

        assert!(router.find(&Method::GET, "/files/a").is_some());
        assert!(router.find(&Method::POST, "/files/a").is_some());
        assert!(router.find(&Method::Other("PUT".into()), "/files/a").is_none());
    }

    #[test]
    fn test_root_any_method() {
        let router = Router::with_default_routes();

        assert_eq!(dispatch(&router, "GET / HTTP/1.1\r\n\r\n").body(), b"Ok");
        assert_eq!(dispatch(&router, "PUT / HTTP/1.1\r\n\r\n").body(), b"Ok");
    }

    #[test]
    fn test_root_is_exact() {
        let router = Router::with_default_routes();
        let response = dispatch(&router, "GET /index.html HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_echo_any_method() {
        let router = Router::with_default_routes();
        let response = dispatch(&router, "POST /echo/hey HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hey");
    }

    #[test]
    fn test_echo_without_trailing_slash_is_not_found() {
        let router = Router::with_default_routes();
        let response = dispatch(&router, "GET /echo HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_files_by_method() {
        let router = Router::with_default_routes();

        let read = dispatch(&router, "GET /files/a HTTP/1.1\r\n\r\n");
        assert_eq!(read.status(), StatusCode::Ok);
        assert_eq!(read.body(), b"file-a");

        let write = dispatch(&router, "POST /files/b HTTP/1.1\r\n\r\nnew");
        assert_eq!(write.status(), StatusCode::Created);

        let other = dispatch(&router, "DELETE /files/a HTTP/1.1\r\n\r\n");
        assert_eq!(other.status(), StatusCode::NotFound);
        assert_eq!(other.body(), b"Not Found");
    }

    #[test]
    fn test_user_agent_is_a_prefix_match() {
        let router = Router::with_default_routes();
        let response = dispatch(&router, "GET /user-agentXYZ HTTP/1.1\r\nUser-Agent: ua\r\n\r\n");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"ua");
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = Router::new();
        router.register(PathPattern::Prefix("/".into()), None, handlers::root_handler);
        router.register(PathPattern::Prefix("/echo/".into()), None, handlers::echo_handler);

        assert_eq!(dispatch(&router, "GET /echo/x HTTP/1.1\r\n\r\n").body(), b"Ok");
    }

    #[test]
    fn test_empty_router_is_not_found() {
        let response = dispatch(&Router::new(), "GET / HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"Not Found");
    }
}
