//! # Mini HTTP Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el servidor.
//! Cualquier error de arranque termina el proceso con código 1.

use mini_http_server::config::Config;
use mini_http_server::error::ServerError;
use mini_http_server::logging;
use mini_http_server::server::Server;

fn main() {
    // Falta de --directory: clap imprime el uso y sale con código 2
    let config = Config::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        tracing::error!(error = %e, "fatal startup error");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), ServerError> {
    config.validate()?;
    config.log_summary();

    Server::new(config).run()
}
