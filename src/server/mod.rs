//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. Escucha en un puerto (`tcp`)
//! 2. Acepta conexiones entrantes, un thread por conexión (`tcp`)
//! 3. Lee y parsea el request (`connection`)
//! 4. Genera y envía la response, luego cierra (`connection`)

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::handle_connection;
pub use tcp::Server;
