//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo une el thread pool con el protocolo:
//! 1. El acceptor (`tcp`) escucha en un puerto y acepta conexiones
//! 2. Cada conexión se encola como un job en el pool
//! 3. Un worker la atiende (`connection`): lee el request, responde y cierra

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{respond, serve_connection, Outcome};
pub use tcp::{Server, ServerError};
