//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 de archivos estáticos construido alrededor de un
//! thread pool acotado: un acceptor produce conexiones y un conjunto fijo
//! de workers las consume desde una cola FIFO con backpressure.
//!
//! ## Arquitectura
//!
//! - `pool`: cola de trabajos acotada y thread pool (Mutex + 3 Condvar)
//! - `http`: parsing de la request line y construcción de respuestas
//! - `files`: resolución de paths contra el directorio raíz
//! - `server`: acceptor y manejo de cada conexión
//! - `metrics`: contadores y latencias de las conexiones atendidas
//! - `config`: argumentos de línea de comandos
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use webserver::config::Config;
//! use webserver::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! let stats = server.run().expect("Error al iniciar servidor");
//! println!("{} conexiones atendidas", stats.executed);
//! ```

pub mod config;
pub mod files;
pub mod http;
pub mod metrics;
pub mod pool;
pub mod server;

#[cfg(test)]
mod test_support;
