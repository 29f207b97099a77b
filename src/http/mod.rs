//! # Módulo HTTP
//!
//! Este módulo implementa lo mínimo del protocolo HTTP/1.0 que necesita un
//! servidor de archivos estáticos. Incluye:
//!
//! - Lectura y parsing de la request line
//! - Construcción de responses con headers en orden fijo
//! - Manejo de status codes y sus páginas de error
//! - Tipos MIME por extensión y fechas RFC 1123
//!
//! ## Protocolo HTTP/1.0
//!
//! El protocolo HTTP/1.0 (RFC 1945) es más simple que HTTP/1.1:
//! - No requiere el header `Host`
//! - No tiene chunked transfer encoding
//! - No mantiene conexiones persistentes por defecto
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.0\r\n
//! ```
//!
//! Se aceptan `HTTP/1.0` y `HTTP/1.1` en el request, pero siempre se
//! responde con `HTTP/1.0` y `Connection: close`.

pub mod date;      // Fechas para Date y Last-Modified
pub mod mime;      // Tabla de tipos MIME
pub mod request;   // Lectura y parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{ParseError, Request, Version, MAX_REQUEST_LINE};
pub use response::{Response, SERVER_NAME};
pub use status::StatusCode;
