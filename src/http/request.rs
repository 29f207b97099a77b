//! # Lectura y Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo lee la primera línea del request:
//!
//! ```text
//! GET /path HTTP/1.0\r\n
//! ```
//!
//! Los headers que envíe el cliente nunca se parsean; la conexión se cierra
//! después de la respuesta.
//!
//! ## Validación (en este orden)
//!
//! 1. Exactamente 3 tokens separados por espacios → si no, 400
//! 2. Versión `HTTP/1.0` o `HTTP/1.1` → si no, 400
//! 3. Método `GET` → si no, 501

use super::StatusCode;
use std::io::{self, Read};

/// Largo máximo de la request line (incluye el `\r\n`)
pub const MAX_REQUEST_LINE: usize = 4000;

/// Versión HTTP del request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Version::Http10),
            "HTTP/1.1" => Some(Version::Http11),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// Request GET válido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Path tal como llegó (ej: "/docs/index.html")
    path: String,

    version: Version,
}

/// Errores que pueden ocurrir leyendo o parseando la request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Se superó `MAX_REQUEST_LINE` sin ver `\r\n`
    RequestTooLong,

    /// EOF antes de `\r\n`
    ConnectionClosed,

    /// Error de lectura del socket
    Io(io::ErrorKind),

    /// Bytes que no son UTF-8 válido
    InvalidEncoding,

    /// La línea no tiene exactamente 3 tokens
    InvalidRequestLine,

    /// Versión distinta de HTTP/1.0 y HTTP/1.1
    InvalidHttpVersion(String),

    /// Método distinto de GET
    UnsupportedMethod(String),
}

impl ParseError {
    /// Código de estado con el que se responde a este error
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::RequestTooLong | ParseError::ConnectionClosed | ParseError::Io(_) => {
                StatusCode::InternalServerError
            }
            ParseError::InvalidEncoding
            | ParseError::InvalidRequestLine
            | ParseError::InvalidHttpVersion(_) => StatusCode::BadRequest,
            ParseError::UnsupportedMethod(_) => StatusCode::NotImplemented,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::RequestTooLong => {
                write!(f, "Request line exceeds {} bytes", MAX_REQUEST_LINE)
            }
            ParseError::ConnectionClosed => write!(f, "Connection closed before end of request line"),
            ParseError::Io(kind) => write!(f, "Read error: {:?}", kind),
            ParseError::InvalidEncoding => write!(f, "Request line is not valid UTF-8"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
        }
    }
}

impl std::error::Error for ParseError {}

/// Lee bytes hasta encontrar `\r\n`
///
/// Lee de a un byte para no consumir nada más allá de la request line.
/// Retorna la línea sin el `\r\n` final.
pub fn read_request_line<R: Read>(reader: &mut R) -> Result<String, ParseError> {
    let mut line = Vec::with_capacity(256);
    let mut byte = [0u8; 1];

    while line.len() < MAX_REQUEST_LINE {
        match reader.read(&mut byte) {
            Ok(0) => return Err(ParseError::ConnectionClosed),
            Ok(_) => {
                line.push(byte[0]);
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                    return String::from_utf8(line).map_err(|_| ParseError::InvalidEncoding);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ParseError::Io(e.kind())),
        }
    }

    Err(ParseError::RequestTooLong)
}

impl Request {
    /// Parsea una request line (sin `\r\n`)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use webserver::http::Request;
    ///
    /// let request = Request::parse("GET /index.html HTTP/1.1").unwrap();
    /// assert_eq!(request.path(), "/index.html");
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        let [method, path, version] = parts[..] else {
            return Err(ParseError::InvalidRequestLine);
        };

        let version = Version::from_str(version)
            .ok_or_else(|| ParseError::InvalidHttpVersion(version.to_string()))?;

        if method != "GET" {
            return Err(ParseError::UnsupportedMethod(method.to_string()));
        }

        Ok(Request {
            path: path.to_string(),
            version,
        })
    }

    /// Lee y parsea la request line desde un stream
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, ParseError> {
        let line = read_request_line(reader)?;
        Self::parse(&line)
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> Version {
        self.version
    }
}
