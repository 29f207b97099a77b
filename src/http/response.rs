//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.0
//! y escribirlas al socket. Todas las respuestas cierran la conexión.
//!
//! ## Formato de una respuesta
//!
//! Los headers se emiten siempre en este orden; los opcionales solo si
//! están presentes:
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Server: webserver/1.0\r\n
//! Date: Sun, 06 Nov 1994 08:49:37 GMT\r\n
//! [Location: /dir/\r\n]
//! [Content-Type: text/html\r\n]
//! Content-Length: 13\r\n
//! [Last-Modified: Sun, 06 Nov 1994 08:49:37 GMT\r\n]
//! Connection: close\r\n
//! \r\n
//! <body>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use webserver::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_content_type("text/html")
//!     .with_body("<h1>Hola</h1>");
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::date::http_date;
use super::StatusCode;
use std::io::{self, Write};
use std::time::SystemTime;

/// Valor del header `Server`
pub const SERVER_NAME: &str = "webserver/1.0";

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Destino de una redirección
    location: Option<String>,

    /// Tipo MIME del body; se omite si es desconocido
    content_type: Option<String>,

    /// Largo del body. Puede no coincidir con `body` cuando el contenido
    /// se transmite aparte (archivos)
    content_length: u64,

    /// Fecha de modificación del archivo servido
    last_modified: Option<SystemTime>,

    /// Cuerpo en memoria (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            location: None,
            content_type: None,
            content_length: 0,
            last_modified: None,
            body: Vec::new(),
        }
    }

    /// Respuesta de error con el body HTML fijo del código
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound);
    /// let body = String::from_utf8_lossy(response.body());
    /// assert!(body.contains("404 Not Found"));
    /// ```
    pub fn error(status: StatusCode) -> Self {
        let page = status.error_page().unwrap_or_default();
        Self::new(status)
            .with_content_type("text/html")
            .with_body(page)
    }

    /// Redirección 302 hacia `location`
    pub fn redirect(location: &str) -> Self {
        Self::new(StatusCode::Found).with_location(location)
    }

    /// Respuesta 200 con un documento HTML
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type("text/html")
            .with_body(body)
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Fija `Content-Length` sin body en memoria (el contenido se envía aparte)
    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = length;
        self
    }

    pub fn with_last_modified(mut self, modified: SystemTime) -> Self {
        self.last_modified = Some(modified);
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente actualiza `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.content_length = body.len() as u64;
        self.body = body;
        self
    }

    /// Headers en el orden en que se escriben, con `Date` = `now`
    pub fn headers_at(&self, now: SystemTime) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Server", SERVER_NAME.to_string()), ("Date", http_date(now))];

        if let Some(location) = &self.location {
            headers.push(("Location", location.clone()));
        }
        if let Some(content_type) = &self.content_type {
            headers.push(("Content-Type", content_type.clone()));
        }
        headers.push(("Content-Length", self.content_length.to_string()));
        if let Some(modified) = self.last_modified {
            headers.push(("Last-Modified", http_date(modified)));
        }
        headers.push(("Connection", "close".to_string()));

        headers
    }

    /// Status line y headers, terminados en `\r\n\r\n`
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.0 {}\r\n", self.status);
        for (name, value) in self.headers_at(SystemTime::now()) {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str("\r\n");
        head.into_bytes()
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Escribe head y body en `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn header_names(response: &Response) -> Vec<&'static str> {
        response
            .headers_at(SystemTime::now())
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_length(), 0);
        assert!(response.body().is_empty());
        assert_eq!(
            header_names(&response),
            vec!["Server", "Date", "Content-Length", "Connection"]
        );
    }

    #[test]
    fn test_header_order_with_all_fields() {
        let response = Response::new(StatusCode::Ok)
            .with_last_modified(UNIX_EPOCH)
            .with_content_length(10)
            .with_content_type("image/png")
            .with_location("/x/");

        assert_eq!(
            header_names(&response),
            vec!["Server", "Date", "Location", "Content-Type", "Content-Length", "Last-Modified", "Connection"]
        );
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.content_length(), 11);
    }

    #[test]
    fn test_error_response() {
        let response = Response::error(StatusCode::BadRequest);

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(String::from_utf8_lossy(&response.head_bytes()).contains("Content-Type: text/html\r\n"));

        let body_str = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(body_str.contains("400 Bad Request"));
        assert_eq!(response.content_length(), body_str.len() as u64);
    }

    #[test]
    fn test_redirect() {
        let response = Response::redirect("/docs/");
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.0 302 Found\r\n"));
        assert!(text.contains("Location: /docs/\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
        assert!(!text.contains("Content-Type"));
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::html("Test");

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Server: webserver/1.0\r\n"));
        assert!(text.contains("Date: "));
        assert!(text.contains("Content-Type: text/html\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("Connection: close\r\n\r\nTest"));
    }

    #[test]
    fn test_last_modified_header() {
        let modified = UNIX_EPOCH + Duration::from_secs(784_111_777);
        let response = Response::new(StatusCode::Ok).with_last_modified(modified);

        let text = String::from_utf8(response.head_bytes()).unwrap();
        assert!(text.contains("Last-Modified: Sun, 06 Nov 1994 08:49:37 GMT\r\n"));
    }

    #[test]
    fn test_streamed_length_without_body() {
        let response = Response::new(StatusCode::Ok).with_content_length(1024);
        let bytes = response.to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Content-Length: 1024\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_write_to() {
        let mut out = Vec::new();
        Response::error(StatusCode::NotFound).write_to(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert!(text.contains("File not found."));
    }
}
