//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Cada job del pool atiende exactamente una conexión:
//!
//! 1. Lee la request line (hasta `\r\n` o `MAX_REQUEST_LINE` bytes)
//! 2. Valida y resuelve el path contra el directorio raíz
//! 3. Escribe una única respuesta
//! 4. Cierra el socket
//!
//! Ningún error sale de aquí: todo se convierte en una respuesta HTTP.

use crate::files::{self, FileTarget};
use crate::http::mime::mime_type_for;
use crate::http::{Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use std::fs::{File, Metadata};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::path::Path;
use std::time::{Duration, Instant};

/// Tiempo total máximo esperando al cliente tras enviar la respuesta
const LINGER_TIMEOUT: Duration = Duration::from_millis(200);

/// Máximo de bytes sin leer que se descartan antes de cerrar
const LINGER_MAX_BYTES: usize = 64 * 1024;

/// Resultado de atender una conexión
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,

    /// Path pedido, o "-" si la request line no se pudo parsear
    pub path: String,
}

/// Lee un request de `stream` y escribe la respuesta
///
/// Es genérico sobre el stream para poder probarlo sin sockets. Los
/// errores de escritura se ignoran: el cliente pudo haberse ido.
pub fn respond<S: Read + Write>(stream: &mut S, root: &Path) -> Outcome {
    let request = match Request::read_from(stream) {
        Ok(request) => request,
        Err(e) => {
            println!("   ❌ Parse error: {}", e);
            let status = e.status();
            send(stream, &Response::error(status));
            return Outcome {
                status,
                path: "-".to_string(),
            };
        }
    };

    let path = request.path().to_string();
    println!("   ✅ GET {} {}", path, request.version().as_str());
    let status = match files::resolve(root, &path) {
        FileTarget::NotFound => send(stream, &Response::error(StatusCode::NotFound)),
        FileTarget::Forbidden => send(stream, &Response::error(StatusCode::Forbidden)),
        FileTarget::Redirect { location } => send(stream, &Response::redirect(&location)),
        FileTarget::Listing { dir } => match files::render_listing(&dir, &path) {
            Ok(html) => send(stream, &Response::html(&html)),
            Err(e) => {
                eprintln!("   ❌ Cannot list {}: {}", dir.display(), e);
                send(stream, &Response::error(StatusCode::InternalServerError))
            }
        },
        FileTarget::File { path: file_path, metadata } => send_file(stream, &file_path, &metadata),
    };

    Outcome { status, path }
}

/// Escribe una respuesta completa y retorna su código
fn send<W: Write>(stream: &mut W, response: &Response) -> StatusCode {
    if let Err(e) = response.write_to(stream) {
        eprintln!("   ❌ Write error: {}", e);
    }
    response.status()
}

/// Transmite un archivo regular: head primero, contenido después
fn send_file<W: Write>(stream: &mut W, path: &Path, metadata: &Metadata) -> StatusCode {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return send(stream, &Response::error(StatusCode::Forbidden)),
    };

    let mut response = Response::new(StatusCode::Ok).with_content_length(metadata.len());
    if let Some(mime) = mime_type_for(path) {
        response = response.with_content_type(mime);
    }
    if let Ok(modified) = metadata.modified() {
        response = response.with_last_modified(modified);
    }

    if let Err(e) = stream_file(stream, &response, file) {
        eprintln!("   ❌ Error sending {}: {}", path.display(), e);
    }

    StatusCode::Ok
}

/// Nunca envía más bytes que el `Content-Length` ya anunciado
fn stream_file<W: Write>(stream: &mut W, response: &Response, file: File) -> io::Result<()> {
    stream.write_all(&response.head_bytes())?;
    io::copy(&mut file.take(response.content_length()), stream)?;
    stream.flush()
}

/// Atiende una conexión TCP de principio a fin y la cierra
///
/// Es el handler que el acceptor encola en el pool.
pub fn serve_connection(mut stream: TcpStream, root: &Path, metrics: &MetricsCollector) {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let outcome = respond(&mut stream, root);
    close_gracefully(stream);

    let latency = start.elapsed();
    metrics.record_request(&outcome.path, outcome.status.as_u16(), latency);
    let marker = if outcome.status.is_server_error() {
        "❌"
    } else if outcome.status.is_client_error() {
        "⚠️ "
    } else {
        "✅"
    };
    println!(
        "   {} {} {} → {} ({:.2}ms)",
        marker,
        peer,
        outcome.path,
        outcome.status,
        latency.as_secs_f64() * 1000.0
    );
}

/// Cierra la escritura y descarta lo que el cliente dejó sin leer
///
/// Cerrar un socket con datos pendientes de lectura (headers que nunca se
/// parsean) envía un RST que puede destruir la respuesta en el cliente.
fn close_gracefully(mut stream: TcpStream) {
    let _ = stream.flush();
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }

    let deadline = Instant::now() + LINGER_TIMEOUT;
    let mut buffer = [0u8; 4096];
    let mut drained = 0;
    while drained < LINGER_MAX_BYTES {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || stream.set_read_timeout(Some(remaining)).is_err() {
            break;
        }
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => break,
            Ok(n) => drained += n,
        }
    }
}
