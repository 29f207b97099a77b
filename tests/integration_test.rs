//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta el acceptor real sobre 127.0.0.1:0 en un thread, le
//! habla con clientes TCP crudos y verifica que el servidor termine solo
//! después de `max_requests` conexiones.

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use webserver::config::Config;
use webserver::pool::PoolStats;
use webserver::server::{Server, ServerError};

/// Directorio raíz temporal, borrado al final del test
struct DocRoot(PathBuf);

impl DocRoot {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("webserver-it-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        DocRoot(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for DocRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Arranca el servidor en un puerto efímero
fn start_server(root: &Path, pool_size: usize, max_requests: usize) -> (SocketAddr, JoinHandle<Result<PoolStats, ServerError>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let config = Config {
        port: addr.port(),
        pool_size,
        max_queue_size: 16,
        max_requests,
        host: "127.0.0.1".to_string(),
        root: root.to_path_buf(),
    };

    let handle = thread::spawn(move || Server::new(config).serve(listener));
    (addr, handle)
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    String::from_utf8_lossy(&response).to_string()
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{}: ", name);
    response
        .split("\r\n")
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}

#[test]
fn test_missing_file_returns_404() {
    let root = DocRoot::new("missing");
    let (addr, handle) = start_server(root.path(), 2, 1);

    let response = send_raw(addr, b"GET /missing.txt HTTP/1.1\r\n\r\n");
    assert!(response.starts_with("HTTP/1.0 404 Not Found\r\n"), "got: {}", response);
    assert!(extract_body(&response).contains("404 Not Found"));
    assert_eq!(header(&response, "Connection"), Some("close"));

    let stats = handle.join().unwrap().unwrap();
    assert_eq!(stats.submitted, 1);
}

#[test]
fn test_root_listing_without_index() {
    let root = DocRoot::new("listing");
    fs::write(root.path().join("one.txt"), "1").unwrap();
    fs::write(root.path().join("two.css"), "p{}").unwrap();
    fs::create_dir(root.path().join("nested")).unwrap();
    let (addr, handle) = start_server(root.path(), 2, 1);

    let response = send_raw(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert_eq!(header(&response, "Content-Type"), Some("text/html"));

    let body = extract_body(&response);
    for name in ["one.txt", "two.css", "nested"] {
        assert!(body.contains(&format!("<li><a href=\"/{}\">{}</a></li>", name, name)), "{}", body);
    }
    assert!(!body.contains("\">.</a>"));
    assert!(!body.contains("\">..</a>"));
    assert_eq!(header(&response, "Content-Length"), Some(body.len().to_string().as_str()));

    handle.join().unwrap().unwrap();
}

#[test]
fn test_directory_without_slash_redirects() {
    let root = DocRoot::new("redirect");
    fs::create_dir(root.path().join("dir")).unwrap();
    let (addr, handle) = start_server(root.path(), 1, 1);

    let response = send_raw(addr, b"GET /dir HTTP/1.1\r\n\r\n");
    assert!(response.starts_with("HTTP/1.0 302 Found\r\n"));
    assert_eq!(header(&response, "Location"), Some("/dir/"));

    handle.join().unwrap().unwrap();
}

#[test]
fn test_request_line_too_long_returns_500() {
    let root = DocRoot::new("toolong");
    let (addr, handle) = start_server(root.path(), 1, 1);

    let mut raw = b"GET /".to_vec();
    raw.extend(std::iter::repeat(b'a').take(5000));
    let response = send_raw(addr, &raw);
    assert!(response.starts_with("HTTP/1.0 500 Internal Server Error\r\n"), "got: {}", response);

    handle.join().unwrap().unwrap();
}

#[test]
fn test_post_not_supported() {
    let root = DocRoot::new("post");
    let (addr, handle) = start_server(root.path(), 1, 1);

    let response = send_raw(addr, b"POST / HTTP/1.1\r\n\r\n");
    assert!(response.starts_with("HTTP/1.0 501 Not Supported\r\n"));

    handle.join().unwrap().unwrap();
}

#[test]
fn test_file_served_with_headers() {
    let root = DocRoot::new("file");
    fs::write(root.path().join("index.html"), "<h1>Hola</h1>").unwrap();
    let (addr, handle) = start_server(root.path(), 2, 2);

    for raw in [&b"GET / HTTP/1.0\r\n\r\n"[..], b"GET /index.html HTTP/1.1\r\n\r\n"] {
        let response = send_raw(addr, raw);
        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
        assert_eq!(header(&response, "Server"), Some("webserver/1.0"));
        assert_eq!(header(&response, "Content-Type"), Some("text/html"));
        assert_eq!(header(&response, "Content-Length"), Some("13"));
        assert!(header(&response, "Date").unwrap().ends_with(" GMT"));
        assert!(header(&response, "Last-Modified").is_some());
        assert_eq!(extract_body(&response), "<h1>Hola</h1>");
    }

    handle.join().unwrap().unwrap();
}

#[test]
fn test_server_terminates_after_max_requests() {
    let root = DocRoot::new("terminate");
    fs::write(root.path().join("a.html"), "a").unwrap();
    let (addr, handle) = start_server(root.path(), 4, 8);

    let clients: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let raw = if i % 2 == 0 { &b"GET /a.html HTTP/1.0\r\n\r\n"[..] } else { b"GET /nope HTTP/1.0\r\n\r\n" };
                send_raw(addr, raw)
            })
        })
        .collect();

    let mut ok = 0;
    let mut not_found = 0;
    for client in clients {
        let response = client.join().unwrap();
        if response.starts_with("HTTP/1.0 200 OK") {
            ok += 1;
        } else if response.starts_with("HTTP/1.0 404 Not Found") {
            not_found += 1;
        }
    }
    assert_eq!((ok, not_found), (4, 4));

    let stats = handle.join().unwrap().unwrap();
    assert_eq!(stats.submitted, 8);
    assert_eq!(stats.executed, 8);
    assert_eq!(stats.panicked, 0);
    assert_eq!(stats.rejected, 0);
}
