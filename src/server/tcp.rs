//! # Acceptor del Servidor
//! src/server/tcp.rs
//!
//! Un único thread acepta conexiones y las encola en el thread pool. Después
//! de aceptar `max_requests` conexiones cierra el socket de escucha y apaga
//! el pool, esperando a que se atiendan todas las conexiones encoladas.

use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::pool::{Job, PoolError, PoolStats, Submission, ThreadPool};
use crate::server::connection;
use std::fmt;
use std::io;
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;

/// Errores fatales del servidor
#[derive(Debug)]
pub enum ServerError {
    /// No se pudo abrir el socket de escucha
    Bind(io::Error),

    /// No se pudo crear el thread pool
    Pool(PoolError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind(e) => write!(f, "Cannot bind listening socket: {}", e),
            ServerError::Pool(e) => write!(f, "Cannot start thread pool: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind(e) => Some(e),
            ServerError::Pool(e) => Some(e),
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(e: io::Error) -> Self {
        ServerError::Bind(e)
    }
}

impl From<PoolError> for ServerError {
    fn from(e: PoolError) -> Self {
        ServerError::Pool(e)
    }
}

/// Servidor HTTP/1.0 de archivos: acceptor + thread pool
pub struct Server {
    config: Config,
    metrics: MetricsCollector,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            metrics: MetricsCollector::new(),
        }
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Abre el socket en `config.address()` y atiende hasta completar
    /// `max_requests` conexiones
    pub fn run(&mut self) -> Result<PoolStats, ServerError> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);

        self.serve(listener)
    }

    /// Loop del acceptor sobre un listener ya abierto
    ///
    /// Solo los `accept` exitosos cuentan para `max_requests`. Retorna las
    /// estadísticas del pool cuando el apagado terminó.
    pub fn serve(&mut self, listener: TcpListener) -> Result<PoolStats, ServerError> {
        let pool = ThreadPool::new(self.config.pool_size, self.config.max_queue_size)?;
        let root: Arc<PathBuf> = Arc::new(self.config.root.clone());
        let max_requests = self.config.max_requests;

        println!(
            "[*] Modo pool: {} workers, cola de {}, {} conexiones\n",
            pool.worker_count(),
            pool.capacity(),
            max_requests
        );

        let mut accepted = 0;
        while accepted < max_requests {
            let (stream, peer) = match listener.accept() {
                Ok(conn) => conn,
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                    continue;
                }
            };
            accepted += 1;
            println!(" ✅ Conexión {}/{} desde: {}", accepted, max_requests, peer);

            let root = Arc::clone(&root);
            let metrics = self.metrics.clone();
            let job = Job::new(
                move |stream: TcpStream| connection::serve_connection(stream, &root, &metrics),
                stream,
            );

            if let Submission::Rejected { reason, job } = pool.submit(job) {
                // Soltar el job cierra el socket
                eprintln!("   ❌ Conexión {} rechazada: {}", peer, reason);
                drop(job);
            }
        }

        drop(listener);
        println!("\n[*] {} conexiones aceptadas, apagando el pool", accepted);

        let stats = pool.shutdown();
        self.print_summary(&stats);
        Ok(stats)
    }

    fn print_summary(&self, stats: &PoolStats) {
        println!();
        println!("📊 Resumen:");
        let mut summary = self.metrics.snapshot_json();
        summary["pool"] = serde_json::to_value(stats).unwrap_or_default();
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("   ❌ Cannot render metrics: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempRoot;
    use std::io::{Read, Write};
    use std::thread;

    fn config_for(root: &TempRoot, pool_size: usize, max_queue_size: usize, max_requests: usize) -> Config {
        Config {
            port: 1,
            pool_size,
            max_queue_size,
            max_requests,
            host: "127.0.0.1".to_string(),
            root: root.path().to_path_buf(),
        }
    }

    fn get(addr: std::net::SocketAddr, raw: &[u8]) -> String {
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn test_server_error_display() {
        let err = ServerError::from(io::Error::new(io::ErrorKind::AddrInUse, "in use"));
        assert!(err.to_string().contains("bind"));

        let err = ServerError::from(PoolError::InvalidConfiguration { workers: 0, capacity: 1 });
        assert!(err.to_string().contains("thread pool"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serve_invalid_pool_fails_before_accepting() {
        let root = TempRoot::new("tcp_invalid");
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut server = Server::new(config_for(&root, 0, 4, 1));

        match server.serve(listener) {
            Err(ServerError::Pool(PoolError::InvalidConfiguration { workers: 0, .. })) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_serve_stops_after_max_requests() {
        let root = TempRoot::new("tcp_max");
        root.write("a.html", "<p>a</p>");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let mut server = Server::new(config_for(&root, 2, 4, 3));

        let handle = thread::spawn(move || {
            let stats = server.serve(listener);
            (stats, server.metrics().get_snapshot().total_requests)
        });

        for _ in 0..3 {
            let text = get(addr, b"GET /a.html HTTP/1.0\r\n\r\n");
            assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
            assert!(text.ends_with("<p>a</p>"));
        }

        let (stats, total) = handle.join().unwrap();
        let stats = stats.unwrap();
        assert_eq!(stats.submitted, 3);
        assert_eq!(stats.executed, 3);
        assert_eq!(stats.rejected, 0);
        assert_eq!(total, 3);

        // El listener quedó cerrado
        assert!(TcpStream::connect(addr).is_err());
    }

    #[test]
    fn test_serve_queued_connections_are_drained() {
        let root = TempRoot::new("tcp_drain");
        root.mkdir("dir");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let mut server = Server::new(config_for(&root, 1, 8, 5));

        // Las conexiones se abren antes de que se escriba nada: quedan en cola
        let clients: Vec<TcpStream> = (0..5).map(|_| TcpStream::connect(addr).unwrap()).collect();
        let handle = thread::spawn(move || server.serve(listener));

        for mut client in clients {
            client.write_all(b"GET /dir HTTP/1.1\r\n").unwrap();
            let mut buf = Vec::new();
            client.read_to_end(&mut buf).unwrap();
            let text = String::from_utf8_lossy(&buf);
            assert!(text.starts_with("HTTP/1.0 302 Found\r\n"));
            assert!(text.contains("Location: /dir/\r\n"));
        }

        let stats = handle.join().unwrap().unwrap();
        assert_eq!(stats.submitted, 5);
        assert_eq!(stats.executed, 5);
    }
}
