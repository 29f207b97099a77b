//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con argumentos
//! posicionales obligatorios y algunas opciones con variable de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./server <port> <pool-size> <max-queue-size> <max-number-of-requests>
//! ./server 8080 4 16 100 --root ./www
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_HOST=127.0.0.1 DOC_ROOT=/srv/www ./server 8080 4 16 100
//! ```

use crate::pool::{MAX_JOBS_IN_QUEUE, MAX_THREADS_IN_POOL};
use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "server")]
#[command(about = "Servidor HTTP/1.0 de archivos estáticos con thread pool acotado")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (1-65535)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Número de workers del pool
    #[arg(value_name = "POOL_SIZE")]
    pub pool_size: usize,

    /// Capacidad máxima de la cola de conexiones pendientes
    #[arg(value_name = "MAX_QUEUE_SIZE")]
    pub max_queue_size: usize,

    /// Conexiones a aceptar antes de apagar el servidor
    #[arg(value_name = "MAX_NUMBER_OF_REQUESTS")]
    pub max_requests: usize,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz desde el que se sirven los archivos
    #[arg(long, default_value = ".", env = "DOC_ROOT")]
    pub root: PathBuf,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// Si los argumentos son inválidos, clap imprime el uso y termina el
    /// proceso con código distinto de cero.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use webserver::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be 1-65535".to_string());
        }
        if !(1..=MAX_THREADS_IN_POOL).contains(&self.pool_size) {
            return Err(format!("Pool size must be 1-{}", MAX_THREADS_IN_POOL));
        }
        if !(1..=MAX_JOBS_IN_QUEUE).contains(&self.max_queue_size) {
            return Err(format!("Max queue size must be 1-{}", MAX_JOBS_IN_QUEUE));
        }
        if self.max_requests == 0 {
            return Err("Max number of requests must be >= 1".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║              webserver/1.0 Configuration                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Root:         {}", self.root.display());
        println!();
        println!("👷 Thread Pool:");
        println!("   Workers:      {}", self.pool_size);
        println!("   Queue cap:    {}", self.max_queue_size);
        println!("   Max requests: {}", self.max_requests);
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            pool_size: 4,
            max_queue_size: 16,
            max_requests: 100,
            host: "0.0.0.0".to_string(),
            root: PathBuf::from("."),
        }
    }
}
