//! # Web Server - Entry Point
//! src/main.rs
//!
//! Uso: `server <port> <pool-size> <max-queue-size> <max-number-of-requests>`

use webserver::config::Config;
use webserver::server::Server;

fn main() {
    println!("=================================");
    println!("  webserver/1.0");
    println!("  HTTP/1.0 static file server");
    println!("=================================\n");

    // clap termina el proceso si faltan argumentos o no son números
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuración inválida: {}", e);
        eprintln!("Uso: server <port> <pool-size> <max-queue-size> <max-number-of-requests>");
        std::process::exit(1);
    }

    config.print_summary();

    let mut server = Server::new(config);

    match server.run() {
        Ok(stats) => {
            println!(
                "\n👋 Servidor detenido: {} conexiones atendidas, {} rechazadas",
                stats.executed, stats.rejected
            );
        }
        Err(e) => {
            eprintln!("💥 Error fatal: {}", e);
            std::process::exit(1);
        }
    }
}
