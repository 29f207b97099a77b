//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores por código de estado y por ruta, más percentiles de latencia
//! de las conexiones atendidas por el pool.

pub mod collector;

pub use collector::{LatencySummary, MetricsCollector, MetricsSnapshot, PathCount};
