//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Cada worker registra aquí la conexión que acaba de atender: código de
//! estado, path pedido y cuánto tardó. El acceptor imprime el resumen al
//! terminar.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Ventana de latencias usada para los percentiles
const LATENCY_WINDOW: usize = 10_000;

/// Rutas incluidas en el ranking del snapshot
const TOP_PATHS: usize = 10;

/// Rutas distintas con contador propio; las demás suman en `OTHER_PATHS`
const MAX_TRACKED_PATHS: usize = 1_000;

/// Clave que agrupa las rutas que no entran en el mapa
pub const OTHER_PATHS: &str = "(other)";

/// Collector compartido entre el acceptor y los workers
#[derive(Clone)]
pub struct MetricsCollector {
    state: Arc<Mutex<Counters>>,
    started: Instant,
}

#[derive(Default)]
struct Counters {
    connections: u64,
    by_status: BTreeMap<u16, u64>,
    by_path: HashMap<String, u64>,
    window: VecDeque<Duration>,
}

/// Percentiles de latencia en milisegundos
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencySummary {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub avg: f64,
}

/// Conteo de accesos a una ruta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCount {
    pub path: String,
    pub count: u64,
}

/// Foto de las métricas en un instante
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub latency_ms: LatencySummary,
    pub top_paths: Vec<PathCount>,
    pub uptime_secs: u64,
}

impl MetricsSnapshot {
    /// Conexiones respondidas con 4xx o 5xx
    pub fn errors(&self) -> u64 {
        self.status_codes
            .iter()
            .filter(|(code, _)| **code >= 400)
            .map(|(_, count)| count)
            .sum()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Counters::default())),
            started: Instant::now(),
        }
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra una conexión atendida
    pub fn record_request(&self, path: &str, status_code: u16, latency: Duration) {
        let mut counters = self.counters();

        counters.connections += 1;
        *counters.by_status.entry(status_code).or_default() += 1;
        let key = if counters.by_path.contains_key(path) || counters.by_path.len() < MAX_TRACKED_PATHS {
            path
        } else {
            OTHER_PATHS
        };
        *counters.by_path.entry(key.to_owned()).or_default() += 1;

        if counters.window.len() == LATENCY_WINDOW {
            counters.window.pop_front();
        }
        counters.window.push_back(latency);
    }

    /// Conexiones registradas con un código dado
    pub fn count_for_status(&self, status_code: u16) -> u64 {
        self.counters().by_status.get(&status_code).copied().unwrap_or(0)
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        let counters = self.counters();

        let mut top_paths: Vec<PathCount> = counters
            .by_path
            .iter()
            .map(|(path, count)| PathCount {
                path: path.clone(),
                count: *count,
            })
            .collect();
        top_paths.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.path.cmp(&b.path)));
        top_paths.truncate(TOP_PATHS);

        MetricsSnapshot {
            total_requests: counters.connections,
            status_codes: counters.by_status.clone(),
            latency_ms: summarize(&counters.window),
            top_paths,
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }

    /// Snapshot en formato JSON
    pub fn snapshot_json(&self) -> serde_json::Value {
        serde_json::to_value(self.get_snapshot()).unwrap_or_default()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentiles por rango más cercano sobre la ventana
fn summarize(window: &VecDeque<Duration>) -> LatencySummary {
    if window.is_empty() {
        return LatencySummary::default();
    }

    let mut ms: Vec<f64> = window.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
    ms.sort_by(|a, b| a.total_cmp(b));

    let rank = |pct: usize| ms[(ms.len() * pct / 100).min(ms.len() - 1)];

    LatencySummary {
        p50: rank(50),
        p95: rank(95),
        p99: rank(99),
        avg: ms.iter().sum::<f64>() / ms.len() as f64,
    }
}
