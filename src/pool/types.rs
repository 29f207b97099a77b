//! # Tipos del Thread Pool
//! src/pool/types.rs
//!
//! Estados, errores y resultados de encolado.

use crate::pool::Job;
use serde::Serialize;
use std::fmt;
use std::io;

/// Máximo de workers por pool
pub const MAX_THREADS_IN_POOL: usize = 200;

/// Capacidad máxima de la cola de trabajos
pub const MAX_JOBS_IN_QUEUE: usize = 200;

/// Estado del pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolState {
    /// Acepta nuevos jobs
    Accepting,

    /// Shutdown iniciado: no acepta jobs, espera a que la cola se vacíe
    Draining,

    /// Cola vacía y workers avisados de que deben terminar
    Terminated,
}

/// Errores al crear el pool
#[derive(Debug)]
pub enum PoolError {
    /// Número de workers o capacidad fuera de rango
    InvalidConfiguration { workers: usize, capacity: usize },

    /// No se pudo crear un worker
    ResourceExhausted(io::Error),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidConfiguration { workers, capacity } => write!(
                f,
                "Invalid pool configuration: {} workers (1-{}), queue capacity {} (1-{})",
                workers, MAX_THREADS_IN_POOL, capacity, MAX_JOBS_IN_QUEUE
            ),
            PoolError::ResourceExhausted(e) => write!(f, "Failed to start worker: {}", e),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::ResourceExhausted(e) => Some(e),
            PoolError::InvalidConfiguration { .. } => None,
        }
    }
}

/// Motivo por el que un job no fue encolado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Cola llena (solo en `try_submit`)
    Full,

    /// El pool ya no acepta trabajos
    ShuttingDown,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Full => write!(f, "queue is full"),
            RejectReason::ShuttingDown => write!(f, "pool is shutting down"),
        }
    }
}

/// Resultado de encolar un job
///
/// Un job rechazado se devuelve al llamador, que decide qué hacer con sus
/// recursos (descartarlo libera el argumento).
#[must_use]
#[derive(Debug)]
pub enum Submission {
    Enqueued,
    Rejected { reason: RejectReason, job: Job },
}

impl Submission {
    pub fn is_enqueued(&self) -> bool {
        matches!(self, Submission::Enqueued)
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Submission::Enqueued => None,
            Submission::Rejected { reason, .. } => Some(*reason),
        }
    }
}

/// Contadores del pool, devueltos por `shutdown`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Jobs encolados con éxito
    pub submitted: u64,

    /// Jobs ejecutados hasta el final (incluye los que hicieron panic)
    pub executed: u64,

    /// Jobs cuyo handler hizo panic
    pub panicked: u64,

    /// Jobs rechazados (cola llena o shutdown)
    pub rejected: u64,
}
