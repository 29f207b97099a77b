//! # Cola de Trabajos Acotada
//! src/pool/queue.rs
//!
//! Cola FIFO thread-safe con capacidad fija. Un único mutex protege los
//! jobs, el estado y los contadores; se sostiene solo para operaciones
//! O(1) y nunca mientras se ejecuta un handler.

use crate::pool::types::{PoolState, RejectReason, Submission};
use crate::pool::Job;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Estado protegido por el mutex
struct QueueState {
    jobs: VecDeque<Job>,
    state: PoolState,
    next_seq: u64,
    submitted: u64,
    rejected: u64,
}

/// Cola FIFO acotada con backpressure
pub struct WorkQueue {
    inner: Mutex<QueueState>,

    /// Señalada al desencolar: hay espacio para el productor
    not_full: Condvar,

    /// Señalada al encolar o al terminar: hay trabajo para un worker
    not_empty: Condvar,

    /// Señalada cuando la cola queda vacía
    drained: Condvar,

    /// Capacidad máxima (fija)
    capacity: usize,
}

impl WorkQueue {
    /// Crea una cola vacía en estado `Accepting`
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(QueueState {
                jobs: VecDeque::with_capacity(capacity),
                state: PoolState::Accepting,
                next_seq: 1,
                submitted: 0,
                rejected: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            drained: Condvar::new(),
            capacity,
        }
    }

    // Ningún handler corre con el lock tomado, así que un guard envenenado
    // sigue siendo consistente.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola un job, bloqueando mientras la cola esté llena
    ///
    /// Si el pool deja de aceptar trabajos mientras el productor espera,
    /// el job se devuelve con `RejectReason::ShuttingDown`.
    pub fn push(&self, job: Job) -> Submission {
        let mut inner = self.lock();

        loop {
            if inner.state != PoolState::Accepting {
                inner.rejected += 1;
                return Submission::Rejected {
                    reason: RejectReason::ShuttingDown,
                    job,
                };
            }
            if inner.jobs.len() < self.capacity {
                break;
            }
            inner = self.not_full.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }

        self.enqueue(&mut inner, job);
        Submission::Enqueued
    }

    /// Intenta encolar sin bloquear
    pub fn try_push(&self, job: Job) -> Submission {
        let mut inner = self.lock();

        let reason = if inner.state != PoolState::Accepting {
            RejectReason::ShuttingDown
        } else if inner.jobs.len() >= self.capacity {
            RejectReason::Full
        } else {
            self.enqueue(&mut inner, job);
            return Submission::Enqueued;
        };

        inner.rejected += 1;
        Submission::Rejected { reason, job }
    }

    fn enqueue(&self, inner: &mut QueueState, mut job: Job) {
        job.assign_seq(inner.next_seq);
        inner.next_seq += 1;
        inner.submitted += 1;
        inner.jobs.push_back(job);
        self.not_empty.notify_one();
    }

    /// Desencola el job más antiguo, bloqueando mientras no haya trabajo
    ///
    /// Retorna `None` cuando la cola está vacía y el pool terminó: el
    /// worker debe salir de su loop.
    pub fn pop(&self) -> Option<Job> {
        let mut inner = self.lock();

        loop {
            if let Some(job) = inner.jobs.pop_front() {
                if inner.jobs.is_empty() {
                    self.drained.notify_all();
                }
                self.not_full.notify_one();
                return Some(job);
            }
            if inner.state == PoolState::Terminated {
                return None;
            }
            inner = self.not_empty.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Deja de aceptar jobs (`Accepting` → `Draining`)
    ///
    /// Despierta a los productores bloqueados para que reciban su rechazo.
    pub fn close(&self) {
        let mut inner = self.lock();
        if inner.state == PoolState::Accepting {
            inner.state = PoolState::Draining;
        }
        self.not_full.notify_all();
    }

    /// Bloquea hasta que todos los jobs encolados hayan sido desencolados
    ///
    /// "Vacía" significa desencolada, no terminada: los handlers pueden
    /// seguir ejecutándose cuando esto retorna.
    pub fn wait_drained(&self) {
        let mut inner = self.lock();
        while !inner.jobs.is_empty() {
            inner = self.drained.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marca el pool como terminado y despierta a todos los workers
    pub fn terminate(&self) {
        let mut inner = self.lock();
        inner.state = PoolState::Terminated;
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Número de jobs en cola
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> PoolState {
        self.lock().state
    }

    /// (encolados, rechazados) desde la creación
    pub fn counters(&self) -> (u64, u64) {
        let inner = self.lock();
        (inner.submitted, inner.rejected)
    }
}
