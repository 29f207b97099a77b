//! # Thread Pool
//! src/pool/thread_pool.rs
//!
//! Pool de tamaño fijo: `new` arranca todos los workers, `submit` encola
//! con backpressure y `shutdown` ejecuta el protocolo de cierre en dos fases:
//!
//! 1. Dejar de aceptar jobs y esperar a que la cola quede vacía (desencolada)
//! 2. Marcar `Terminated`, despertar a los workers y hacer join; el join
//!    espera a los handlers que aún estén corriendo

use crate::pool::queue::WorkQueue;
use crate::pool::types::{
    PoolError, PoolState, PoolStats, Submission, MAX_JOBS_IN_QUEUE, MAX_THREADS_IN_POOL,
};
use crate::pool::Job;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Contadores que actualizan los workers fuera del lock de la cola
#[derive(Default)]
struct Counters {
    executed: AtomicU64,
    panicked: AtomicU64,
}

/// Un worker: un thread ligado al pool durante toda su vida
struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(id: usize, queue: Arc<WorkQueue>, counters: Arc<Counters>) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name(format!("worker-{}", id))
            .spawn(move || Self::run(id, &queue, &counters))?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Loop principal del worker
    fn run(id: usize, queue: &WorkQueue, counters: &Counters) {
        while let Some(job) = queue.pop() {
            let seq = job.seq();

            // El handler maneja sus propios errores; un panic no debe
            // tumbar al worker ni al pool.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| job.run()));

            counters.executed.fetch_add(1, Ordering::SeqCst);
            if outcome.is_err() {
                counters.panicked.fetch_add(1, Ordering::SeqCst);
                eprintln!("   ❌ Worker {} job #{} panicked", id, seq);
            }
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                eprintln!("   ❌ Worker {} terminated abnormally", self.id);
            }
        }
    }
}

/// Pool de workers que consume una cola FIFO acotada
pub struct ThreadPool {
    queue: Arc<WorkQueue>,
    workers: Vec<Worker>,
    counters: Arc<Counters>,
}

impl ThreadPool {
    /// Crea el pool y arranca exactamente `worker_count` workers
    ///
    /// # Errores
    ///
    /// - `InvalidConfiguration` si `worker_count` no está en
    ///   `1..=MAX_THREADS_IN_POOL` o `queue_capacity` no está en
    ///   `1..=MAX_JOBS_IN_QUEUE`
    /// - `ResourceExhausted` si algún worker no puede arrancar; los
    ///   workers ya creados se detienen antes de retornar
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::pool::{Job, ThreadPool};
    ///
    /// let pool = ThreadPool::new(2, 8).unwrap();
    /// let _ = pool.submit(Job::from_fn(|| println!("hola desde un worker")));
    /// let stats = pool.shutdown();
    /// assert_eq!(stats.executed, 1);
    /// ```
    pub fn new(worker_count: usize, queue_capacity: usize) -> Result<Self, PoolError> {
        Self::with_spawner(worker_count, queue_capacity, Worker::spawn)
    }

    /// Igual que `new`, pero con la función que arranca cada worker inyectada
    fn with_spawner<F>(worker_count: usize, queue_capacity: usize, mut spawn: F) -> Result<Self, PoolError>
    where
        F: FnMut(usize, Arc<WorkQueue>, Arc<Counters>) -> io::Result<Worker>,
    {
        if !(1..=MAX_THREADS_IN_POOL).contains(&worker_count)
            || !(1..=MAX_JOBS_IN_QUEUE).contains(&queue_capacity)
        {
            return Err(PoolError::InvalidConfiguration {
                workers: worker_count,
                capacity: queue_capacity,
            });
        }

        let queue = Arc::new(WorkQueue::new(queue_capacity));
        let counters = Arc::new(Counters::default());
        let mut workers = Vec::with_capacity(worker_count);

        for id in 0..worker_count {
            match spawn(id, Arc::clone(&queue), Arc::clone(&counters)) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Rollback: ningún worker queda vivo si el pool no se crea
                    queue.terminate();
                    for worker in &mut workers {
                        worker.join();
                    }
                    return Err(PoolError::ResourceExhausted(e));
                }
            }
        }

        println!("🔧 Thread pool: {} workers, queue capacity {}", worker_count, queue_capacity);

        Ok(Self {
            queue,
            workers,
            counters,
        })
    }

    /// Encola un job, bloqueando mientras la cola esté llena
    ///
    /// Retorna `Rejected { reason: ShuttingDown, .. }` si el pool ya no
    /// acepta trabajos.
    pub fn submit(&self, job: Job) -> Submission {
        self.queue.push(job)
    }

    /// Encola un job sin bloquear; `Rejected { reason: Full, .. }` si no hay espacio
    pub fn try_submit(&self, job: Job) -> Submission {
        self.queue.try_push(job)
    }

    /// Atajo para encolar un closure
    pub fn execute<F>(&self, f: F) -> Submission
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Job::from_fn(f))
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Jobs esperando en la cola
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> PoolState {
        self.queue.state()
    }

    pub fn stats(&self) -> PoolStats {
        let (submitted, rejected) = self.queue.counters();
        PoolStats {
            submitted,
            executed: self.counters.executed.load(Ordering::SeqCst),
            panicked: self.counters.panicked.load(Ordering::SeqCst),
            rejected,
        }
    }

    /// Cierra el pool y espera a que todos los workers terminen
    ///
    /// Consume el pool: usarlo después de `shutdown` no compila.
    pub fn shutdown(mut self) -> PoolStats {
        self.shutdown_inner()
    }

    fn shutdown_inner(&mut self) -> PoolStats {
        if self.workers.is_empty() {
            return self.stats();
        }

        println!("🛑 Thread pool: shutdown ({} jobs in queue)", self.queue.len());
        self.queue.close();
        self.queue.wait_drained();

        self.queue.terminate();
        for worker in &mut self.workers {
            worker.join();
        }
        self.workers.clear();

        let stats = self.stats();
        println!(
            "🛑 Thread pool: all workers stopped ({} executed, {} panicked)",
            stats.executed, stats.panicked
        );
        stats
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
