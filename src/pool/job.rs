//! # Jobs
//! src/pool/job.rs
//!
//! Un job es un handler ligado a un único argumento. El argumento se mueve
//! dentro del job: pasa del productor a la cola y de la cola al worker que
//! lo desencola, sin que dos dueños lo tengan al mismo tiempo.

use std::fmt;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Unidad de trabajo opaca que ejecuta un worker
pub struct Job {
    /// Número de secuencia asignado al encolar (0 = aún no encolado)
    seq: u64,

    /// Handler con su argumento ya capturado
    task: Task,
}

impl Job {
    /// Crea un job a partir de un handler y su argumento
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::pool::Job;
    ///
    /// let job = Job::new(|n: u32| println!("procesando {}", n), 7);
    /// assert_eq!(job.seq(), 0);
    /// ```
    pub fn new<T, F>(handler: F, arg: T) -> Self
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        Self::from_fn(move || handler(arg))
    }

    /// Crea un job desde un closure sin argumento explícito
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            seq: 0,
            task: Box::new(f),
        }
    }

    /// Número de secuencia en la cola (orden de llegada)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn assign_seq(&mut self, seq: u64) {
        self.seq = seq;
    }

    /// Ejecuta el handler consumiendo el job
    pub(crate) fn run(self) {
        (self.task)()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").field("seq", &self.seq).finish_non_exhaustive()
    }
}
