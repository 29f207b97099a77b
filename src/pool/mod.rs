//! # Thread Pool con Cola Acotada
//! src/pool/mod.rs
//!
//! Un conjunto fijo de workers consume jobs desde una cola FIFO de
//! capacidad acotada. La cola se coordina con un mutex y tres condvars:
//!
//! - `not_full`: el productor espera mientras la cola está llena (backpressure)
//! - `not_empty`: los workers esperan mientras no hay trabajo
//! - `drained`: `shutdown` espera a que la cola quede vacía
//!
//! ## Ciclo de vida
//!
//! ```text
//! Accepting ──shutdown()──▶ Draining ──cola vacía──▶ Terminated ──join──▶ fin
//! ```
//!
//! Un pool se usa una sola vez: `new` → `submit`* → `shutdown`.

pub mod job;
pub mod queue;
pub mod thread_pool;
pub mod types;

pub use job::Job;
pub use queue::WorkQueue;
pub use thread_pool::ThreadPool;
pub use types::{
    PoolError, PoolState, PoolStats, RejectReason, Submission, MAX_JOBS_IN_QUEUE,
    MAX_THREADS_IN_POOL,
};
