//! Deferred callback scheduling ("nextTick").
//!
//! Callbacks registered during one synchronous turn are coalesced into a
//! single flush, deferred with a fine-grained (microtask-like) primitive by
//! default or a coarse-grained (macrotask-like) one inside functions wrapped
//! with [`NextTick::with_macro_task`].

pub mod error;
pub mod global;
pub mod host;
pub mod local;
pub mod queue;
pub mod scheduler;
pub mod task;
#[cfg(feature = "tokio")]
pub mod tokio_host;

pub type Job = Box<dyn FnOnce()>;

/// A strategy for running a job once the current synchronous work has
/// finished. The scheduler is built on two of these.
pub trait Deferral {
    fn defer(&self, job: Job);
}

impl<F: Fn(Job)> Deferral for F {
    fn defer(&self, job: Job) {
        self(job)
    }
}

pub use error::{BoxError, ErrorPolicy, SchedulerError, TaskError};
pub use global::{next_tick, run_until_idle, with_macro_task};
pub use host::{Deferrals, HostPrimitives, Primitive, run_immediate_noop};
pub use local::LocalHost;
pub use scheduler::{MacroTask, NextTick, SchedulerBuilder};
pub use task::{TaskResult, Tick, TickContext};
#[cfg(feature = "tokio")]
pub use tokio_host::TokioHost;
