use nexa_shared::Environment;
use std::any::Any;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single deferred callback.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0}")]
    Failed(#[source] BoxError),

    #[error("callback panicked: {message}")]
    Panicked {
        message: String,
        payload: Box<dyn Any + Send>,
    },
}

impl TaskError {
    pub(crate) fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        TaskError::Panicked { message, payload }
    }

    /// Re-raise the failure on the current thread. Panics resume with their
    /// original payload.
    pub fn raise(self, info: &str) -> ! {
        match self {
            TaskError::Panicked { payload, .. } => std::panic::resume_unwind(payload),
            other => panic!("Error in {info}: {other}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler dropped before the flush ran")]
    Dropped,

    /// A callback in the same batch failed and nothing handled it.
    #[error("Error in nextTick: {0}")]
    Failed(String),
}

/// What the scheduler does with callback failures no context handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report through `tracing` and carry on.
    Log,
    /// Finish the batch, then re-raise the first failure.
    Propagate,
}

impl ErrorPolicy {
    /// Browser-like hosts log, everything else (test harnesses, CLIs) fails
    /// loudly.
    pub fn for_environment(env: &Environment) -> Self {
        if env.reports_errors() {
            ErrorPolicy::Log
        } else {
            ErrorPolicy::Propagate
        }
    }
}
