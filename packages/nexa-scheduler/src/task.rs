use crate::error::{BoxError, SchedulerError, TaskError};
use futures::channel::oneshot;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// One deferred unit of work.
pub(crate) enum Task {
    /// A callback. Failures have already been offered to the callback's
    /// context by the time they come back out.
    Callback(Box<dyn FnOnce() -> Result<(), TaskError>>),
    /// A waiting [`Tick`], settled with the outcome of its whole batch.
    Waiter(Box<dyn FnOnce(Result<(), SchedulerError>)>),
}

/// Return types a deferred callback may have.
pub trait TaskResult {
    fn into_task_result(self) -> Result<(), TaskError>;
}

impl TaskResult for () {
    fn into_task_result(self) -> Result<(), TaskError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> TaskResult for Result<(), E> {
    fn into_task_result(self) -> Result<(), TaskError> {
        self.map_err(|e| TaskError::Failed(e.into()))
    }
}

/// Receiver a callback is scheduled against.
pub trait TickContext {
    /// Gets the first look at failures of callbacks scheduled with this
    /// context. Returning the error hands it to the scheduler's policy.
    fn handle_error(&self, error: TaskError) -> Result<(), TaskError> {
        Err(error)
    }
}

impl<T: TickContext + ?Sized> TickContext for Rc<T> {
    fn handle_error(&self, error: TaskError) -> Result<(), TaskError> {
        (**self).handle_error(error)
    }
}

impl TickContext for () {}

/// Runs a callback so that neither an `Err` nor a panic escapes it.
pub(crate) fn run_guarded<R, F>(callback: F) -> Result<(), TaskError>
where
    F: FnOnce() -> R,
    R: TaskResult,
{
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(result) => result.into_task_result(),
        Err(payload) => Err(TaskError::panicked(payload)),
    }
}

/// Completes with its context once the flush it was queued in has run.
#[must_use = "a Tick does nothing unless awaited"]
pub struct Tick<C> {
    rx: oneshot::Receiver<Result<C, SchedulerError>>,
}

impl<C: 'static> Tick<C> {
    pub(crate) fn channel(context: C) -> (Self, Task) {
        let (tx, rx) = oneshot::channel();
        let task = Task::Waiter(Box::new(move |outcome: Result<(), SchedulerError>| {
            // The handle may have been dropped; nobody is waiting then.
            let _ = tx.send(outcome.map(|()| context));
        }));
        (Self { rx }, task)
    }
}

impl<C> Tick<C> {
    /// The context, if the flush has already happened.
    pub fn try_take(&mut self) -> Result<Option<C>, SchedulerError> {
        match self.rx.try_recv() {
            Ok(Some(outcome)) => outcome.map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(SchedulerError::Dropped),
        }
    }
}

impl<C> Future for Tick<C> {
    type Output = Result<C, SchedulerError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| SchedulerError::Dropped).and_then(|outcome| outcome))
    }
}
