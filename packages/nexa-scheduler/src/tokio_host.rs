use crate::Job;
use crate::host::{HostPrimitives, Primitive};
use std::borrow::Cow;
use std::rc::Rc;

struct SpawnLocal;

impl Primitive for SpawnLocal {
    fn schedule(&self, job: Job) {
        tokio::task::spawn_local(async move { job() });
    }

    fn source(&self) -> Cow<'_, str> {
        Cow::Borrowed("function spawn_local() { [native code] }")
    }
}

/// Runs the job after yielding once, so work spawned meanwhile goes first.
struct YieldThenRun;

impl Primitive for YieldThenRun {
    fn schedule(&self, job: Job) {
        tokio::task::spawn_local(async move {
            tokio::task::yield_now().await;
            job();
        });
    }

    fn source(&self) -> Cow<'_, str> {
        Cow::Borrowed("function yield_now() { [native code] }")
    }
}

/// Primitives for a tokio [`LocalSet`](tokio::task::LocalSet).
///
/// Scheduling through them outside a `LocalSet` panics, as
/// `spawn_local` does.
pub struct TokioHost;

impl TokioHost {
    pub fn primitives() -> HostPrimitives {
        HostPrimitives {
            promise: Some(Rc::new(SpawnLocal)),
            set_immediate: Some(Rc::new(YieldThenRun)),
            message_channel: None,
            set_timeout: Rc::new(YieldThenRun),
        }
    }
}
