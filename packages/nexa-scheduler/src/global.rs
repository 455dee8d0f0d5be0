//! Thread-wide default scheduler, for callers that do not carry a
//! [`NextTick`] around.

use crate::local::LocalHost;
use crate::scheduler::{MacroTask, NextTick};
use crate::task::{TaskResult, Tick};
use std::rc::Rc;

thread_local! {
    static HOST: LocalHost = LocalHost::new();
    static DEFAULT: NextTick = NextTick::new(&HOST.with(LocalHost::primitives));
}

/// This thread's event loop.
pub fn host() -> LocalHost {
    HOST.with(LocalHost::clone)
}

/// This thread's default scheduler, running on [`host`].
pub fn scheduler() -> NextTick {
    DEFAULT.with(NextTick::clone)
}

pub fn next_tick<F, R>(callback: F)
where
    F: FnOnce() -> R + 'static,
    R: TaskResult,
{
    DEFAULT.with(|s| s.next_tick(callback));
}

pub fn tick() -> Tick<()> {
    DEFAULT.with(NextTick::tick)
}

pub fn with_macro_task<F: 'static>(func: &Rc<F>) -> Rc<MacroTask<F>> {
    DEFAULT.with(|s| s.with_macro_task(func))
}

/// Drives this thread's event loop until it is idle.
pub fn run_until_idle() -> usize {
    host().run_until_idle()
}
