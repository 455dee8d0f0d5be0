use crate::error::{ErrorPolicy, SchedulerError};
use crate::global;
use crate::host::{self, Deferrals, HostPrimitives};
use crate::queue::TaskQueue;
use crate::task::{Task, TaskResult, Tick, TickContext, run_guarded};
use crate::Deferral;
use nexa_shared::{Environment, env};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

const INFO: &str = "nextTick";

struct Inner {
    /// A flush has been armed and has not started yet.
    pending: Cell<bool>,
    /// Set while a `with_macro_task` wrapper runs.
    use_macro_task: Cell<bool>,
    queue: TaskQueue<Task>,
    deferrals: Deferrals,
    policy: ErrorPolicy,
    flushes: Cell<u64>,
    wrappers: RefCell<FxHashMap<usize, Weak<dyn Any>>>,
}

impl Inner {
    fn flush(&self) {
        self.pending.set(false);
        let tasks = self.queue.take_all();
        self.flushes.set(self.flushes.get() + 1);
        tracing::trace!("Flushing {} deferred callbacks", tasks.len());

        let mut raised = None;
        let mut waiters = Vec::new();
        for task in tasks {
            let run = match task {
                Task::Waiter(settle) => {
                    waiters.push(settle);
                    continue;
                }
                Task::Callback(run) => run,
            };
            let Err(error) = run() else { continue };
            match self.policy {
                ErrorPolicy::Propagate if raised.is_none() => raised = Some(error),
                _ => tracing::error!("Error in {}: {}", INFO, error),
            }
        }

        // Waiters hear about a raised failure even when the raise itself
        // lands somewhere nobody observes, e.g. a detached host task.
        let outcome = match &raised {
            Some(error) => Err(SchedulerError::Failed(error.to_string())),
            None => Ok(()),
        };
        for settle in waiters {
            settle(outcome.clone());
        }

        if let Some(error) = raised {
            error.raise(INFO);
        }
    }
}

/// Coalesces callbacks registered during one synchronous turn into a single
/// deferred flush.
///
/// Cloning gives another handle to the same queue.
#[derive(Clone)]
pub struct NextTick {
    inner: Rc<Inner>,
}

impl Default for NextTick {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl NextTick {
    pub fn new(host: &HostPrimitives) -> Self {
        Self::builder().host(host).build()
    }

    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::default()
    }

    fn enqueue(&self, task: Task) {
        self.inner.queue.push(task);
        if self.inner.pending.replace(true) {
            return;
        }

        let inner = Rc::clone(&self.inner);
        let flush = Box::new(move || inner.flush());
        if self.inner.use_macro_task.get() {
            self.inner.deferrals.coarse.defer(flush);
        } else {
            self.inner.deferrals.fine.defer(flush);
        }
    }

    /// Runs `callback` in the next flush.
    pub fn next_tick<F, R>(&self, callback: F)
    where
        F: FnOnce() -> R + 'static,
        R: TaskResult,
    {
        self.enqueue(Task::Callback(Box::new(move || run_guarded(callback))));
    }

    /// Runs `callback` against `context` in the next flush. Failures go to
    /// the context's handler first.
    pub fn next_tick_with<C, F, R>(&self, context: C, callback: F)
    where
        C: TickContext + 'static,
        F: FnOnce(&C) -> R + 'static,
        R: TaskResult,
    {
        self.enqueue(Task::Callback(Box::new(move || {
            run_guarded(|| callback(&context)).or_else(|error| context.handle_error(error))
        })));
    }

    /// A future that completes once the next flush has run. It fails with
    /// [`SchedulerError::Failed`] when that flush re-raises a callback
    /// failure.
    pub fn tick(&self) -> Tick<()> {
        self.tick_with(())
    }

    /// A future that completes with `context` once the next flush has run.
    pub fn tick_with<C: 'static>(&self, context: C) -> Tick<C> {
        let (tick, task) = Tick::channel(context);
        self.enqueue(task);
        tick
    }

    /// Wrap a function so that callbacks it schedules are deferred with the
    /// coarse-grained primitive.
    ///
    /// Wrappers are memoized per function: the same `Rc` yields the same
    /// wrapper for as long as that wrapper is alive.
    pub fn with_macro_task<F: 'static>(&self, func: &Rc<F>) -> Rc<MacroTask<F>> {
        let key = Rc::as_ptr(func) as *const () as usize;
        let mut wrappers = self.inner.wrappers.borrow_mut();

        let existing = wrappers
            .get(&key)
            .and_then(Weak::upgrade)
            .and_then(|any| any.downcast::<MacroTask<F>>().ok());
        if let Some(wrapper) = existing {
            return wrapper;
        }

        wrappers.retain(|_, w| w.strong_count() > 0);
        let wrapper = Rc::new(MacroTask {
            func: Rc::clone(func),
            scheduler: self.clone(),
        });
        let erased: Rc<dyn Any> = wrapper.clone();
        wrappers.insert(key, Rc::downgrade(&erased));
        wrapper
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }

    /// Whether scheduling right now would use the coarse-grained primitive.
    pub fn is_macro_task(&self) -> bool {
        self.inner.use_macro_task.get()
    }

    /// Callbacks waiting for the next flush.
    pub fn queued(&self) -> usize {
        self.inner.queue.len()
    }

    /// Number of flushes run so far.
    pub fn flushes(&self) -> u64 {
        self.inner.flushes.get()
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.inner.policy
    }
}

/// Restores the macrotask flag when a wrapped call returns or unwinds.
struct MacroGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> MacroGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for MacroGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// A function wrapped by [`NextTick::with_macro_task`].
pub struct MacroTask<F> {
    func: Rc<F>,
    scheduler: NextTick,
}

impl<F> MacroTask<F> {
    /// Calls the function with `args` in macrotask mode.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        self.run(|func| func(args))
    }

    /// Hands the function to `invoke` in macrotask mode, for any arity.
    pub fn run<R>(&self, invoke: impl FnOnce(&F) -> R) -> R {
        let _guard = MacroGuard::enter(&self.scheduler.inner.use_macro_task);
        invoke(&self.func)
    }

    pub fn func(&self) -> &Rc<F> {
        &self.func
    }
}

/// Configures a [`NextTick`].
///
/// Without a host or explicit deferrals the scheduler runs on this thread's
/// [`LocalHost`](crate::LocalHost). The environment defaults to the process
/// environment, the error policy to the one the environment calls for.
#[derive(Default)]
pub struct SchedulerBuilder {
    host: Option<HostPrimitives>,
    deferrals: Option<Deferrals>,
    env: Option<Environment>,
    policy: Option<ErrorPolicy>,
}

impl SchedulerBuilder {
    pub fn host(mut self, host: &HostPrimitives) -> Self {
        self.host = Some(host.clone());
        self
    }

    /// Injects the two deferral strategies directly, bypassing primitive
    /// selection.
    pub fn deferrals(
        mut self,
        fine: impl Deferral + 'static,
        coarse: impl Deferral + 'static,
    ) -> Self {
        self.deferrals = Some(Deferrals {
            fine: Rc::new(fine),
            coarse: Rc::new(coarse),
        });
        self
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> NextTick {
        let env = self.env.unwrap_or_else(|| env::current().clone());
        let policy = self
            .policy
            .unwrap_or_else(|| ErrorPolicy::for_environment(&env));
        let deferrals = match (self.deferrals, self.host) {
            (Some(deferrals), _) => deferrals,
            (None, Some(host)) => host::select(&host, &env),
            (None, None) => host::select(&global::host().primitives(), &env),
        };

        NextTick {
            inner: Rc::new(Inner {
                pending: Cell::new(false),
                use_macro_task: Cell::new(false),
                queue: TaskQueue::new(),
                deferrals,
                policy,
                flushes: Cell::new(0),
                wrappers: RefCell::new(FxHashMap::default()),
            }),
        }
    }
}
