//! Host timing primitives and the choice of deferral strategies.
//!
//! A host exposes a handful of "run this later" primitives. The scheduler
//! needs two of them: a fine-grained one that runs as soon as the current
//! synchronous work is done, and a coarse-grained one that runs after the
//! host has had a chance to process other queued work.

use crate::{Deferral, Job};
use nexa_shared::{Environment, is_native_source, noop};
use std::borrow::Cow;
use std::rc::Rc;

/// Source text of a message channel constructor on hosts that do not mark
/// it as native but implement it correctly.
pub const MESSAGE_CHANNEL_CONSTRUCTOR: &str = "[object MessageChannelConstructor]";

/// A host-provided way of running a job later.
pub trait Primitive {
    fn schedule(&self, job: Job);

    /// Source text of the primitive, used to tell built-ins from shims.
    fn source(&self) -> Cow<'_, str>;
}

/// The primitives a host offers. Only a timer is mandatory.
#[derive(Clone)]
pub struct HostPrimitives {
    pub promise: Option<Rc<dyn Primitive>>,
    pub set_immediate: Option<Rc<dyn Primitive>>,
    pub message_channel: Option<Rc<dyn Primitive>>,
    pub set_timeout: Rc<dyn Primitive>,
}

impl HostPrimitives {
    pub fn with_timer(set_timeout: Rc<dyn Primitive>) -> Self {
        Self {
            promise: None,
            set_immediate: None,
            message_channel: None,
            set_timeout,
        }
    }
}

fn is_builtin(primitive: &Rc<dyn Primitive>) -> bool {
    is_native_source(&primitive.source())
}

struct Direct(Rc<dyn Primitive>);

impl Deferral for Direct {
    fn defer(&self, job: Job) {
        self.0.schedule(job);
    }
}

/// Fine-grained deferral for hosts whose promise jobs can stall until some
/// unrelated timer fires: every scheduled flush also arms an empty timer.
struct Nudged {
    primary: Rc<dyn Primitive>,
    nudge: Rc<dyn Primitive>,
}

impl Deferral for Nudged {
    fn defer(&self, job: Job) {
        self.primary.schedule(job);
        self.nudge.schedule(Box::new(run_immediate_noop));
    }
}

/// Empty timer callback used to wake a stalled promise-job queue.
pub fn run_immediate_noop() {
    noop(());
}

/// The two deferral strategies a scheduler runs on.
#[derive(Clone)]
pub struct Deferrals {
    pub fine: Rc<dyn Deferral>,
    pub coarse: Rc<dyn Deferral>,
}

/// Picks the coarse-grained primitive: a built-in immediate callback, then a
/// built-in message channel, then the timer.
fn select_coarse(host: &HostPrimitives) -> (&'static str, Rc<dyn Primitive>) {
    if let Some(immediate) = host.set_immediate.as_ref().filter(|p| is_builtin(p)) {
        return ("set_immediate", Rc::clone(immediate));
    }
    let channel = host
        .message_channel
        .as_ref()
        .filter(|p| is_builtin(p) || p.source() == MESSAGE_CHANNEL_CONSTRUCTOR);
    if let Some(channel) = channel {
        return ("message_channel", Rc::clone(channel));
    }
    ("set_timeout", Rc::clone(&host.set_timeout))
}

/// Chooses fine- and coarse-grained deferrals for `host`.
///
/// The fine tier uses a built-in promise primitive when there is one (with a
/// timer nudge on iOS) and otherwise falls back to the coarse tier.
pub fn select(host: &HostPrimitives, env: &Environment) -> Deferrals {
    let (coarse_name, coarse) = select_coarse(host);
    let coarse: Rc<dyn Deferral> = Rc::new(Direct(coarse));

    let fine: Rc<dyn Deferral> = match host.promise.as_ref().filter(|p| is_builtin(p)) {
        Some(promise) if env.is_ios => Rc::new(Nudged {
            primary: Rc::clone(promise),
            nudge: Rc::clone(&host.set_timeout),
        }),
        Some(promise) => Rc::new(Direct(Rc::clone(promise))),
        None => {
            tracing::debug!("No native promise primitive, fine deferral falls back to {coarse_name}");
            Rc::clone(&coarse)
        }
    };

    tracing::debug!("Coarse deferral: {coarse_name}");
    Deferrals { fine, coarse }
}
