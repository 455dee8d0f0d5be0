use crate::Job;
use crate::host::{HostPrimitives, Primitive};
use crate::queue::TaskQueue;
use std::borrow::Cow;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct EventLoop {
    microtasks: TaskQueue<Job>,
    macrotasks: TaskQueue<Job>,
}

#[derive(Clone, Copy)]
enum Tier {
    Micro,
    Macro,
}

struct LoopPrimitive {
    event_loop: Weak<EventLoop>,
    tier: Tier,
    source: &'static str,
}

impl Primitive for LoopPrimitive {
    fn schedule(&self, job: Job) {
        let Some(event_loop) = self.event_loop.upgrade() else {
            tracing::warn!("Job scheduled on a dropped LocalHost, discarding");
            return;
        };
        match self.tier {
            Tier::Micro => event_loop.microtasks.push(job),
            Tier::Macro => event_loop.macrotasks.push(job),
        }
    }

    fn source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.source)
    }
}

/// A single-threaded event loop driven by hand.
///
/// Each [`tick`](LocalHost::tick) drains the microtask queue, runs one
/// macrotask, then drains microtasks again, so a microtask queued during a
/// turn always runs before any macrotask queued in that turn.
#[derive(Clone, Default)]
pub struct LocalHost {
    event_loop: Rc<EventLoop>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_microtask(&self, job: Job) {
        self.event_loop.microtasks.push(job);
    }

    pub fn queue_macrotask(&self, job: Job) {
        self.event_loop.macrotasks.push(job);
    }

    /// Runs microtasks until none are left, including ones queued meanwhile.
    pub fn run_microtasks(&self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.event_loop.microtasks.pop() {
            job();
            ran += 1;
        }
        ran
    }

    /// Runs one turn of the loop. Returns whether work remains.
    pub fn tick(&self) -> bool {
        self.run_microtasks();
        if let Some(job) = self.event_loop.macrotasks.pop() {
            job();
            self.run_microtasks();
        }
        !self.is_idle()
    }

    /// Ticks until both queues are empty. Returns the number of turns taken.
    pub fn run_until_idle(&self) -> usize {
        let mut turns = 0;
        while !self.is_idle() {
            self.tick();
            turns += 1;
        }
        turns
    }

    pub fn is_idle(&self) -> bool {
        self.event_loop.microtasks.is_empty() && self.event_loop.macrotasks.is_empty()
    }

    pub fn pending_microtasks(&self) -> usize {
        self.event_loop.microtasks.len()
    }

    pub fn pending_macrotasks(&self) -> usize {
        self.event_loop.macrotasks.len()
    }

    fn primitive(&self, tier: Tier, source: &'static str) -> Rc<dyn Primitive> {
        Rc::new(LoopPrimitive {
            event_loop: Rc::downgrade(&self.event_loop),
            tier,
            source,
        })
    }

    /// Primitives backed by this loop: promise jobs on the microtask queue,
    /// a message channel and a timer on the macrotask queue.
    pub fn primitives(&self) -> HostPrimitives {
        HostPrimitives {
            promise: Some(self.primitive(Tier::Micro, "function Promise() { [native code] }")),
            set_immediate: None,
            message_channel: Some(self.primitive(
                Tier::Macro,
                "function MessageChannel() { [native code] }",
            )),
            set_timeout: self.primitive(Tier::Macro, "function setTimeout() { [native code] }"),
        }
    }
}
