use nexa_scheduler::{ErrorPolicy, LocalHost, NextTick, TaskError, TickContext};
use nexa_shared::{BrowserPlatform, Environment, Platform};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

fn scheduler_on(host: &LocalHost, policy: ErrorPolicy) -> NextTick {
    NextTick::builder()
        .host(&host.primitives())
        .environment(Environment::default())
        .error_policy(policy)
        .build()
}

#[test]
fn test_policy_follows_environment() {
    let host = LocalHost::new();
    let browser = NextTick::builder()
        .host(&host.primitives())
        .environment(BrowserPlatform::new("Mozilla/5.0 Chrome/120").environment())
        .build();
    let native = NextTick::builder()
        .host(&host.primitives())
        .environment(Environment::default())
        .build();

    assert_eq!(browser.error_policy(), ErrorPolicy::Log);
    assert_eq!(native.error_policy(), ErrorPolicy::Propagate);
}

#[test]
fn test_logged_failures_do_not_stop_the_batch() {
    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Log);
    let log = Rc::new(RefCell::new(Vec::new()));

    scheduler.next_tick(|| Err::<(), _>("first"));
    scheduler.next_tick(|| -> () {
        panic!("second");
    });
    {
        let log = log.clone();
        scheduler.next_tick(move || log.borrow_mut().push("third"));
    }

    host.run_until_idle();
    assert_eq!(*log.borrow(), vec!["third"]);

    // Later batches still run.
    {
        let log = log.clone();
        scheduler.next_tick(move || log.borrow_mut().push("fourth"));
    }
    host.run_until_idle();
    assert_eq!(*log.borrow(), vec!["third", "fourth"]);
}

#[test]
fn test_propagated_failure_raises_after_batch() {
    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Propagate);
    let log = Rc::new(RefCell::new(Vec::new()));

    scheduler.next_tick(|| -> () {
        panic!("assertion inside callback");
    });
    {
        let log = log.clone();
        scheduler.next_tick(move || log.borrow_mut().push("after"));
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| host.run_until_idle()));
    let payload = result.expect_err("failure should propagate");
    assert_eq!(
        payload.downcast_ref::<&str>(),
        Some(&"assertion inside callback")
    );

    // The rest of the batch ran and the scheduler is reusable.
    assert_eq!(*log.borrow(), vec!["after"]);
    assert!(!scheduler.is_pending());
    {
        let log = log.clone();
        scheduler.next_tick(move || log.borrow_mut().push("next"));
    }
    host.run_until_idle();
    assert_eq!(*log.borrow(), vec!["after", "next"]);
}

#[test]
fn test_propagated_error_value_mentions_origin() {
    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Propagate);

    scheduler.next_tick(|| Err::<(), _>(String::from("bad state")));

    let payload = panic::catch_unwind(AssertUnwindSafe(|| host.run_until_idle()))
        .expect_err("failure should propagate");
    let message = payload.downcast_ref::<String>().cloned().unwrap_or_default();
    assert_eq!(message, "Error in nextTick: bad state");
}

#[derive(Default)]
struct Component {
    errors: RefCell<Vec<String>>,
}

impl TickContext for Component {
    fn handle_error(&self, error: TaskError) -> Result<(), TaskError> {
        self.errors.borrow_mut().push(error.to_string());
        Ok(())
    }
}

#[test]
fn test_context_handler_sees_failure_first() {
    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Propagate);
    let component = Rc::new(Component::default());

    scheduler.next_tick_with(component.clone(), |_| Err::<(), _>("render failed"));
    scheduler.next_tick_with(component.clone(), |_| -> () {
        panic!("effect failed");
    });

    // Handled by the context, so nothing propagates.
    host.run_until_idle();

    assert_eq!(
        *component.errors.borrow(),
        vec![
            "render failed".to_owned(),
            "callback panicked: effect failed".to_owned()
        ]
    );
}

#[test]
fn test_context_without_handler_falls_through() {
    struct Plain;
    impl TickContext for Plain {}

    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Propagate);
    scheduler.next_tick_with(Plain, |_| Err::<(), _>("unhandled"));

    let result = panic::catch_unwind(AssertUnwindSafe(|| host.run_until_idle()));
    assert!(result.is_err());
}

#[test]
fn test_tick_fails_with_raised_batch() {
    use nexa_scheduler::SchedulerError;

    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Propagate);

    let mut before = scheduler.tick();
    scheduler.next_tick(|| Err::<(), _>("bad state"));
    let mut after = scheduler.tick_with("ctx");

    let result = panic::catch_unwind(AssertUnwindSafe(|| host.run_until_idle()));
    assert!(result.is_err());

    let failed = SchedulerError::Failed("bad state".to_owned());
    assert_eq!(before.try_take(), Err(failed.clone()));
    assert_eq!(after.try_take(), Err(failed));
    assert_eq!(
        SchedulerError::Failed("bad state".to_owned()).to_string(),
        "Error in nextTick: bad state"
    );

    // The next batch settles normally.
    let mut next = scheduler.tick();
    host.run_until_idle();
    assert_eq!(next.try_take(), Ok(Some(())));
}

#[test]
fn test_logged_failures_leave_ticks_settled() {
    let host = LocalHost::new();
    let scheduler = scheduler_on(&host, ErrorPolicy::Log);

    scheduler.next_tick(|| Err::<(), _>("logged"));
    let mut tick = scheduler.tick_with(7);

    host.run_until_idle();
    assert_eq!(tick.try_take(), Ok(Some(7)));
}
