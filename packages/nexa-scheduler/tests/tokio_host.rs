#![cfg(feature = "tokio")]

use nexa_scheduler::{ErrorPolicy, NextTick, SchedulerError, TokioHost};
use nexa_shared::Environment;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::task::LocalSet;

fn scheduler() -> NextTick {
    NextTick::builder()
        .host(&TokioHost::primitives())
        .environment(Environment::default())
        .error_policy(ErrorPolicy::Propagate)
        .build()
}

#[tokio::test]
async fn test_flush_on_local_set() {
    LocalSet::new()
        .run_until(async {
            let scheduler = scheduler();
            let log = Rc::new(RefCell::new(Vec::new()));

            for i in 0..3 {
                let log = log.clone();
                scheduler.next_tick(move || log.borrow_mut().push(i));
            }
            assert!(log.borrow().is_empty());

            scheduler.tick().await.unwrap();
            assert_eq!(*log.borrow(), vec![0, 1, 2]);
            assert_eq!(scheduler.flushes(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_macro_task_tick_resolves() {
    LocalSet::new()
        .run_until(async {
            let scheduler = scheduler();

            let handler = Rc::new({
                let scheduler = scheduler.clone();
                move |()| scheduler.tick_with("coarse")
            });
            let coarse = scheduler.with_macro_task(&handler).call(());

            assert!(!scheduler.is_macro_task());
            assert_eq!(coarse.await.unwrap(), "coarse");
            assert_eq!(scheduler.flushes(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_failed_batch_reaches_awaiting_tick() {
    LocalSet::new()
        .run_until(async {
            let scheduler = scheduler();
            let log = Rc::new(RefCell::new(Vec::new()));

            scheduler.next_tick(|| Err::<(), _>("assertion failed"));
            {
                let log = log.clone();
                scheduler.next_tick(move || log.borrow_mut().push("after"));
            }

            let outcome = scheduler.tick().await;
            assert_eq!(
                outcome,
                Err(SchedulerError::Failed("assertion failed".to_owned()))
            );
            assert_eq!(*log.borrow(), vec!["after"]);

            // A later batch is unaffected.
            scheduler.next_tick(|| ());
            assert_eq!(scheduler.tick().await, Ok(()));
        })
        .await;
}
