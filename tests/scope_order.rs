use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use scope_defer::{defer_call, register_cleanup, DeferStack};
use tokio::time::sleep;

const PARALLEL_TASKS: u32 = 16;

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log) -> impl FnOnce(String) + Send + 'static {
    let log = log.clone();
    move |entry| log.lock().unwrap().push(entry)
}

/// Holds two guards across await points, bails early on odd ids.
async fn task_scope(id: u32, log: Log) -> Option<u32> {
    let _first = register_cleanup(push(&log), Some(format!("{id}:first")));
    sleep(Duration::from_millis(5)).await;
    {
        defer_call!(push(&log), Some(format!("{id}:inner")));
        sleep(Duration::from_millis(5)).await;
    }
    let _second = register_cleanup(push(&log), Some(format!("{id}:second")));
    if id % 2 == 1 {
        return None;
    }
    sleep(Duration::from_millis(5)).await;
    Some(id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_task_scopes() {
    let logs: Vec<Log> = (0..PARALLEL_TASKS).map(|_| Log::default()).collect();
    let handles = logs
        .iter()
        .enumerate()
        .map(|(id, log)| tokio::spawn(task_scope(id as u32, log.clone())));

    let results = join_all(handles).await;
    for (id, result) in results.into_iter().enumerate() {
        let exp_result = if id % 2 == 1 { None } else { Some(id as u32) };
        assert_eq!(exp_result, result.unwrap());
        assert_eq!(
            *logs[id].lock().unwrap(),
            [
                format!("{id}:inner"),
                format!("{id}:second"),
                format!("{id}:first")
            ]
        );
    }
}

#[test]
fn test_threads_keep_their_own_order() {
    let handles: Vec<_> = (0..PARALLEL_TASKS)
        .map(|id| {
            std::thread::spawn(move || {
                let log = Log::default();
                {
                    let _a = register_cleanup(push(&log), Some("A".to_owned()));
                    let _b = register_cleanup(push(&log), Some("B".to_owned()));
                    let _c = register_cleanup(push(&log), Some(format!("C{id}")));
                }
                let entries = log.lock().unwrap().clone();
                entries
            })
        })
        .collect();

    for (id, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), [format!("C{id}"), "B".to_owned(), "A".to_owned()]);
    }
}

#[test]
fn test_stack_scopes_match_guard_order() {
    let guard_log = Log::default();
    {
        let _outer = register_cleanup(push(&guard_log), Some("A".to_owned()));
        {
            let _inner = register_cleanup(push(&guard_log), Some("B".to_owned()));
        }
    }

    let stack_log = Log::default();
    let mut stack = DeferStack::new();
    {
        let mut outer = stack.scope();
        outer.push(push(&stack_log), Some("A".to_owned())).unwrap();
        {
            let mut inner = outer.scope();
            inner.push(push(&stack_log), Some("B".to_owned())).unwrap();
        }
    }

    assert_eq!(*guard_log.lock().unwrap(), ["B", "A"]);
    assert_eq!(*guard_log.lock().unwrap(), *stack_log.lock().unwrap());
}
