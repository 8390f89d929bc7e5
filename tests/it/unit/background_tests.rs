//! Unit tests for the background executor.

use crate::helpers::wait_for_completion;
use promptboard::background::{BackgroundExecutor, TaskResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn test_idle_executor_has_no_pending_work() {
    let executor = BackgroundExecutor::new(2);
    assert_eq!(executor.pending_count(), 0);
    assert!(!executor.has_pending());
}

#[test]
fn test_result_delivered_on_the_polling_thread() {
    let executor = BackgroundExecutor::new(1);
    let delivered = Arc::new(Mutex::new(None::<String>));
    let sink = Arc::clone(&delivered);

    executor.spawn(
        "generate_image",
        || Ok("https://cdn.example/fox.png".to_string()),
        move |result: TaskResult<String>| {
            *sink.lock().unwrap() = Some(result.unwrap());
        },
    );

    let done = wait_for_completion(
        &executor,
        || delivered.lock().unwrap().is_some(),
        Duration::from_secs(1),
    );

    assert!(done, "generation callback never ran");
    assert_eq!(
        delivered.lock().unwrap().as_deref(),
        Some("https://cdn.example/fox.png")
    );
    assert!(!executor.has_pending());
}

#[test]
fn test_job_error_reaches_callback_as_value() {
    let executor = BackgroundExecutor::new(1);
    let observed = Arc::new(Mutex::new(None::<String>));
    let sink = Arc::clone(&observed);

    executor.spawn(
        "materialize_image",
        || Err::<(), _>("no cache directory".to_string()),
        move |result: TaskResult<()>| {
            *sink.lock().unwrap() = Some(result.unwrap_err());
        },
    );

    wait_for_completion(
        &executor,
        || observed.lock().unwrap().is_some(),
        Duration::from_secs(1),
    );

    assert_eq!(
        observed.lock().unwrap().as_deref(),
        Some("no cache directory")
    );
}

#[test]
fn test_storyboard_scenes_all_land() {
    let executor = BackgroundExecutor::new(2);
    let scenes = Arc::new(Mutex::new(Vec::new()));

    for scene in 1..=5 {
        let scenes = Arc::clone(&scenes);
        executor.spawn(
            &format!("storyboard_scene_{}", scene),
            move || Ok(scene),
            move |result: TaskResult<i32>| {
                scenes.lock().unwrap().push(result.unwrap());
            },
        );
    }

    let done = wait_for_completion(
        &executor,
        || scenes.lock().unwrap().len() == 5,
        Duration::from_secs(2),
    );
    assert!(done, "not every scene callback ran");

    // Two workers race, so completion order is theirs to choose.
    let mut seen = scenes.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_pending_count_tracks_in_flight_jobs() {
    let executor = BackgroundExecutor::new(1);
    let gate = Arc::new(AtomicBool::new(false));
    let worker_gate = Arc::clone(&gate);
    let finished = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&finished);

    executor.spawn(
        "list_models",
        move || {
            while !worker_gate.load(Ordering::SeqCst) {
                std::thread::yield_now();
            }
            Ok(())
        },
        move |_: TaskResult<()>| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    // The job blocks on the gate, so it must still be counted.
    assert_eq!(executor.pending_count(), 1);
    assert!(executor.has_pending());

    gate.store(true, Ordering::SeqCst);
    wait_for_completion(
        &executor,
        || finished.load(Ordering::SeqCst) == 1,
        Duration::from_secs(1),
    );

    assert_eq!(executor.pending_count(), 0);
    assert!(!executor.has_pending());
}
