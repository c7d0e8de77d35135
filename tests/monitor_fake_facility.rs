// tests/monitor_fake_facility.rs
//
// Deterministic monitor-loop tests driven by a scripted facility instead of
// the platform watcher.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use autoview::watch::{DirectoryMonitor, RawEvent, WatchToken};
use autoview_test_utils::{FakeFacility, PanickingListener, RecordingListener, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

const ROOT: &str = "/watched";

/// The constructor registers the root first, so the fake hands it token 0.
fn root_token() -> WatchToken {
    WatchToken::from_raw(0)
}

fn created(name: &str) -> RawEvent {
    RawEvent::Created {
        name: PathBuf::from(name),
    }
}

#[test]
fn events_in_a_batch_are_dispatched_in_delivery_order() -> TestResult {
    init_tracing();

    let mut facility = FakeFacility::new();
    facility.push_batch(root_token(), vec![created("a.txt"), created("b.txt")]);
    facility.push_rearm(root_token(), false); // end the loop after the batch

    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let listener = RecordingListener::new();
    monitor.add_listener(Arc::new(listener.clone()));

    monitor.process_events();

    assert_eq!(
        listener.paths(),
        vec![
            PathBuf::from("/watched/a.txt"),
            PathBuf::from("/watched/b.txt")
        ]
    );
    Ok(())
}

#[test]
fn overflow_events_produce_no_callbacks_and_do_not_stop_the_loop() -> TestResult {
    init_tracing();

    let mut facility = FakeFacility::new();
    facility.push_batch(root_token(), vec![RawEvent::Overflow]);
    facility.push_batch(root_token(), vec![created("after.txt")]);
    facility.push_rearm(root_token(), true);
    facility.push_rearm(root_token(), false);

    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let listener = RecordingListener::new();
    monitor.add_listener(Arc::new(listener.clone()));

    monitor.process_events();

    assert_eq!(listener.paths(), vec![PathBuf::from("/watched/after.txt")]);
    Ok(())
}

#[test]
fn non_creation_events_are_ignored() -> TestResult {
    init_tracing();

    let mut facility = FakeFacility::new();
    facility.push_batch(
        root_token(),
        vec![RawEvent::Other, created("kept.txt"), RawEvent::Other],
    );
    facility.push_rearm(root_token(), false);

    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let listener = RecordingListener::new();
    monitor.add_listener(Arc::new(listener.clone()));

    monitor.process_events();

    assert_eq!(listener.paths(), vec![PathBuf::from("/watched/kept.txt")]);
    Ok(())
}

#[test]
fn a_batch_for_an_unknown_token_is_skipped() -> TestResult {
    init_tracing();

    let mut facility = FakeFacility::new();
    facility.push_batch(WatchToken::from_raw(42), vec![created("ghost.txt")]);
    facility.push_batch(root_token(), vec![created("real.txt")]);
    facility.push_rearm(root_token(), false);

    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let listener = RecordingListener::new();
    monitor.add_listener(Arc::new(listener.clone()));

    monitor.process_events();

    assert_eq!(listener.paths(), vec![PathBuf::from("/watched/real.txt")]);
    Ok(())
}

#[test]
fn a_panicking_listener_does_not_starve_the_next_listener() -> TestResult {
    init_tracing();

    let mut facility = FakeFacility::new();
    facility.push_batch(root_token(), vec![created("e.txt")]);
    facility.push_rearm(root_token(), false);

    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let survivor = RecordingListener::new();
    monitor.add_listener(Arc::new(PanickingListener));
    monitor.add_listener(Arc::new(survivor.clone()));

    monitor.process_events();

    assert_eq!(survivor.paths(), vec![PathBuf::from("/watched/e.txt")]);
    Ok(())
}

#[test]
fn cancelling_an_idle_scripted_loop_returns_promptly() -> TestResult {
    init_tracing();

    let facility = FakeFacility::new(); // empty script: waits until cancelled
    let mut monitor = DirectoryMonitor::with_facility(ROOT, Box::new(facility))?;
    let cancel = monitor.cancel_handle();

    let loop_thread = thread::spawn(move || monitor.process_events());
    thread::sleep(Duration::from_millis(50));
    cancel.cancel();

    loop_thread.join().expect("monitor thread panicked");
    Ok(())
}
