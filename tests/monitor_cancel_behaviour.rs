// tests/monitor_cancel_behaviour.rs

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use autoview::watch::DirectoryMonitor;
use autoview_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn cancel_from_another_thread_unblocks_the_loop() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let mut monitor = DirectoryMonitor::new(dir.path())?;
    let cancel = monitor.cancel_handle();

    let loop_thread = thread::spawn(move || monitor.process_events());

    // Let the loop reach its blocking wait; no filesystem event is needed
    // for the cancellation to take effect.
    thread::sleep(Duration::from_millis(100));

    let started = Instant::now();
    cancel.cancel();
    loop_thread.join().expect("monitor thread panicked");

    assert!(
        started.elapsed() < Duration::from_secs(1),
        "cancellation took {:?}",
        started.elapsed()
    );
    Ok(())
}

#[test]
fn cancel_before_the_loop_starts_stops_it_on_the_first_wait() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let mut monitor = DirectoryMonitor::new(dir.path())?;
    monitor.cancel_handle().cancel();

    // Returns instead of blocking; a hang here fails via the test timeout.
    monitor.process_events();
    Ok(())
}
