// tests/monitor_dir_removed.rs

use std::error::Error;
use std::fs;
use std::thread;
use std::time::Duration;

use autoview::watch::DirectoryMonitor;
use autoview_test_utils::{init_tracing, wait_until};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn removing_the_watched_directory_stops_the_loop() -> TestResult {
    init_tracing();

    let outer = tempdir()?;
    let watched = outer.path().join("incoming");
    fs::create_dir(&watched)?;

    let mut monitor = DirectoryMonitor::new(&watched)?;
    let loop_thread = thread::spawn(move || monitor.process_events());

    thread::sleep(Duration::from_millis(200));
    fs::remove_dir(&watched)?;

    // The only watched directory is gone, so the loop ends on its own —
    // a normal return, not an error surfaced anywhere.
    assert!(
        wait_until(Duration::from_secs(5), || loop_thread.is_finished()),
        "monitor loop did not stop after the watched directory was removed"
    );
    loop_thread.join().expect("monitor thread panicked");
    Ok(())
}
