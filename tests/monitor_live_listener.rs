// tests/monitor_live_listener.rs

use std::error::Error;
use std::fs::File;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use autoview::watch::DirectoryMonitor;
use autoview_test_utils::{RecordingListener, init_tracing, wait_until};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn listener_added_while_running_receives_subsequent_creations() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let root = dir.path().canonicalize()?;

    let mut monitor = DirectoryMonitor::new(dir.path())?;
    let listeners = monitor.listeners();
    let cancel = monitor.cancel_handle();

    let loop_thread = thread::spawn(move || monitor.process_events());

    thread::sleep(Duration::from_millis(50));
    let late = RecordingListener::new();
    listeners.add(Arc::new(late.clone()));

    File::create(root.join("d.txt"))?;

    assert!(
        wait_until(Duration::from_secs(5), || late
            .paths()
            .contains(&root.join("d.txt"))),
        "late listener never saw d.txt, got {:?}",
        late.paths()
    );

    cancel.cancel();
    loop_thread.join().expect("monitor thread panicked");
    Ok(())
}
