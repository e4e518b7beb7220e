use tokio::process::Command;

const DEMO_BIN: &str = env!("CARGO_BIN_EXE_scope-defer");

async fn run_demo(demo: &str) -> (bool, String) {
    let output = Command::new(DEMO_BIN)
        .arg(demo)
        .env("RUST_LOG", "info")
        .output()
        .await
        .expect(&format!("demo {demo} failed to start"));
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

/// Index of `needle` in the demo log, panics with the full log when missing.
fn position(log: &str, needle: &str) -> usize {
    log.find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in demo output:\n{log}"))
}

#[cfg_attr(not(feature = "integration-test"), ignore)]
#[tokio::test]
async fn test_file_demo() {
    let (success, log) = run_demo("file").await;
    assert!(success, "{log}");

    // temp file is closed, then removed, before the next example starts
    let created = position(&log, "Temporary file created");
    let removed = position(&log, "temp_data.tmp");
    assert!(created < removed);
    assert!(removed < position(&log, "Example 4: Open failure"));
    assert!(log.contains("Expected file open failure handled correctly"));
}

#[cfg_attr(not(feature = "integration-test"), ignore)]
#[tokio::test]
async fn test_socket_demo() {
    let (success, log) = run_demo("socket").await;
    assert!(success, "{log}");

    let accepted = position(&log, "Closed accepted socket");
    let client = position(&log, "Closed client socket");
    let server = position(&log, "Closed server socket");
    assert!(accepted < client && client < server);
}

#[cfg_attr(not(feature = "integration-test"), ignore)]
#[tokio::test]
async fn test_resource_demo() {
    let (success, log) = run_demo("resource").await;
    assert!(success, "{log}");

    assert!(position(&log, "Performing work with mutex locked") < position(&log, "Mutex unlocked"));
    assert!(position(&log, "Using texture 12345") < position(&log, "Unbinding texture 12345"));
    assert!(log.contains("Closing database connection: postgresql://localhost:5432/testdb"));
}

#[cfg_attr(not(feature = "integration-test"), ignore)]
#[tokio::test]
async fn test_stack_demo_runs_exit_cleanup() {
    let (success, log) = run_demo("stack").await;
    assert!(success, "{log}");

    let second = position(&log, "registered second");
    let first = position(&log, "registered first");
    let back = position(&log, "Back in outer scope, 1 pending");
    let outer = position(&log, "Outer scope cleanup ran");
    assert!(second < first && first < back && back < outer);

    // fires from the exit hook, after main has finished
    assert!(position(&log, "All demos for stack completed") < position(&log, "released at exit"));
}

#[cfg_attr(not(feature = "integration-test"), ignore)]
#[tokio::test]
async fn test_unknown_demo_fails() {
    let (success, log) = run_demo("bogus").await;
    assert!(!success);
    assert!(log.contains("unknown demo bogus"));
}
