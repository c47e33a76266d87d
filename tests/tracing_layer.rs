use logfacade::{Encoding, FacadeLayer, Level, LoggerConfig, LoggerHandle};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;

fn json_handle(dir: &TempDir) -> (Arc<LoggerHandle>, std::path::PathBuf) {
    let path = dir.path().join("tracing.log");
    let handle = LoggerHandle::new(LoggerConfig {
        encoding: Encoding::Json,
        output_paths: vec![path.to_string_lossy().into_owned()],
        source: "gate".to_string(),
        ..LoggerConfig::default()
    })
    .expect("Failed to build handle");
    (Arc::new(handle), path)
}

fn read_records(path: &std::path::Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}

#[test]
fn test_tracing_events_reach_the_handle() {
    let dir = TempDir::new().unwrap();
    let (handle, path) = json_handle(&dir);
    let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(Arc::clone(&handle)));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(port = 8080u64, peer = "10.0.0.1", secure = true, "accepted");
        tracing::warn!(retries = -1i64, ratio = 0.5, "degraded {}", "link");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["lv"], "info");
    assert_eq!(records[0]["msg"], "accepted");
    assert_eq!(records[0]["source"], "gate");
    assert_eq!(records[0]["port"], 8080);
    assert_eq!(records[0]["peer"], "10.0.0.1");
    assert_eq!(records[0]["secure"], true);

    assert_eq!(records[1]["lv"], "warn");
    assert_eq!(records[1]["msg"], "degraded link");
    assert_eq!(records[1]["retries"], -1);
    assert_eq!(records[1]["ratio"], 0.5);
}

#[test]
fn test_tracing_levels_respect_handle_threshold() {
    let dir = TempDir::new().unwrap();
    let (handle, path) = json_handle(&dir);
    handle.set_level(Level::Info);
    let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(Arc::clone(&handle)));

    tracing::subscriber::with_default(subscriber, || {
        tracing::trace!("trace hidden");
        tracing::debug!("debug hidden");
        tracing::error!(code = 7u64, "boom");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["lv"], "error");
    assert_eq!(records[0]["code"], 7);
}

#[test]
fn test_rebuild_inside_subscriber_does_not_deadlock() {
    let dir = TempDir::new().unwrap();
    let (handle, path) = json_handle(&dir);
    let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(Arc::clone(&handle)));

    tracing::subscriber::with_default(subscriber, || {
        handle.set_development(true).expect("rebuild");
        tracing::info!("after rebuild");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "after rebuild");
}

#[test]
fn test_targets_sharing_the_crate_prefix_are_forwarded() {
    let dir = TempDir::new().unwrap();
    let (handle, path) = json_handle(&dir);
    let subscriber = tracing_subscriber::registry().with(FacadeLayer::new(Arc::clone(&handle)));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "logfacade_ext", "kept");
        tracing::info!(target: "logfacade::handle", "dropped");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "kept");
}
