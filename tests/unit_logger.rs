use logfacade::{Encoding, Level, LoggerConfig};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Point the global facade at a fresh JSON file and return its path.
fn json_to_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("global.log");
    logfacade::configure(LoggerConfig {
        encoding: Encoding::Json,
        output_paths: vec![path.to_string_lossy().into_owned()],
        ..LoggerConfig::default()
    });
    path
}

fn read_records(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("log file should exist")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be valid JSON"))
        .collect()
}

fn reset() {
    logfacade::configure(LoggerConfig::default());
}

#[test]
#[serial]
fn test_defaults() {
    reset();
    let config = logfacade::handle().config();

    assert_eq!(logfacade::get_level(), Level::Debug);
    assert_eq!(config.output_paths, vec!["stderr"]);
    assert_eq!(config.encoding, Encoding::Console);
    assert!(!config.development);
}

#[test]
#[serial]
fn test_level_threshold_filters_records() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    logfacade::set_level(Level::Warn);
    assert_eq!(logfacade::get_level(), Level::Warn);

    logfacade::debug("debug hidden", &[]);
    logfacade::info("info hidden", &[]);
    logfacade::warn("warn shown", &[]);
    logfacade::error("error shown", &[]);

    let levels: Vec<String> = read_records(&path)
        .iter()
        .map(|r| r["lv"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, vec!["warn", "error"]);
    reset();
}

#[test]
#[serial]
fn test_json_record_with_string_field() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    logfacade::info("hello", &[logfacade::string("k", "v")]);

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["msg"], "hello");
    assert_eq!(record["lv"], "info");
    assert_eq!(record["k"], "v");
    assert!(record["ts"].as_str().unwrap().contains('T'), "ts should be ISO-8601");
    assert!(record.get("caller").is_none(), "caller is disabled by default");
    reset();
}

#[test]
#[serial]
fn test_set_encoding_twice_keeps_logger() {
    reset();
    logfacade::set_encoding("json");
    let id = logfacade::logger().id();

    logfacade::set_encoding("json");
    assert_eq!(logfacade::logger().id(), id);

    logfacade::set_encoding("console");
    assert_ne!(logfacade::logger().id(), id);
    reset();
}

#[test]
#[serial]
fn test_source_only_on_later_records() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    logfacade::info("before", &[]);
    logfacade::set_source("gate");
    logfacade::info("after", &[]);
    logfacade::warn("after again", &[logfacade::int32("n", 2)]);

    let records = read_records(&path);
    assert_eq!(records.len(), 3);
    assert!(records[0].get("source").is_none());
    assert_eq!(records[1]["source"], "gate");
    assert_eq!(records[2]["source"], "gate");
    assert_eq!(records[2]["n"], 2);
    reset();
}

#[test]
#[serial]
fn test_formatted_variants() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    let device_name = "test_device";
    let count = 42;
    logfacade::infof!("Starting with device: {}", device_name);
    logfacade::debugf!("Processing {} samples", count);
    logfacade::set_level(Level::Error);
    logfacade::warnf!("suppressed {}", count);
    logfacade::errorf!("Failed: {}", "test error");

    let messages: Vec<String> = read_records(&path)
        .iter()
        .map(|r| r["msg"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Starting with device: test_device",
            "Processing 42 samples",
            "Failed: test error",
        ]
    );
    reset();
}

#[test]
#[serial]
fn test_development_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("console.log");
    logfacade::set_output(vec![path.to_string_lossy().into_owned()]);
    let initial = logfacade::handle().config();

    logfacade::set_development(true);
    logfacade::warn("dev warning", &[]);
    logfacade::set_development(false);
    logfacade::warn("prod warning", &[]);

    assert_eq!(logfacade::handle().config(), initial);
    let content = fs::read_to_string(&path).unwrap();
    let prod_line = content
        .lines()
        .position(|l| l.contains("prod warning"))
        .expect("prod record present");
    assert_eq!(prod_line, content.lines().count() - 1, "no stack trace after prod record");
    assert!(content.lines().count() > 2, "development warn carries a stack trace");
    reset();
}

#[test]
#[serial]
fn test_logger_thread_safety() {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::thread;

    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    let counter = Arc::new(AtomicU32::new(0));
    let mut handles = vec![];

    for i in 0..5 {
        let counter_clone = Arc::clone(&counter);
        handles.push(thread::spawn(move || {
            for j in 0..10 {
                logfacade::infof!("Thread {} iteration {}", i, j);
                counter_clone.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread should complete successfully");
    }

    assert_eq!(counter.load(Ordering::SeqCst), 50);
    assert_eq!(read_records(&path).len(), 50, "records must not interleave");
    reset();
}

#[test]
#[serial]
fn test_log_with_special_characters() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);

    logfacade::info("Testing unicode: 音频处理 🎵", &[]);
    logfacade::warn("Special chars: <>&\"'\\", &[logfacade::string("q", "\"quoted\"")]);
    logfacade::debug("Newlines and tabs:\n\tTabbed content", &[]);

    let records = read_records(&path);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["msg"], "Testing unicode: 音频处理 🎵");
    assert_eq!(records[1]["q"], "\"quoted\"");
    assert_eq!(records[2]["msg"], "Newlines and tabs:\n\tTabbed content");
    reset();
}

#[test]
#[serial]
fn test_disabled_level_performance() {
    use std::time::Instant;

    reset();
    logfacade::set_level(Level::Error);
    let start = Instant::now();

    for i in 0..1000 {
        logfacade::debugf!("Performance test message {}", i);
    }

    let duration = start.elapsed();
    assert!(duration.as_secs() < 5, "Filtered logging took too long: {:?}", duration);
    reset();
}

#[test]
#[serial]
#[should_panic(expected = "unrecoverable")]
fn test_panic_level_unwinds() {
    reset();
    logfacade::set_output(vec![]);
    logfacade::panic("unrecoverable", &[]);
}

#[test]
#[serial]
fn test_global_tracing_layer_follows_reconfiguration() {
    use tracing_subscriber::layer::SubscriberExt;

    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = json_to_file(&dir);
    let subscriber = tracing_subscriber::registry().with(logfacade::FacadeLayer::global());

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(attempt = 1u64, "before source");
        logfacade::set_source("bridge");
        tracing::debug!("after source");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msg"], "before source");
    assert_eq!(records[0]["attempt"], 1);
    assert!(records[0].get("source").is_none());
    assert_eq!(records[1]["lv"], "debug");
    assert_eq!(records[1]["source"], "bridge");

    reset();
}
