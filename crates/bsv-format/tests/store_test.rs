//! File store integration tests

use bsv_format::{BsvError, Cell, Row, Store, StoreConfig, Table, append, encode, load, save};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn row(values: &[&str]) -> Row {
    values.iter().map(|v| Cell::text(*v)).collect()
}

fn scratch() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_append_after_save() {
    let dir = scratch();
    let path = dir.path().join("table.bsv");

    save(&[row(&["A"])], &path).expect("Test operation should succeed");
    append(&[row(&["B"])], &path).expect("Test operation should succeed");

    assert_eq!(
        load(&path).expect("Test operation should succeed"),
        vec![row(&["A"]), row(&["B"])]
    );
}

#[test]
fn test_append_equals_concatenated_save() {
    let dir = scratch();
    let appended = dir.path().join("appended.bsv");
    let saved = dir.path().join("saved.bsv");

    let first: Table = vec![vec![Cell::text("x"), Cell::Null], vec![]];
    let second: Table = vec![vec![Cell::Empty], row(&["😀", "y"])];

    append(&first, &appended).expect("Test operation should succeed");
    append(&second, &appended).expect("Test operation should succeed");

    let mut combined = first.clone();
    combined.extend(second);
    save(&combined, &saved).expect("Test operation should succeed");

    assert_eq!(
        std::fs::read(&appended).expect("Test operation should succeed"),
        std::fs::read(&saved).expect("Test operation should succeed")
    );
    assert_eq!(load(&appended).expect("Test operation should succeed"), combined);
}

#[test]
fn test_append_to_existing_empty_file() {
    let dir = scratch();
    let path = dir.path().join("empty.bsv");
    std::fs::write(&path, b"").expect("Test operation should succeed");

    // The file already exists, so the fragment is separated from the (empty) first row
    append(&[row(&["A"])], &path).expect("Test operation should succeed");
    assert_eq!(
        load(&path).expect("Test operation should succeed"),
        vec![Row::new(), row(&["A"])]
    );
}

#[test]
fn test_store_with_config() {
    let dir = scratch();
    let path = dir.path().join("synced.bsv");
    let store = Store::new(StoreConfig::new().with_sync(true)).expect("Test operation should succeed");

    let table = vec![row(&["alpha", "beta"]), vec![Cell::Null]];
    store.save(&table, &path).expect("Test operation should succeed");
    assert_eq!(
        std::fs::read(&path).expect("Test operation should succeed"),
        encode(&table)
    );
    assert_eq!(store.load(&path).expect("Test operation should succeed"), table);
    assert!(store.config().sync);
}

#[test]
fn test_save_into_missing_directory() {
    let dir = scratch();
    let path = dir.path().join("no-such-dir").join("table.bsv");
    let err = save(&[row(&["A"])], &path).unwrap_err();
    assert!(matches!(err, BsvError::NotFound { .. }));
}

#[test]
fn test_load_reports_decoder_errors() {
    let dir = scratch();
    let path = dir.path().join("bad.bsv");
    std::fs::write(&path, [0xC0, 0x80]).expect("Test operation should succeed");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, BsvError::InvalidEncoding { offset: 0, .. }));
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("Log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_store_log_messages() {
    let dir = scratch();
    let path = dir.path().join("logged.bsv");
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        append(&[row(&["A"])], &path).expect("Test operation should succeed");
        append(&[row(&["B"])], &path).expect("Test operation should succeed");
        save(&[row(&["C"])], &path).expect("Test operation should succeed");
        load(&path).expect("Test operation should succeed");
    });

    let output = String::from_utf8(buffer.0.lock().expect("Log buffer poisoned").clone())
        .expect("Test operation should succeed");
    let shown = path.display().to_string();
    assert!(output.contains(&format!("Created {shown} with 1 bytes")), "{output}");
    assert!(output.contains(&format!("Appended 2 bytes to {shown}")), "{output}");
    assert!(output.contains(&format!("Saved 1 rows to {shown}")), "{output}");
    assert!(output.contains(&format!("Loaded 1 bytes (1 rows) from {shown}")), "{output}");
}
