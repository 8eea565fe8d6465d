//! Crash safety tests for the streaming rewrite path.
//!
//! These tests verify the store survives:
//! - An interrupted rewrite (crash before the rename)
//! - Stray partial artifacts next to the store
//! - A completed streaming pop (exact bytes, no leftovers)

use filequeue::{load_history, save_history, MessageQueue, MessageStore, PopMode};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_messages(dir: &Path, messages: &[&str]) -> PathBuf {
    let path = dir.join("messages.txt");
    std::fs::write(
        &path,
        messages.iter().map(|m| format!("{}\n", m)).collect::<String>(),
    )
    .expect("Failed to write message file");
    path
}

#[test]
fn test_interrupted_rewrite_leaves_store_untouched() {
    let temp_dir = setup_test_dir();
    let path = write_messages(temp_dir.path(), &["a", "b", "c"]);
    let before = std::fs::read(&path).unwrap();

    // Replay the streaming pop up to, but not including, the rename: the
    // remainder sits in a sibling temp file that is then abandoned, as a
    // crash would abandon it.
    {
        let temp = tempfile::NamedTempFile::new_in(temp_dir.path()).unwrap();
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(b"b\nc\n").unwrap();
        writer.flush().unwrap();
        // temp dropped here without persist
    }

    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);

    // The store is still fully usable
    let store = MessageStore::new(&path);
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.get(0).unwrap(), "a");
}

#[test]
fn test_streaming_pop_rewrites_exact_bytes() {
    let temp_dir = setup_test_dir();
    let path = write_messages(temp_dir.path(), &["a", "b", "c"]);
    let queue = MessageQueue::open(&path);

    queue.dequeue(None, PopMode::Streaming).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"b\nc\n");
    let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "messages.txt")
        .collect();
    assert!(leftovers.is_empty(), "found leftovers: {:?}", leftovers);
}

#[test]
fn test_repeated_streaming_pops_drain_the_store() {
    let temp_dir = setup_test_dir();
    let path = write_messages(temp_dir.path(), &["a", "b", "c"]);
    let queue = MessageQueue::open(&path);

    assert_eq!(queue.dequeue(None, PopMode::Streaming).unwrap(), "a");
    assert_eq!(queue.dequeue(None, PopMode::Streaming).unwrap(), "b");
    assert_eq!(queue.dequeue(None, PopMode::Streaming).unwrap(), "c");
    assert_eq!(queue.get_nr_of_messages().unwrap(), 0);
    assert!(queue.dequeue(None, PopMode::Streaming).is_err());
}

#[test]
fn test_interrupted_history_save_leaves_old_history() {
    let temp_dir = setup_test_dir();
    let history_path = temp_dir.path().join("history.json");
    save_history(&history_path, &[1, 2, 3]).unwrap();

    // Abandon a sibling temp file holding a half-written replacement, the
    // state a crash mid-save leaves behind
    {
        let temp = tempfile::NamedTempFile::new_in(temp_dir.path()).unwrap();
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(b"[9,9").unwrap();
        writer.flush().unwrap();
    }

    assert_eq!(load_history(&history_path).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_partial_line_at_end_of_store_still_counts() {
    let temp_dir = setup_test_dir();
    let path = temp_dir.path().join("messages.txt");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "complete").unwrap();
    // Partial line without newline, simulating an interrupted append
    write!(file, "partial").unwrap();
    drop(file);

    let store = MessageStore::new(&path);
    assert_eq!(store.count().unwrap(), 2);
    assert_eq!(store.get(-1).unwrap(), "partial");
}
