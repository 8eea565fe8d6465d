//! Destructive operations on a message store.
//!
//! Appends go straight to the end of the file. Removing the front message
//! rewrites the store, either wholesale in memory or by streaming through a
//! temp file that is renamed over the original.

use crate::store::MessageStore;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use tempfile::NamedTempFile;

/// How `pop_front` rewrites the remaining messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopMode {
    /// Read the whole store into memory and rewrite it in place. Simple,
    /// but a crash mid-rewrite can corrupt the file; meant for small stores.
    Compact,
    /// Stream the remaining messages into a temp file in the store's own
    /// directory, then rename it over the original. A crash before the
    /// rename leaves the store untouched; after it, the new file is fully
    /// in place. Never holds the whole store in memory.
    Streaming,
}

/// Append a message to the back of the store, creating the file if needed.
///
/// The message must be a single line; an embedded newline would split it
/// into two entries on the next read.
pub fn append(store: &MessageStore, message: &str) -> Result<()> {
    if message.contains('\n') {
        return Err(Error::Config(
            "message must not contain a newline".into(),
        ));
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store.path())?;

    let mut writer = BufWriter::new(&file);
    writer.write_all(message.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!("appended message to {:?}", store.path());
    Ok(())
}

/// Remove and return the first message of the store.
pub fn pop_front(store: &MessageStore, mode: PopMode) -> Result<String> {
    let message = match mode {
        PopMode::Compact => pop_front_compact(store)?,
        PopMode::Streaming => pop_front_streaming(store)?,
    };
    tracing::debug!("popped front message from {:?}", store.path());
    Ok(message)
}

fn pop_front_compact(store: &MessageStore) -> Result<String> {
    let file = File::open(store.path())?;
    let mut messages: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()?;
    if messages.is_empty() {
        return Err(Error::EmptyStore(store.path().to_path_buf()));
    }
    let first = messages.remove(0);

    let out = File::create(store.path())?;
    let mut writer = BufWriter::new(out);
    for message in &messages {
        writer.write_all(message.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(first)
}

fn pop_front_streaming(store: &MessageStore) -> Result<String> {
    let file = File::open(store.path())?;
    let mut lines = BufReader::new(file).lines();
    let first = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::EmptyStore(store.path().to_path_buf())),
    };

    // Must live next to the store so the rename stays on one filesystem
    let temp = NamedTempFile::new_in(crate::paths::parent_dir(store.path()))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        for line in lines {
            let line = line?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    // Atomically replace the store with the rewritten copy
    temp.persist(store.path()).map_err(|e| Error::Io(e.error))?;

    Ok(first)
}
