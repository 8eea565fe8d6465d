//! Read access to a line oriented message store.
//!
//! A store is a plain text file with one message per line. All reads stream
//! the file and nothing is cached between calls, so messages appended by the
//! same process between operations are picked up by the next read.

use crate::paths::expand_user;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read-only view over a message file
#[derive(Clone, Debug)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    /// Create a view over the given message file. A leading `~` is expanded.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_user(path),
        }
    }

    /// The expanded path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of messages in the store.
    ///
    /// One streaming pass over the file. A final line without a trailing
    /// newline still counts as a message; an empty file holds none.
    pub fn count(&self) -> Result<usize> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut count = 0;
        for chunk in reader.split(b'\n') {
            chunk?;
            count += 1;
        }
        Ok(count)
    }

    /// Fetch the message at `index`, where 0 is the front of the queue and
    /// negative indices count back from the end (`-1` is the last message).
    ///
    /// Streams to the target line rather than reading the whole file.
    pub fn get(&self, index: i64) -> Result<String> {
        let len = self.count()?;
        let resolved = resolve_index(index, len)?;
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        match reader.lines().nth(resolved) {
            Some(line) => Ok(line?),
            // The file shrank between the count and this read
            None => Err(Error::Range { index, len }),
        }
    }

    /// Collect the messages between `start` and `end` inclusive, skipping
    /// `skip` messages between returned ones.
    ///
    /// Bounds may be negative (counted from the end) and may be given in
    /// either order; the result always runs from `start` towards `end`.
    /// Stepping is anchored at the lower bound, so reversing the bounds
    /// reverses the result exactly.
    pub fn slice(&self, start: i64, end: i64, skip: usize) -> Result<Vec<String>> {
        let len = self.count()?;
        let a = resolve_index(start, len)?;
        let b = resolve_index(end, len)?;
        let (low, high, reversed) = if a > b { (b, a, true) } else { (a, b, false) };
        let step = skip + 1;

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut messages = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            if i > high {
                break;
            }
            let line = line?;
            if i >= low && (i - low) % step == 0 {
                messages.push(line);
            }
        }
        if reversed {
            messages.reverse();
        }
        Ok(messages)
    }
}

/// Resolve a possibly negative index against the store length
fn resolve_index(index: i64, len: usize) -> Result<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved < 0 || resolved >= len as i64 {
        return Err(Error::Range { index, len });
    }
    Ok(resolved as usize)
}
