//! Bounded history of recently selected message indices.
//!
//! The history lives in a side file as a JSON array of indices, oldest
//! first. It is loaded at the start of a random selection and rewritten
//! atomically at the end.

use crate::paths::{expand_user, parent_dir};
use crate::{Error, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read the persisted history.
///
/// The side file must already exist: a missing or malformed file is an
/// error, never an implicit empty history. Save an initial (possibly empty)
/// history before the first selection.
pub fn load_history(path: &Path) -> Result<Vec<usize>> {
    let path = expand_user(path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::History {
                path,
                reason: "history file does not exist".into(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents).map_err(|e| Error::History {
        path,
        reason: format!("malformed history: {}", e),
    })
}

/// Overwrite the history file with the given indices.
///
/// Writes to a temp file in the same directory and renames it over the
/// original, so a crash never leaves a half-written history behind.
pub fn save_history(path: &Path, indices: &[usize]) -> Result<()> {
    let path = expand_user(path);
    let temp = NamedTempFile::new_in(parent_dir(&path))?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(indices)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("saved history of {} indices to {:?}", indices.len(), path);
    Ok(())
}

/// Record a selected index, dropping the oldest entry once the bound is
/// exceeded. Pure in-memory update; no I/O.
pub fn record_use(history: &mut Vec<usize>, index: usize, bound: usize) {
    history.push(index);
    if history.len() > bound {
        history.remove(0);
    }
}
