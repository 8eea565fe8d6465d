//! High level queue operations over a message store file.
//!
//! `MessageQueue` composes the store, mutation, history, and selection
//! modules into the operation set callers use. It holds only the store
//! path; every operation re-reads what it needs from disk.

use crate::mutate::{self, PopMode};
use crate::select::{self, SelectionOptions};
use crate::store::MessageStore;
use crate::Result;
use rand::Rng;
use std::path::Path;

/// A file backed message queue
#[derive(Clone, Debug)]
pub struct MessageQueue {
    store: MessageStore,
}

impl MessageQueue {
    /// Open a queue over the given message file. A leading `~` is expanded.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            store: MessageStore::new(path),
        }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Append a message to the back of the queue
    pub fn enqueue(&self, message: &str) -> Result<()> {
        mutate::append(&self.store, message)
    }

    /// Remove and return the first message.
    ///
    /// With an archive path the removed message is appended there once the
    /// pop has been applied. Archiving is best effort: a failure is logged
    /// and the already-popped message is still returned.
    pub fn dequeue(&self, archive: Option<&Path>, mode: PopMode) -> Result<String> {
        let message = mutate::pop_front(&self.store, mode)?;
        if let Some(path) = archive {
            let archive_store = MessageStore::new(path);
            if let Err(e) = mutate::append(&archive_store, &message) {
                tracing::warn!(
                    "failed to archive dequeued message to {:?}: {}",
                    archive_store.path(),
                    e
                );
            }
        }
        Ok(message)
    }

    /// Fetch the message at `index`; negative indices count from the end
    pub fn get_indexed_message(&self, index: i64) -> Result<String> {
        self.store.get(index)
    }

    /// Fetch the messages between `start` and `end` inclusive, skipping
    /// `skip` messages between returned ones
    pub fn get_message_slice(&self, start: i64, end: i64, skip: usize) -> Result<Vec<String>> {
        self.store.slice(start, end, skip)
    }

    /// Number of messages currently in the queue
    pub fn get_nr_of_messages(&self) -> Result<usize> {
        self.store.count()
    }

    /// Pick a random message not returned recently, using the thread RNG
    pub fn get_random_message(
        &self,
        history_path: &Path,
        opts: &SelectionOptions,
    ) -> Result<String> {
        self.get_random_message_with(history_path, opts, &mut rand::thread_rng())
    }

    /// Pick a random message not returned recently, drawing from `rng`
    pub fn get_random_message_with(
        &self,
        history_path: &Path,
        opts: &SelectionOptions,
        rng: &mut impl Rng,
    ) -> Result<String> {
        select::pick_unused(&self.store, history_path, opts, rng)
    }
}
