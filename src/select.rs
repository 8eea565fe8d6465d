//! Random message selection with repeat avoidance.
//!
//! Selection draws uniformly from the store and rejects indices recorded in
//! the persisted history, bounded by a configured number of tries. The
//! pool-to-history ratio checks are heuristics logged for visibility; only
//! running out of tries is an error.

use crate::history::{load_history, record_use, save_history};
use crate::paths::expand_user;
use crate::store::MessageStore;
use crate::{Error, Result};
use rand::Rng;
use std::path::Path;

/// Parameters for one random selection
#[derive(Clone, Debug)]
pub struct SelectionOptions {
    /// How many recently returned indices to remember and avoid
    pub history: usize,
    /// Log a warning when a selection needed at least this many tries
    pub warn_after_tries: u32,
    /// Give up after this many tries
    pub max_tries: u32,
}

impl SelectionOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_tries == 0 {
            return Err(Error::Config("max_tries must be at least 1".into()));
        }
        Ok(())
    }
}

/// Pick a random message whose index is not in recent history.
///
/// Loads the history side file (which must already exist), draws indices
/// until one falls outside it, records the chosen index back into the
/// bounded history, persists it, and returns the message text.
pub fn pick_unused(
    store: &MessageStore,
    history_path: &Path,
    opts: &SelectionOptions,
    rng: &mut impl Rng,
) -> Result<String> {
    opts.validate()?;
    let history_path = expand_user(history_path);
    let mut used = load_history(&history_path)?;
    let total = store.count()?;
    if total == 0 {
        return Err(Error::EmptyStore(store.path().to_path_buf()));
    }

    // With fewer messages than history entries the pool will run dry
    if total <= opts.history {
        tracing::warn!(
            "history is too long for the pool: history {}, messages {}",
            opts.history,
            total
        );
    // With at least twice as many messages as history entries an unused
    // message is found quickly
    } else if total < 2 * opts.history {
        tracing::info!(
            "history is quite long for the pool: history {}, messages {}",
            opts.history,
            total
        );
    }

    let mut tries: u32 = 0;
    let index = loop {
        let candidate = rng.gen_range(0..total);
        tries += 1;
        if !used.contains(&candidate) {
            break candidate;
        }
        if tries >= opts.max_tries {
            return Err(Error::Exhausted { tries });
        }
    };
    if tries >= opts.warn_after_tries {
        tracing::warn!("needed {} tries to get a message", tries);
    }

    record_use(&mut used, index, opts.history);
    save_history(&history_path, &used)?;
    store.get(index as i64)
}
