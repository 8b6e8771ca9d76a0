// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snapshot storage layer.
//!
//! Upstream responses are memoized per `(request key, calendar day)`. Each
//! day gets its own slot, so the store doubles as a daily history of an API
//! that only ever reports "now". Slots older than the retention horizon are
//! pruned on write.

pub mod file_store;
pub mod memory;

pub use file_store::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::models::Snapshot;

/// Storage backend for day-bucketed snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Entry for exactly this key and day, if one exists.
    fn get(&self, key: &str, day: NaiveDate) -> Result<Option<Snapshot>, StoreError>;

    /// Write (or overwrite) the entry for this key and day, then prune `key`.
    fn put(&self, key: &str, day: NaiveDate, payload: &serde_json::Value)
        -> Result<(), StoreError>;

    /// Remove entries for `key` older than the retention horizon.
    ///
    /// Returns the number of entries removed.
    fn prune(&self, key: &str) -> Result<usize, StoreError>;

    /// Days that currently hold an entry for `key`, ascending.
    fn days(&self, key: &str) -> Result<Vec<NaiveDate>, StoreError>;
}

/// Errors from snapshot storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `true` if `day` is more than `retention_days` before `today`.
pub(crate) fn is_expired(day: NaiveDate, today: NaiveDate, retention_days: i64) -> bool {
    (today - day).num_days() > retention_days
}
