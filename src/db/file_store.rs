// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-per-day snapshot store.
//!
//! Layout: `{dir}/{urlencoded key}_{YYYY-MM-DD}.json`, each file holding
//! `{"timestamp": "...", "data": ...}`. Keys whose encoding is longer than
//! [`MAX_ENCODED_KEY_LEN`] are stored as `{encoded prefix}#{sha256 of key}`
//! so names stay under common filesystem limits. There is no index; every
//! lookup goes to the filesystem. Writes replace whole files (tmp + rename), so a
//! concurrent writer can at worst overwrite a same-day entry.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DEFAULT_RETENTION_DAYS;
use crate::db::{is_expired, SnapshotStore, StoreError};
use crate::models::Snapshot;
use crate::time_utils::{format_utc_rfc3339, Clock};

const EXTENSION: &str = ".json";
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Longest encoded key used verbatim in a file name.
pub const MAX_ENCODED_KEY_LEN: usize = 200;
/// Readable prefix kept in front of the digest for long keys.
const HASHED_PREFIX_LEN: usize = 100;

/// Snapshot store backed by a directory of JSON files.
#[derive(Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    retention_days: i64,
    clock: Arc<dyn Clock>,
}

impl FileSnapshotStore {
    /// Create a store rooted at `dir`. The directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            retention_days: DEFAULT_RETENTION_DAYS,
            clock,
        }
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name stem identifying `key`.
    ///
    /// `#` is always percent-encoded, so a hashed stem can't equal the plain
    /// encoding of some other key.
    fn key_stem(key: &str) -> Cow<'_, str> {
        let encoded = urlencoding::encode(key);
        if encoded.len() <= MAX_ENCODED_KEY_LEN {
            return encoded;
        }
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        Cow::Owned(format!("{}#{}", &encoded[..HASHED_PREFIX_LEN], digest))
    }

    /// Deterministic file name for a key and day.
    pub fn file_name(key: &str, day: NaiveDate) -> String {
        format!(
            "{}_{}{}",
            Self::key_stem(key),
            day.format(DAY_FORMAT),
            EXTENSION
        )
    }

    /// Split a file name back into its key stem and day.
    ///
    /// The stem never contains a literal `_`-date suffix, so the last `_`
    /// always separates the two.
    fn parse_file_name(name: &str) -> Option<(&str, NaiveDate)> {
        let stem = name.strip_suffix(EXTENSION)?;
        let (encoded_key, day) = stem.rsplit_once('_')?;
        let day = NaiveDate::parse_from_str(day, DAY_FORMAT).ok()?;
        Some((encoded_key, day))
    }

    fn path_for(&self, key: &str, day: NaiveDate) -> PathBuf {
        self.dir.join(Self::file_name(key, day))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str, day: NaiveDate) -> Result<Option<Snapshot>, StoreError> {
        self.ensure_dir()?;
        let path = self.path_for(key, day);

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt snapshot, treating as missing");
                Ok(None)
            }
        }
    }

    fn put(
        &self,
        key: &str,
        day: NaiveDate,
        payload: &serde_json::Value,
    ) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.path_for(key, day);

        let snapshot = Snapshot {
            timestamp: format_utc_rfc3339(self.clock.now()),
            data: payload.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        // Write to tmp file first, then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        std::fs::rename(&tmp_path, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(key, day = %day, "Snapshot written");

        if let Err(e) = self.prune(key) {
            tracing::warn!(key, error = %e, "Snapshot pruning failed");
        }
        Ok(())
    }

    fn prune(&self, key: &str) -> Result<usize, StoreError> {
        let today = self.clock.today();
        let mut removed = 0;

        for day in self.days(key)? {
            if !is_expired(day, today, self.retention_days) {
                continue;
            }
            let path = self.path_for(key, day);
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                // Best effort; a file we can't delete now gets another chance on the next write.
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete expired snapshot")
                }
            }
        }

        if removed > 0 {
            tracing::info!(key, removed, "Pruned expired snapshots");
        }
        Ok(removed)
    }

    fn days(&self, key: &str) -> Result<Vec<NaiveDate>, StoreError> {
        self.ensure_dir()?;
        let stem = Self::key_stem(key);

        let entries = std::fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut days: Vec<NaiveDate> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                match Self::parse_file_name(name) {
                    Some((file_stem, day)) if file_stem == stem => Some(day),
                    _ => None,
                }
            })
            .collect();

        days.sort_unstable();
        Ok(days)
    }
}
