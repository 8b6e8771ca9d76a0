// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory snapshot store (tests and ephemeral deployments).

use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use crate::config::DEFAULT_RETENTION_DAYS;
use crate::db::{is_expired, SnapshotStore, StoreError};
use crate::models::Snapshot;
use crate::time_utils::{format_utc_rfc3339, Clock};

/// Snapshot store held in a concurrent map. Contents die with the process.
#[derive(Clone)]
pub struct MemorySnapshotStore {
    entries: Arc<DashMap<(String, NaiveDate), Snapshot>>,
    retention_days: i64,
    clock: Arc<dyn Clock>,
}

impl MemorySnapshotStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            retention_days: DEFAULT_RETENTION_DAYS,
            clock,
        }
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    /// Total entries across all keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, key: &str, day: NaiveDate) -> Result<Option<Snapshot>, StoreError> {
        Ok(self
            .entries
            .get(&(key.to_string(), day))
            .map(|entry| entry.value().clone()))
    }

    fn put(
        &self,
        key: &str,
        day: NaiveDate,
        payload: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            timestamp: format_utc_rfc3339(self.clock.now()),
            data: payload.clone(),
        };
        self.entries.insert((key.to_string(), day), snapshot);
        self.prune(key)?;
        Ok(())
    }

    fn prune(&self, key: &str) -> Result<usize, StoreError> {
        let today = self.clock.today();
        let before = self.entries.len();
        self.entries
            .retain(|(k, day), _| k != key || !is_expired(*day, today, self.retention_days));
        Ok(before.saturating_sub(self.entries.len()))
    }

    fn days(&self, key: &str) -> Result<Vec<NaiveDate>, StoreError> {
        let mut days: Vec<NaiveDate> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == key)
            .map(|entry| entry.key().1)
            .collect();
        days.sort_unstable();
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::FixedClock;
    use serde_json::json;

    #[test]
    fn test_prune_only_touches_own_key() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let clock = Arc::new(FixedClock::at_day(today));
        let store = MemorySnapshotStore::new(clock);
        let old = today - chrono::Duration::days(40);

        store.entries.insert(
            ("a".to_string(), old),
            Snapshot {
                timestamp: String::new(),
                data: json!(1),
            },
        );
        store.entries.insert(
            ("b".to_string(), old),
            Snapshot {
                timestamp: String::new(),
                data: json!(2),
            },
        );

        assert_eq!(store.prune("a").unwrap(), 1);
        assert_eq!(store.days("a").unwrap(), Vec::<NaiveDate>::new());
        assert_eq!(store.days("b").unwrap(), vec![old]);
    }
}
