// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Historical assembly from daily snapshots.
//!
//! The snow API only reports current conditions. Because every fetch is
//! recorded under its calendar day, reading back the days stored for a key
//! yields a time series. Days without a snapshot are omitted rather than
//! zero-filled, so charts show non-contiguous dates.

use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use crate::db::{SnapshotStore, StoreError};
use crate::models::{HistoricalEntry, ResortRecord, ResortSeriesEntry};
use crate::time_utils::Clock;

/// Reads date windows out of the snapshot store.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Snapshots for each day in `[start, end]` that has one, oldest first.
    ///
    /// Days after today are never visited. Only days the store has recorded
    /// are read, so the cost does not grow with the width of the window.
    pub fn get_range(
        &self,
        key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoricalEntry>, StoreError> {
        let end = end.min(self.clock.today());
        let mut entries = Vec::new();
        if start > end {
            return Ok(entries);
        }

        let recorded = self.store.days(key)?;
        for date in recorded.into_iter().filter(|d| (start..=end).contains(d)) {
            if let Some(snapshot) = self.store.get(key, date)? {
                entries.push(HistoricalEntry {
                    date,
                    data: snapshot.data,
                });
            }
        }

        tracing::debug!(key, %start, %end, found = entries.len(), "Assembled history");
        Ok(entries)
    }

    /// The last `days` days, ending today.
    ///
    /// A window reaching past the earliest representable date starts there.
    pub fn get_n_days(&self, key: &str, days: u32) -> Result<Vec<HistoricalEntry>, StoreError> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let today = self.clock.today();
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        self.get_range(key, start, today)
    }

    /// Yesterday's payload, if it was captured.
    pub fn get_yesterday(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let yesterday = self.clock.today() - Duration::days(1);
        Ok(self.store.get(key, yesterday)?.map(|snapshot| snapshot.data))
    }

    /// One resort's records across the last `days` days.
    ///
    /// Days where the resort is absent from the snapshot are dropped.
    pub fn extract_resort_series(
        &self,
        key: &str,
        resort_id: &str,
        days: u32,
    ) -> Result<Vec<ResortSeriesEntry>, StoreError> {
        Ok(self
            .get_n_days(key, days)?
            .into_iter()
            .filter_map(|entry| {
                ResortRecord::find_in_value(&entry.data, resort_id).map(|record| {
                    ResortSeriesEntry {
                        date: entry.date,
                        record,
                    }
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySnapshotStore;
    use crate::time_utils::FixedClock;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(today: NaiveDate) -> (HistoryService, MemorySnapshotStore) {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at_day(today));
        let store = MemorySnapshotStore::new(clock.clone());
        let service = HistoryService::new(Arc::new(store.clone()), clock);
        (service, store)
    }

    #[test]
    fn test_get_range_skips_gaps_in_order() {
        let (history, store) = setup(day(2025, 1, 10));
        store.put("k", day(2025, 1, 8), &json!("c")).unwrap();
        store.put("k", day(2025, 1, 3), &json!("a")).unwrap();
        store.put("k", day(2025, 1, 5), &json!("b")).unwrap();
        store.put("k", day(2025, 1, 1), &json!("outside")).unwrap();

        let entries = history.get_range("k", day(2025, 1, 2), day(2025, 1, 9)).unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();

        assert_eq!(dates, vec![day(2025, 1, 3), day(2025, 1, 5), day(2025, 1, 8)]);
        assert_eq!(entries[0].data, json!("a"));
    }

    #[test]
    fn test_get_range_never_looks_past_today() {
        let (history, store) = setup(day(2025, 1, 10));
        store.put("k", day(2025, 1, 11), &json!("future")).unwrap();

        let entries = history.get_range("k", day(2025, 1, 1), day(2025, 1, 31)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_get_range_inverted_is_empty() {
        let (history, store) = setup(day(2025, 1, 10));
        store.put("k", day(2025, 1, 5), &json!(1)).unwrap();

        assert!(history
            .get_range("k", day(2025, 1, 6), day(2025, 1, 4))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_get_n_days_window_ends_today() {
        let (history, store) = setup(day(2025, 1, 10));
        store.put("k", day(2025, 1, 10), &json!("today")).unwrap();
        store.put("k", day(2025, 1, 8), &json!("edge")).unwrap();
        store.put("k", day(2025, 1, 7), &json!("too old")).unwrap();

        let entries = history.get_n_days("k", 3).unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(2025, 1, 8), day(2025, 1, 10)]);

        assert!(history.get_n_days("k", 0).unwrap().is_empty());
    }

    #[test]
    fn test_get_n_days_huge_window() {
        let (history, store) = setup(day(2025, 1, 10));
        store.put("k", day(2024, 6, 1), &json!("old")).unwrap();
        store.put("k", day(2025, 1, 10), &json!("today")).unwrap();

        let entries = history.get_n_days("k", u32::MAX).unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(2024, 6, 1), day(2025, 1, 10)]);

        assert!(history
            .extract_resort_series("k", "vail", u32::MAX)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_get_yesterday() {
        let (history, store) = setup(day(2025, 1, 10));
        assert_eq!(history.get_yesterday("k").unwrap(), None);

        store.put("k", day(2025, 1, 9), &json!({"v": 1})).unwrap();
        assert_eq!(history.get_yesterday("k").unwrap(), Some(json!({"v": 1})));
    }

    #[test]
    fn test_extract_resort_series_drops_missing_days() {
        let (history, store) = setup(day(2025, 1, 10));
        store
            .put(
                "k",
                day(2025, 1, 8),
                &json!([{"id": "vail", "resort": "Vail", "snowfall24h": "2"}]),
            )
            .unwrap();
        store
            .put("k", day(2025, 1, 9), &json!([{"id": "aspen", "resort": "Aspen"}]))
            .unwrap();
        store
            .put(
                "k",
                day(2025, 1, 10),
                &json!([{"id": "aspen"}, {"id": "vail", "resort": "Vail", "snowfall24h": "5\""}]),
            )
            .unwrap();

        let series = history.extract_resort_series("k", "vail", 30).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, day(2025, 1, 8));
        assert_eq!(series[1].date, day(2025, 1, 10));
        assert_eq!(series[1].record.new_snow_inches(), 5.0);
    }
}
