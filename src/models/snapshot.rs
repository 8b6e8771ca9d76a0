// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached snapshot payloads and the series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ResortRecord;

/// One cached upstream response, as persisted on disk.
///
/// Stored at: `{cache_dir}/{urlencoded key}_{YYYY-MM-DD}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture time (RFC3339, UTC)
    pub timestamp: String,
    /// Opaque upstream payload
    pub data: serde_json::Value,
}

/// A day's snapshot in a historical window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEntry {
    pub date: NaiveDate,
    pub data: serde_json::Value,
}

/// A single resort's conditions on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResortSeriesEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub record: ResortRecord,
}
