// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ski season date windows (Oct 1 – Apr 30).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const SEASON_START_MONTH: u32 = 10;
const SEASON_END_MONTH: u32 = 4;
const SEASON_END_DAY: u32 = 30;

/// This season and the one before it, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeasonWindow {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub this_season_start: NaiveDate,
    /// Today while the season is running, otherwise the closing day
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub this_season_end: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_season_start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_season_end: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub days_into_season: i64,
}

impl SeasonWindow {
    /// Work out the season windows as seen from `today`.
    ///
    /// Between May and September the "current" season is the one that just
    /// finished.
    pub fn current(today: NaiveDate) -> Self {
        let month = today.month();
        let start_year = if month >= SEASON_START_MONTH {
            today.year()
        } else {
            today.year() - 1
        };
        let off_season = month > SEASON_END_MONTH && month < SEASON_START_MONTH;

        let this_season_start = season_start(start_year);
        let this_season_end = if off_season {
            season_end(start_year + 1)
        } else {
            today
        };

        Self {
            this_season_start,
            this_season_end,
            last_season_start: season_start(start_year - 1),
            last_season_end: season_end(start_year),
            days_into_season: (this_season_end - this_season_start).num_days(),
        }
    }

    /// `"2024-2025"` style label for the season starting in `start`'s year.
    pub fn label(start: NaiveDate) -> String {
        format!("{}-{}", start.year(), start.year() + 1)
    }
}

fn season_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, 1).unwrap_or_default()
}

fn season_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, SEASON_END_MONTH, SEASON_END_DAY).unwrap_or_default()
}
