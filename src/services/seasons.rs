// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! This-season vs last-season snowfall comparison.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{DailyWeather, SeasonWindow};
use crate::services::storms::cumulative_snowfall;

/// One day of a season, positioned by its offset from Oct 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeasonDay {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub day_of_season: i64,
    pub weather: DailyWeather,
    /// Snowfall since the start of the season
    pub cumulative_snowfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeasonSeries {
    /// e.g. "2024-2025"
    pub label: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: NaiveDate,
    pub days: Vec<SeasonDay>,
    pub total_snowfall: f64,
}

impl SeasonSeries {
    pub fn new(start: NaiveDate, end: NaiveDate, weather: Vec<DailyWeather>) -> Self {
        let cumulative = cumulative_snowfall(&weather);
        let total_snowfall = cumulative.last().copied().unwrap_or(0.0);
        let days = weather
            .into_iter()
            .zip(cumulative)
            .map(|(weather, cumulative_snowfall)| SeasonDay {
                day_of_season: (weather.date - start).num_days(),
                weather,
                cumulative_snowfall,
            })
            .collect();

        Self {
            label: SeasonWindow::label(start),
            start,
            end,
            days,
            total_snowfall,
        }
    }

    /// Running total as of `day_of_season` (0 before the first recorded day).
    pub fn total_at(&self, day_of_season: i64) -> f64 {
        self.days
            .iter()
            .take_while(|d| d.day_of_season <= day_of_season)
            .last()
            .map(|d| d.cumulative_snowfall)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeasonComparison {
    pub window: SeasonWindow,
    pub this_season: SeasonSeries,
    pub last_season: SeasonSeries,
    /// Last season's running total at today's day of season
    pub last_season_at_equivalent_day: f64,
    /// Percent change vs the equivalent day; `None` when that total is zero
    pub year_over_year_percent: Option<f64>,
}

impl SeasonComparison {
    pub fn new(window: SeasonWindow, this: Vec<DailyWeather>, last: Vec<DailyWeather>) -> Self {
        let this_season = SeasonSeries::new(window.this_season_start, window.this_season_end, this);
        let last_season = SeasonSeries::new(window.last_season_start, window.last_season_end, last);

        let at_equivalent = last_season.total_at(window.days_into_season);
        let year_over_year_percent = (at_equivalent > 0.0)
            .then(|| (this_season.total_snowfall - at_equivalent) / at_equivalent * 100.0);

        Self {
            window,
            this_season,
            last_season,
            last_season_at_equivalent_day: at_equivalent,
            year_over_year_percent,
        }
    }
}
