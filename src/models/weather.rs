// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily weather from the historical archive, and the periods derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One day of archive data. Units: °F, inches, mph, hPa.
///
/// The archive reports `null` for days it has no observation for, so every
/// measurement is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyWeather {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_mean: Option<f64>,
    pub precipitation: Option<f64>,
    pub snowfall: Option<f64>,
    pub snow_depth: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub wind_gusts_max: Option<f64>,
    pub pressure: Option<f64>,
}

/// A run of consecutive storm days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StormPeriod {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: NaiveDate,
    /// Summed snowfall over the period
    pub total_snowfall: f64,
}

impl StormPeriod {
    /// Single-day storms are not shaded on charts.
    pub fn is_multi_day(&self) -> bool {
        self.start != self.end
    }
}

/// A run of days with below-average pressure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PressurePeriod {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: NaiveDate,
}
