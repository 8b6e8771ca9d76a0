// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Period detection over daily series: storms, low pressure, running totals.
//!
//! All functions expect input already in chronological order.

use chrono::NaiveDate;

use crate::models::{DailyWeather, PressurePeriod, ResortSeriesEntry, StormPeriod};

/// Snowfall or precipitation (inches) at or above this marks a storm day.
pub const DEFAULT_STORM_THRESHOLD: f64 = 0.5;

/// A day that can be tested for storm conditions.
pub trait StormDay {
    fn date(&self) -> NaiveDate;
    fn snowfall(&self) -> f64;
    fn precipitation(&self) -> f64;
}

impl StormDay for DailyWeather {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn snowfall(&self) -> f64 {
        self.snowfall.unwrap_or(0.0)
    }

    fn precipitation(&self) -> f64 {
        self.precipitation.unwrap_or(0.0)
    }
}

/// Snapshot series only carry 24h snowfall.
impl StormDay for ResortSeriesEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn snowfall(&self) -> f64 {
        self.record.new_snow_inches()
    }

    fn precipitation(&self) -> f64 {
        0.0
    }
}

/// True when `date` is the calendar day after `end`.
fn follows(end: NaiveDate, date: NaiveDate) -> bool {
    end.succ_opt() == Some(date)
}

/// Group consecutive storm days into periods with summed snowfall.
///
/// Days must be adjacent on the calendar, not just in the slice: a gap in the
/// series (a day with no sample) ends the open period. A period still open at
/// the end of the series closes on its last day.
pub fn detect_storm_periods<T: StormDay>(series: &[T], threshold: f64) -> Vec<StormPeriod> {
    let mut periods = Vec::new();
    let mut current: Option<StormPeriod> = None;

    for day in series {
        let is_storm = day.snowfall() >= threshold || day.precipitation() >= threshold;
        if current.as_ref().is_some_and(|p| !follows(p.end, day.date())) {
            periods.extend(current.take());
        }

        if !is_storm {
            periods.extend(current.take());
        } else if let Some(period) = current.as_mut() {
            period.end = day.date();
            period.total_snowfall += day.snowfall();
        } else {
            current = Some(StormPeriod {
                start: day.date(),
                end: day.date(),
                total_snowfall: day.snowfall(),
            });
        }
    }

    periods.extend(current);
    periods
}

/// Runs of days whose pressure is below the series mean.
///
/// Days without a pressure reading are left out of the mean and break a run,
/// as do gaps between dates.
pub fn detect_low_pressure_periods(series: &[DailyWeather]) -> Vec<PressurePeriod> {
    let readings: Vec<f64> = series.iter().filter_map(|d| d.pressure).collect();
    if readings.is_empty() {
        return Vec::new();
    }
    let mean = readings.iter().sum::<f64>() / readings.len() as f64;

    let mut periods = Vec::new();
    let mut current: Option<PressurePeriod> = None;

    for day in series {
        let is_low = day.pressure.is_some_and(|p| p < mean);
        if current.as_ref().is_some_and(|p| !follows(p.end, day.date)) {
            periods.extend(current.take());
        }

        if !is_low {
            periods.extend(current.take());
        } else if let Some(period) = current.as_mut() {
            period.end = day.date;
        } else {
            current = Some(PressurePeriod {
                start: day.date,
                end: day.date,
            });
        }
    }

    periods.extend(current);
    periods
}

/// Running snowfall total; missing days add nothing.
pub fn cumulative_snowfall(series: &[DailyWeather]) -> Vec<f64> {
    series
        .iter()
        .scan(0.0, |total, day| {
            *total += day.snowfall.unwrap_or(0.0);
            Some(*total)
        })
        .collect()
}
