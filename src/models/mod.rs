// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod catalog;
pub mod resort;
pub mod score;
pub mod season;
pub mod snapshot;
pub mod weather;

pub use catalog::ResortInfo;
pub use resort::{OpenRatio, RatioError, ResortRecord};
pub use score::{aggregate_score, grade, overall_score, percent_open, AggregateScore, Grade};
pub use season::SeasonWindow;
pub use snapshot::{HistoricalEntry, ResortSeriesEntry, Snapshot};
pub use weather::{DailyWeather, PressurePeriod, StormPeriod};
