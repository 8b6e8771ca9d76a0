// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod dashboard;
pub mod history;
pub mod seasons;
pub mod snow;
pub mod storms;
pub mod weather;

pub use catalog::{CatalogError, OrganizedCatalog, ResortCatalog};
pub use dashboard::{ResortFilter, ScoredResort, SortMode};
pub use history::HistoryService;
pub use seasons::{SeasonComparison, SeasonSeries};
pub use snow::{FetchOutcome, SnowClient, SnowService};
pub use storms::{
    cumulative_snowfall, detect_low_pressure_periods, detect_storm_periods, StormDay,
    DEFAULT_STORM_THRESHOLD,
};
pub use weather::WeatherClient;
