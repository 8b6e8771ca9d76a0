// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Snow-Report: ski resort conditions with day-by-day history
//!
//! This crate provides the backend API for the snow conditions dashboard.
//! Upstream conditions are fetched at most once per request per day and
//! each response is kept as a dated snapshot, so history can be rebuilt
//! from an API that only reports current state.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SnapshotStore;
use services::{HistoryService, ResortCatalog, SnowClient, SnowService, WeatherClient};
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub snow_service: SnowService,
    pub history_service: HistoryService,
    pub weather_client: WeatherClient,
    pub catalog: ResortCatalog,
}

impl AppState {
    /// Wire the services around a snapshot store and clock.
    pub fn new(
        config: Config,
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        catalog: ResortCatalog,
    ) -> Self {
        let client = SnowClient::new(
            config.snow_api_base_url.clone(),
            config.snow_api_host.clone(),
            config.snow_api_key.clone(),
        );
        Self {
            snow_service: SnowService::new(client, store.clone(), clock.clone()),
            history_service: HistoryService::new(store, clock),
            weather_client: WeatherClient::new(config.weather_archive_url.clone()),
            catalog,
            config,
        }
    }
}
