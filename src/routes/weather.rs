// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference catalog and archive weather routes.

use crate::error::{AppError, Result};
use crate::models::{DailyWeather, PressurePeriod, ResortInfo, SeasonWindow, StormPeriod};
use crate::services::catalog::OrganizedCatalog;
use crate::services::seasons::SeasonComparison;
use crate::services::storms::{
    cumulative_snowfall, detect_low_pressure_periods, detect_storm_periods,
    DEFAULT_STORM_THRESHOLD,
};
use crate::time_utils::cap_range;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest archive range served in one request.
const MAX_RANGE_DAYS: i64 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/catalog", get(get_catalog))
        .route("/api/seasons", get(get_seasons))
        .route("/api/weather", get(get_weather))
        .route("/api/weather/seasons", get(get_season_comparison))
}

/// Catalog entry by name, with coordinates.
fn locate(state: &AppState, name: &str) -> Result<(ResortInfo, f64, f64)> {
    let resort = state
        .catalog
        .find_by_name(name)
        .ok_or_else(|| AppError::NotFound(format!("Resort {} not found", name)))?;
    let (lat, lng) = resort
        .coordinates()
        .ok_or_else(|| AppError::BadRequest(format!("Resort {} has no coordinates", name)))?;
    Ok((resort.clone(), lat, lng))
}

// ─── Catalog ─────────────────────────────────────────────────

/// Ski areas grouped by country and region.
async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<OrganizedCatalog> {
    Json(state.catalog.organized())
}

// ─── Seasons ─────────────────────────────────────────────────

async fn get_seasons(State(state): State<Arc<AppState>>) -> Json<SeasonWindow> {
    Json(SeasonWindow::current(state.snow_service.clock().today()))
}

// ─── Archive Weather ─────────────────────────────────────────

#[derive(Deserialize)]
struct WeatherQuery {
    resort: String,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherResponse {
    pub resort: ResortInfo,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: NaiveDate,
    /// The requested range was longer than a year and was shortened
    pub capped: bool,
    pub days: Vec<DailyWeather>,
    pub cumulative_snowfall: Vec<f64>,
    pub storms: Vec<StormPeriod>,
    pub low_pressure: Vec<PressurePeriod>,
}

/// Daily archive weather for a catalog resort.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>> {
    let Query(params) = query?;
    let (resort, lat, lng) = locate(&state, &params.resort)?;
    if params.start > params.end {
        return Err(AppError::BadRequest(format!(
            "start {} is after end {}",
            params.start, params.end
        )));
    }

    let (end, capped) = cap_range(params.start, params.end, MAX_RANGE_DAYS);
    if capped {
        tracing::info!(
            resort = %resort.name,
            requested_end = %params.end,
            end = %end,
            "Capping weather range"
        );
    }

    let days = state
        .weather_client
        .fetch_daily(lat, lng, params.start, end)
        .await?;

    Ok(Json(WeatherResponse {
        cumulative_snowfall: cumulative_snowfall(&days),
        storms: detect_storm_periods(&days, DEFAULT_STORM_THRESHOLD),
        low_pressure: detect_low_pressure_periods(&days),
        resort,
        start: params.start,
        end,
        capped,
        days,
    }))
}

// ─── Season Comparison ───────────────────────────────────────

#[derive(Deserialize)]
struct ResortQuery {
    resort: String,
}

/// This season against last season, aligned by day of season.
async fn get_season_comparison(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ResortQuery>, QueryRejection>,
) -> Result<Json<SeasonComparison>> {
    let Query(params) = query?;
    let (_, lat, lng) = locate(&state, &params.resort)?;
    let window = SeasonWindow::current(state.snow_service.clock().today());

    let (this, last) = tokio::try_join!(
        state.weather_client.fetch_daily(
            lat,
            lng,
            window.this_season_start,
            window.this_season_end
        ),
        state.weather_client.fetch_daily(
            lat,
            lng,
            window.last_season_start,
            window.last_season_end
        ),
    )?;

    Ok(Json(SeasonComparison::new(window, this, last)))
}
