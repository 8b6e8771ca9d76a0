// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snow conditions routes: current state, yesterday, and per-resort history.

use crate::error::{AppError, Result};
use crate::models::{
    aggregate_score, AggregateScore, Grade, HistoricalEntry, ResortSeriesEntry, StormPeriod,
};
use crate::services::dashboard::{self, ResortFilter, ScoredResort, SortMode};
use crate::services::snow::{cache_key, state_params, FetchOutcome, SNOW_BY_STATE_PATH};
use crate::services::storms::{detect_storm_periods, DEFAULT_STORM_THRESHOLD};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_HISTORY_DAYS: u32 = 30;
const MAX_HISTORY_DAYS: u32 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/states", get(get_states))
        .route("/api/snow", get(get_snow))
        .route("/api/snow/yesterday", get(get_yesterday))
        .route("/api/history/{resort_id}", get(get_history))
}

fn require_state(state: Option<String>) -> Result<String> {
    state
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required parameter: state".to_string()))
}

// ─── States ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatesResponse {
    pub rate_limited: bool,
    pub states: Vec<String>,
}

/// Distinct states known to the snow API, sorted.
async fn get_states(State(state): State<Arc<AppState>>) -> Result<Json<StatesResponse>> {
    let outcome = state.snow_service.resort_ids().await?;

    let states: BTreeSet<String> = outcome
        .payload()
        .and_then(|payload| payload.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("state").and_then(|s| s.as_str()))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(StatesResponse {
        rate_limited: outcome.is_rate_limited(),
        states: states.into_iter().collect(),
    }))
}

// ─── Current Conditions ──────────────────────────────────────

#[derive(Deserialize)]
struct SnowQuery {
    state: Option<String>,
    /// Case-insensitive resort name substring
    #[serde(default)]
    search: String,
    /// Comma-separated grades, e.g. `A+,B`
    grades: Option<String>,
    #[serde(default)]
    new_snow: bool,
    sort: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SnowResponse {
    pub state: String,
    pub rate_limited: bool,
    /// Served from today's snapshot rather than a fresh call
    pub cached: bool,
    /// Computed over every resort in the state, before filtering
    pub aggregate: AggregateScore,
    pub resorts: Vec<ScoredResort>,
}

/// Parse a comma-separated grade list.
///
/// A literal `+` in a query string decodes to a space, so `A ` is read as `A+`.
fn parse_grades(raw: &str) -> Result<HashSet<Grade>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let part = part.trim_start();
            let normalized = match part.strip_suffix(' ') {
                Some(base) if base.trim().eq_ignore_ascii_case("a") => "A+".to_string(),
                _ => part.trim().to_string(),
            };
            normalized.parse::<Grade>().map_err(AppError::BadRequest)
        })
        .collect()
}

/// Current conditions for a state, filtered and sorted for display.
async fn get_snow(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<SnowQuery>, QueryRejection>,
) -> Result<Json<SnowResponse>> {
    let Query(params) = query?;
    let us_state = require_state(params.state)?;
    let grades = match params.grades.as_deref() {
        Some(raw) => parse_grades(raw)?,
        None => HashSet::new(),
    };
    let sort_mode = match params.sort.as_deref() {
        Some(raw) => raw.parse::<SortMode>().map_err(AppError::BadRequest)?,
        None => SortMode::default(),
    };

    let outcome = state.snow_service.snow_by_state(&us_state).await?;
    let cached = matches!(outcome, FetchOutcome::Data { cached: true, .. });
    let resorts = outcome.resorts();
    let aggregate = aggregate_score(&resorts);

    let filter = ResortFilter {
        search: params.search,
        grades,
        require_new_snow: params.new_snow,
    };
    let mut resorts = dashboard::filter(resorts, &filter);
    dashboard::sort(&mut resorts, sort_mode);

    tracing::debug!(
        state = %us_state,
        shown = resorts.len(),
        total = aggregate.resort_count,
        "Serving snow conditions"
    );

    Ok(Json(SnowResponse {
        state: us_state,
        rate_limited: outcome.is_rate_limited(),
        cached,
        aggregate,
        resorts: resorts.into_iter().map(ScoredResort::from).collect(),
    }))
}

// ─── Yesterday ───────────────────────────────────────────────

#[derive(Deserialize)]
struct StateQuery {
    state: Option<String>,
}

/// Yesterday's snapshot for a state, if one was captured.
async fn get_yesterday(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<StateQuery>, QueryRejection>,
) -> Result<Json<HistoricalEntry>> {
    let Query(params) = query?;
    let us_state = require_state(params.state)?;
    let key = cache_key(SNOW_BY_STATE_PATH, &state_params(&us_state));

    let data = state
        .history_service
        .get_yesterday(&key)?
        .ok_or_else(|| AppError::NotFound(format!("No snapshot from yesterday for {}", us_state)))?;

    Ok(Json(HistoricalEntry {
        date: state.snow_service.clock().today() - Duration::days(1),
        data,
    }))
}

// ─── Resort History ──────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    state: Option<String>,
    #[serde(default = "default_history_days")]
    days: u32,
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryResponse {
    pub resort_id: String,
    pub state: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub days: u32,
    /// One entry per day that has a snapshot containing the resort
    pub series: Vec<ResortSeriesEntry>,
    pub storms: Vec<StormPeriod>,
}

/// A resort's daily records rebuilt from cached snapshots.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(resort_id): Path<String>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>> {
    let Query(params) = query?;
    let us_state = require_state(params.state)?;
    if !(1..=MAX_HISTORY_DAYS).contains(&params.days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_HISTORY_DAYS
        )));
    }

    let key = cache_key(SNOW_BY_STATE_PATH, &state_params(&us_state));
    let series = state
        .history_service
        .extract_resort_series(&key, &resort_id, params.days)?;
    let storms = detect_storm_periods(&series, DEFAULT_STORM_THRESHOLD);

    Ok(Json(HistoryResponse {
        resort_id,
        state: us_state,
        days: params.days,
        series,
        storms,
    }))
}
