// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Historical weather archive client (Open-Meteo).
//!
//! Responses are memoized in memory for an hour, keyed by the exact request.
//! Expired entries are swept whenever a new response is stored.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::DailyWeather;

/// How long an archive response is reused.
const MEMO_TTL_SECS: i64 = 60 * 60;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,temperature_2m_mean,\
precipitation_sum,snowfall_sum,snow_depth_max,wind_speed_10m_max,wind_gusts_10m_max,\
pressure_msl_mean";

/// Memo key: coordinates are compared by their bit patterns.
type MemoKey = (u64, u64, NaiveDate, NaiveDate);

#[derive(Clone)]
struct MemoEntry {
    days: Vec<DailyWeather>,
    expires_at: DateTime<Utc>,
}

/// Archive API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    archive_url: String,
    memo: Arc<DashMap<MemoKey, MemoEntry>>,
}

impl WeatherClient {
    pub fn new(archive_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            archive_url,
            memo: Arc::new(DashMap::new()),
        }
    }

    /// Daily aggregates for a coordinate over `[start, end]`, oldest first.
    pub async fn fetch_daily(
        &self,
        lat: f64,
        lng: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeather>, AppError> {
        let key = (lat.to_bits(), lng.to_bits(), start, end);
        let now = Utc::now();

        if let Some(entry) = self.memo.get(&key) {
            if entry.expires_at > now {
                tracing::debug!(lat, lng, %start, %end, "Using memoized archive response");
                return Ok(entry.days.clone());
            }
        }

        tracing::info!(lat, lng, %start, %end, "Fetching archive weather");
        let response = self
            .http
            .get(&self.archive_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lng.to_string()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("precipitation_unit", "inch".to_string()),
                ("timezone", "America/Denver".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("HTTP {}: {}", status, body)));
        }

        let archive: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("JSON parse error: {}", e)))?;
        let days = archive.daily.into_days()?;

        self.evict_expired(now);
        self.memo.insert(
            key,
            MemoEntry {
                days: days.clone(),
                expires_at: now + Duration::seconds(MEMO_TTL_SECS),
            },
        );
        Ok(days)
    }

    fn evict_expired(&self, now: DateTime<Utc>) {
        let before = self.memo.len();
        self.memo.retain(|_, entry| entry.expires_at > now);
        let evicted = before.saturating_sub(self.memo.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted expired archive responses");
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: ArchiveDaily,
}

/// Column-oriented daily block; every column is parallel to `time`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArchiveDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    temperature_2m_mean: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    snowfall_sum: Vec<Option<f64>>,
    snow_depth_max: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
    wind_gusts_10m_max: Vec<Option<f64>>,
    pressure_msl_mean: Vec<Option<f64>>,
}

impl ArchiveDaily {
    fn into_days(self) -> Result<Vec<DailyWeather>, AppError> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    AppError::WeatherApi(format!("Invalid archive date {:?}: {}", raw, e))
                })?;
                Ok(DailyWeather {
                    date,
                    temp_max: at(&self.temperature_2m_max, i),
                    temp_min: at(&self.temperature_2m_min, i),
                    temp_mean: at(&self.temperature_2m_mean, i),
                    precipitation: at(&self.precipitation_sum, i),
                    snowfall: at(&self.snowfall_sum, i),
                    snow_depth: at(&self.snow_depth_max, i),
                    wind_speed_max: at(&self.wind_speed_10m_max, i),
                    wind_gusts_max: at(&self.wind_gusts_10m_max, i),
                    pressure: at(&self.pressure_msl_mean, i),
                })
            })
            .collect()
    }
}

/// Value at `i`, treating short columns as missing data.
fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}
