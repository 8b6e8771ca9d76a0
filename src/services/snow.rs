// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snow conditions API client and the cache-or-fetch orchestration on top.
//!
//! Handles:
//! - Day-bucketed memoization (one remote call per request per day)
//! - Rate limit detection (HTTP 429), reported as an outcome, not an error
//! - Snapshot writes for later historical assembly

use crate::db::SnapshotStore;
use crate::error::AppError;
use crate::models::ResortRecord;
use crate::time_utils::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Conditions for all resorts in a state (`?state=`).
pub const SNOW_BY_STATE_PATH: &str = "get_snow_by_state";
/// Id/name/state listing of every resort.
pub const RESORT_IDS_PATH: &str = "get_resorts_id";

/// Query parameters, kept sorted so cache keys are deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// Normalized cache identity: `path?k=v&k=v` with keys sorted.
///
/// Names and values are percent-encoded, so a value containing `&` or `=`
/// can't impersonate a different parameter set.
pub fn cache_key(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// Raw outcome of a single upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    Json(serde_json::Value),
    RateLimited,
}

/// Snow API client.
#[derive(Clone)]
pub struct SnowClient {
    http: reqwest::Client,
    base_url: String,
    api_host: String,
    api_key: String,
}

impl SnowClient {
    /// Create a new client. `base_url` must not end with a slash.
    pub fn new(base_url: String, api_host: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_host,
            api_key,
        }
    }

    /// GET `{base_url}/{path}?{params}` and parse the JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<RemoteResponse, AppError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::SnowApi(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            tracing::warn!(path, "Snow API rate limit hit (429)");
            return Ok(RemoteResponse::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SnowApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map(RemoteResponse::Json)
            .map_err(|e| AppError::SnowApi(format!("JSON parse error: {}", e)))
    }
}

/// Result of a cache-or-fetch request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Payload from today's snapshot (`cached`) or a fresh remote call.
    Data {
        payload: serde_json::Value,
        cached: bool,
    },
    /// Upstream refused with 429. Nothing was cached.
    RateLimited,
}

impl FetchOutcome {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchOutcome::RateLimited)
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            FetchOutcome::Data { payload, .. } => Some(payload),
            FetchOutcome::RateLimited => None,
        }
    }

    /// Payload, or an empty array when rate limited.
    pub fn into_payload(self) -> serde_json::Value {
        match self {
            FetchOutcome::Data { payload, .. } => payload,
            FetchOutcome::RateLimited => serde_json::Value::Array(Vec::new()),
        }
    }

    /// Payload parsed as resort records (empty when rate limited).
    pub fn resorts(&self) -> Vec<ResortRecord> {
        self.payload()
            .map(ResortRecord::list_from_value)
            .unwrap_or_default()
    }
}

/// Cache-or-fetch front for the snow API.
#[derive(Clone)]
pub struct SnowService {
    client: SnowClient,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl SnowService {
    pub fn new(client: SnowClient, store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            store,
            clock,
        }
    }

    /// Serve `path?params` from today's snapshot, or fetch and record it.
    pub async fn fetch(&self, path: &str, params: &QueryParams) -> Result<FetchOutcome, AppError> {
        let key = cache_key(path, params);
        let today = self.clock.today();

        match self.store.get(&key, today) {
            Ok(Some(snapshot)) => {
                tracing::debug!(key = %key, "Serving snapshot from today");
                return Ok(FetchOutcome::Data {
                    payload: snapshot.data,
                    cached: true,
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Snapshot read failed, treating as miss");
            }
        }

        tracing::info!(key = %key, "Fetching new data from snow API");
        match self.client.get_json(path, params).await? {
            RemoteResponse::RateLimited => Ok(FetchOutcome::RateLimited),
            RemoteResponse::Json(payload) => {
                // The caller still gets the data if the snapshot can't be written.
                if let Err(e) = self.store.put(&key, today, &payload) {
                    tracing::warn!(key = %key, error = %e, "Failed to write snapshot");
                }
                Ok(FetchOutcome::Data {
                    payload,
                    cached: false,
                })
            }
        }
    }

    /// Current conditions for every resort in `state`.
    pub async fn snow_by_state(&self, state: &str) -> Result<FetchOutcome, AppError> {
        self.fetch(SNOW_BY_STATE_PATH, &state_params(state)).await
    }

    /// Resort id listing.
    pub async fn resort_ids(&self) -> Result<FetchOutcome, AppError> {
        self.fetch(RESORT_IDS_PATH, &QueryParams::new()).await
    }

    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

/// Query for [`SNOW_BY_STATE_PATH`].
pub fn state_params(state: &str) -> QueryParams {
    QueryParams::from([("state".to_string(), state.to_string())])
}
