// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;

/// Default snow conditions API (RapidAPI).
pub const DEFAULT_SNOW_API_BASE_URL: &str = "https://ski-resort-conditions.p.rapidapi.com";
/// Host header value expected by RapidAPI.
pub const DEFAULT_SNOW_API_HOST: &str = "ski-resort-conditions.p.rapidapi.com";
/// Default Open-Meteo historical archive endpoint.
pub const DEFAULT_WEATHER_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
/// Snapshots older than this many days are pruned.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Upstream APIs ---
    /// Snow API key (sent as `x-rapidapi-key`)
    pub snow_api_key: String,
    /// Snow API base URL, without trailing slash
    pub snow_api_base_url: String,
    /// Snow API host header
    pub snow_api_host: String,
    /// Weather archive endpoint
    pub weather_archive_url: String,

    // --- Local state ---
    /// Directory holding day-bucketed snapshot files
    pub cache_dir: PathBuf,
    /// Retention horizon for snapshots
    pub cache_retention_days: i64,
    /// Path to the static resort reference dataset
    pub resorts_path: PathBuf,

    // --- Server ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let cache_retention_days = match env::var("CACHE_RETENTION_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or(ConfigError::Invalid("CACHE_RETENTION_DAYS", raw))?,
            Err(_) => DEFAULT_RETENTION_DAYS,
        };

        Ok(Self {
            snow_api_key: env::var("SNOW_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SNOW_API_KEY"))?,
            snow_api_base_url: env::var("SNOW_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_SNOW_API_BASE_URL.to_string()),
            snow_api_host: env::var("SNOW_API_HOST")
                .unwrap_or_else(|_| DEFAULT_SNOW_API_HOST.to_string()),
            weather_archive_url: env::var("WEATHER_ARCHIVE_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_ARCHIVE_URL.to_string()),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cache")),
            cache_retention_days,
            resorts_path: env::var("RESORTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/ski_areas.json")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Config for tests. Upstream URLs point nowhere useful; tests override them.
    pub fn test_default() -> Self {
        Self {
            snow_api_key: "test_api_key".to_string(),
            snow_api_base_url: "http://127.0.0.1:9".to_string(),
            snow_api_host: DEFAULT_SNOW_API_HOST.to_string(),
            weather_archive_url: "http://127.0.0.1:9/v1/archive".to_string(),
            cache_dir: PathBuf::from("cache"),
            cache_retention_days: DEFAULT_RETENTION_DAYS,
            resorts_path: PathBuf::from("data/ski_areas.json"),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
