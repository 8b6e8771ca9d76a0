// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static ski area reference data.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A ski area from the reference dataset.
///
/// `countries` and `regions` are `;`-separated since some areas straddle
/// borders (e.g. "United States;Canada").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResortInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub countries: Option<String>,
    #[serde(default)]
    pub regions: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl ResortInfo {
    pub fn country_list(&self) -> Vec<&str> {
        split_or_unknown(self.countries.as_deref())
    }

    pub fn region_list(&self) -> Vec<&str> {
        split_or_unknown(self.regions.as_deref())
    }

    /// Both coordinates, if the dataset has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}

fn split_or_unknown(raw: Option<&str>) -> Vec<&str> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect(),
        _ => vec!["Unknown"],
    }
}
