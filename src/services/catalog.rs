// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ski area reference catalog loading and lookup.

use crate::models::ResortInfo;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Country -> region -> sorted resort names.
pub type OrganizedCatalog = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// In-memory copy of the reference dataset.
#[derive(Debug, Default, Clone)]
pub struct ResortCatalog {
    resorts: Vec<ResortInfo>,
}

impl ResortCatalog {
    /// Load the catalog from a JSON file holding an array of ski areas.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the catalog from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let resorts: Vec<ResortInfo> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        tracing::info!(count = resorts.len(), "Loaded ski area catalog");
        Ok(Self { resorts })
    }

    pub fn resorts(&self) -> &[ResortInfo] {
        &self.resorts
    }

    /// Exact name match; the first entry wins when names repeat.
    pub fn find_by_name(&self, name: &str) -> Option<&ResortInfo> {
        self.resorts.iter().find(|r| r.name == name)
    }

    /// Group resort names by country and region.
    ///
    /// A resort listing several countries or regions appears under every
    /// combination. Unnamed entries are left out.
    pub fn organized(&self) -> OrganizedCatalog {
        let mut organized = OrganizedCatalog::new();

        for resort in self.resorts.iter().filter(|r| !r.name.trim().is_empty()) {
            for country in resort.country_list() {
                let regions = organized.entry(country.to_string()).or_default();
                for region in resort.region_list() {
                    regions
                        .entry(region.to_string())
                        .or_default()
                        .push(resort.name.clone());
                }
            }
        }

        for names in organized.values_mut().flat_map(|regions| regions.values_mut()) {
            names.sort();
            names.dedup();
        }
        organized
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "Vail", "countries": "United States", "regions": "Colorado", "lat": 39.6, "lng": -106.4},
        {"name": "Aspen", "countries": "United States", "regions": "Colorado"},
        {"name": "Border Hill", "countries": "United States;Canada", "regions": "Montana;Alberta"},
        {"name": "Nowhere", "countries": "", "regions": null},
        {"name": "", "countries": "France", "regions": "Savoie"}
    ]"#;

    #[test]
    fn test_load_and_find() {
        let catalog = ResortCatalog::load_from_json(SAMPLE).unwrap();
        assert_eq!(catalog.resorts().len(), 5);

        let vail = catalog.find_by_name("Vail").unwrap();
        assert_eq!(vail.coordinates(), Some((39.6, -106.4)));
        assert_eq!(catalog.find_by_name("Aspen").unwrap().coordinates(), None);
        assert!(catalog.find_by_name("vail").is_none());
    }

    #[test]
    fn test_organized_splits_and_sorts() {
        let organized = ResortCatalog::load_from_json(SAMPLE).unwrap().organized();

        assert_eq!(
            organized["United States"]["Colorado"],
            vec!["Aspen".to_string(), "Vail".to_string()]
        );
        assert_eq!(organized["Canada"]["Alberta"], vec!["Border Hill".to_string()]);
        assert_eq!(organized["Canada"]["Montana"], vec!["Border Hill".to_string()]);
        assert_eq!(organized["Unknown"]["Unknown"], vec!["Nowhere".to_string()]);
        assert!(!organized.contains_key("France"));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            ResortCatalog::load_from_json("{not json"),
            Err(CatalogError::ParseError(_))
        ));
        assert!(matches!(
            ResortCatalog::load_from_file("/nonexistent/ski_areas.json"),
            Err(CatalogError::IoError(_))
        ));
    }
}
