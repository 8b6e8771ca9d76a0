// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search, grade filtering and sorting for the resort list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{grade, overall_score, Grade, ResortRecord};

/// Resort list filter. The default filter keeps everything.
#[derive(Debug, Clone, Default)]
pub struct ResortFilter {
    /// Case-insensitive substring of the resort name
    pub search: String,
    /// Keep only these grades (empty = any grade)
    pub grades: HashSet<Grade>,
    /// Keep only resorts reporting new snow in the last 24h
    pub require_new_snow: bool,
}

impl ResortFilter {
    pub fn matches(&self, resort: &ResortRecord) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !resort.resort.to_lowercase().contains(&search) {
            return false;
        }
        if !self.grades.is_empty() && !self.grades.contains(&grade(overall_score(resort))) {
            return false;
        }
        if self.require_new_snow && resort.new_snow_inches() <= 0.0 {
            return false;
        }
        true
    }
}

/// Apply `filter`, preserving input order.
pub fn filter(resorts: Vec<ResortRecord>, filter: &ResortFilter) -> Vec<ResortRecord> {
    resorts.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Resort list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SortMode {
    NameAsc,
    NameDesc,
    #[default]
    ScoreDesc,
    ScoreAsc,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name_asc" => Ok(SortMode::NameAsc),
            "name_desc" => Ok(SortMode::NameDesc),
            "score_desc" => Ok(SortMode::ScoreDesc),
            "score_asc" => Ok(SortMode::ScoreAsc),
            other => Err(format!("Unknown sort mode: {}", other)),
        }
    }
}

/// Stable sort: ties keep their original relative order.
pub fn sort(resorts: &mut [ResortRecord], mode: SortMode) {
    let by_name = |a: &ResortRecord, b: &ResortRecord| -> Ordering {
        a.resort.to_lowercase().cmp(&b.resort.to_lowercase())
    };
    let by_score =
        |a: &ResortRecord, b: &ResortRecord| -> Ordering { overall_score(a).total_cmp(&overall_score(b)) };

    match mode {
        SortMode::NameAsc => resorts.sort_by(by_name),
        SortMode::NameDesc => resorts.sort_by(|a, b| by_name(b, a)),
        SortMode::ScoreDesc => resorts.sort_by(|a, b| by_score(b, a)),
        SortMode::ScoreAsc => resorts.sort_by(by_score),
    }
}

/// A resort card: the record plus its derived score.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoredResort {
    #[serde(flatten)]
    pub record: ResortRecord,
    pub trail_percent: f64,
    pub lift_percent: f64,
    pub overall_score: f64,
    pub grade: Grade,
    pub color: String,
}

impl From<ResortRecord> for ScoredResort {
    fn from(record: ResortRecord) -> Self {
        let overall = overall_score(&record);
        let grade = grade(overall);
        Self {
            trail_percent: record.open_trails.percent(),
            lift_percent: record.open_lifts.percent(),
            overall_score: overall,
            color: grade.color().to_string(),
            grade,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpenRatio;

    fn resort(name: &str, lifts: (u32, u32), snow: Option<&str>) -> ResortRecord {
        let mut r = ResortRecord::new(name.to_lowercase(), name);
        r.open_lifts = OpenRatio::new(lifts.0, lifts.1);
        r.open_trails = OpenRatio::new(lifts.0, lifts.1);
        r.snowfall24h = snow.map(String::from);
        r
    }

    fn names(resorts: &[ResortRecord]) -> Vec<&str> {
        resorts.iter().map(|r| r.resort.as_str()).collect()
    }

    fn sample() -> Vec<ResortRecord> {
        vec![
            resort("Vail", (10, 10), Some("3\"")),
            resort("aspen Snowmass", (5, 10), None),
            resort("Breckenridge", (1, 10), Some("0")),
            resort("Copper", (5, 10), Some("1")),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let f = ResortFilter {
            search: "SNOW".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&filter(sample(), &f)), vec!["aspen Snowmass"]);
    }

    #[test]
    fn test_grade_filter() {
        let f = ResortFilter {
            grades: HashSet::from([Grade::APlus, Grade::F]),
            ..Default::default()
        };
        assert_eq!(names(&filter(sample(), &f)), vec!["Vail", "Breckenridge"]);
    }

    #[test]
    fn test_new_snow_filter() {
        let f = ResortFilter {
            require_new_snow: true,
            ..Default::default()
        };
        assert_eq!(names(&filter(sample(), &f)), vec!["Vail", "Copper"]);
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        assert_eq!(filter(sample(), &ResortFilter::default()).len(), 4);
    }

    #[test]
    fn test_sort_by_name() {
        let mut resorts = sample();
        sort(&mut resorts, SortMode::NameAsc);
        assert_eq!(
            names(&resorts),
            vec!["aspen Snowmass", "Breckenridge", "Copper", "Vail"]
        );

        sort(&mut resorts, SortMode::NameDesc);
        assert_eq!(
            names(&resorts),
            vec!["Vail", "Copper", "Breckenridge", "aspen Snowmass"]
        );
    }

    #[test]
    fn test_sort_by_score_is_stable() {
        let mut resorts = sample();
        sort(&mut resorts, SortMode::ScoreDesc);
        // aspen and Copper tie at 50%; original order is kept
        assert_eq!(
            names(&resorts),
            vec!["Vail", "aspen Snowmass", "Copper", "Breckenridge"]
        );

        let mut resorts = sample();
        sort(&mut resorts, SortMode::ScoreAsc);
        assert_eq!(
            names(&resorts),
            vec!["Breckenridge", "aspen Snowmass", "Copper", "Vail"]
        );
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("name_desc".parse::<SortMode>().unwrap(), SortMode::NameDesc);
        assert!("sideways".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::ScoreDesc);
    }

    #[test]
    fn test_scored_resort_carries_grade_color() {
        let scored = ScoredResort::from(resort("Vail", (10, 10), None));
        assert_eq!(scored.grade, Grade::APlus);
        assert_eq!(scored.color, "#28a745");
        assert_eq!(scored.overall_score, 100.0);
    }
}
