// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Percent-open scoring and letter grades.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::resort::ResortRecord;

/// Letter grade for a percent-open score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 6] = [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Dashboard color for the grade badge.
    pub fn color(&self) -> &'static str {
        match self {
            Grade::APlus | Grade::A => "#28a745",
            Grade::B => "#5cb85c",
            Grade::C => "#ffc107",
            Grade::D => "#fd7e14",
            Grade::F => "#dc3545",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown grade: {}", s))
    }
}

/// `open / total * 100`, or `0` when there is nothing to open.
pub fn percent_open(open: u32, total: u32) -> f64 {
    if total > 0 {
        f64::from(open) / f64::from(total) * 100.0
    } else {
        0.0
    }
}

/// Map a percentage to a grade. Only exactly 100 earns `A+`.
pub fn grade(percent: f64) -> Grade {
    if percent == 100.0 {
        Grade::APlus
    } else if percent >= 90.0 {
        Grade::A
    } else if percent >= 75.0 {
        Grade::B
    } else if percent >= 50.0 {
        Grade::C
    } else if percent >= 25.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// Mean of trail and lift percent-open for a single resort.
pub fn overall_score(resort: &ResortRecord) -> f64 {
    (resort.open_trails.percent() + resort.open_lifts.percent()) / 2.0
}

/// Collection-wide availability.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AggregateScore {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub resort_count: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub open_lifts: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_lifts: u64,
    pub lift_percent: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub open_trails: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_trails: u64,
    pub trail_percent: f64,
    pub overall: f64,
    pub grade: Grade,
}

/// Aggregate over a collection by summing counts first.
///
/// Percentages are computed from the summed opens and totals, so a resort
/// with 5 trails weighs less than one with 150.
pub fn aggregate_score(resorts: &[ResortRecord]) -> AggregateScore {
    let (mut open_lifts, mut total_lifts) = (0u64, 0u64);
    let (mut open_trails, mut total_trails) = (0u64, 0u64);
    for resort in resorts {
        open_lifts += u64::from(resort.open_lifts.open);
        total_lifts += u64::from(resort.open_lifts.total);
        open_trails += u64::from(resort.open_trails.open);
        total_trails += u64::from(resort.open_trails.total);
    }

    let lift_percent = ratio_percent(open_lifts, total_lifts);
    let trail_percent = ratio_percent(open_trails, total_trails);
    let overall = (lift_percent + trail_percent) / 2.0;

    AggregateScore {
        resort_count: resorts.len(),
        open_lifts,
        total_lifts,
        lift_percent,
        open_trails,
        total_trails,
        trail_percent,
        overall,
        grade: grade(overall),
    }
}

fn ratio_percent(open: u64, total: u64) -> f64 {
    if total > 0 {
        open as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resort::OpenRatio;

    fn resort(lifts: &str, trails: &str) -> ResortRecord {
        let mut r = ResortRecord::new("1", "Test");
        r.open_lifts = OpenRatio::parse(lifts).unwrap();
        r.open_trails = OpenRatio::parse(trails).unwrap();
        r
    }

    #[test]
    fn test_percent_open_zero_total() {
        assert_eq!(OpenRatio::parse("0/0").unwrap().percent(), 0.0);
        assert_eq!(OpenRatio::parse("n/a").unwrap().percent(), 0.0);
        assert_eq!(percent_open(5, 0), 0.0);
        assert_eq!(percent_open(1, 4), 25.0);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(100.0), Grade::APlus);
        assert_eq!(grade(99.99), Grade::A);
        assert_eq!(grade(90.0), Grade::A);
        assert_eq!(grade(89.9), Grade::B);
        assert_eq!(grade(75.0), Grade::B);
        assert_eq!(grade(74.9), Grade::C);
        assert_eq!(grade(50.0), Grade::C);
        assert_eq!(grade(25.0), Grade::D);
        assert_eq!(grade(24.9), Grade::F);
        assert_eq!(grade(0.0), Grade::F);
    }

    #[test]
    fn test_grade_parsing_and_display() {
        assert_eq!("A+".parse::<Grade>().unwrap(), Grade::APlus);
        assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
        assert!("E".parse::<Grade>().is_err());
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), "A+");
    }

    #[test]
    fn test_overall_score_averages_trails_and_lifts() {
        let r = resort("5/10", "30/40");
        assert_eq!(overall_score(&r), 62.5);
        assert_eq!(grade(overall_score(&r)), Grade::C);
    }

    #[test]
    fn test_aggregate_sums_before_dividing() {
        // Mean of individual lift percentages would be 50; summed counts give 10/100.
        let resorts = vec![resort("10/10", "0/0"), resort("0/90", "0/0")];
        let agg = aggregate_score(&resorts);

        assert_eq!(agg.resort_count, 2);
        assert_eq!(agg.open_lifts, 10);
        assert_eq!(agg.total_lifts, 100);
        assert_eq!(agg.lift_percent, 10.0);
        assert_eq!(agg.trail_percent, 0.0);
        assert_eq!(agg.overall, 5.0);
        assert_eq!(agg.grade, Grade::F);
    }

    #[test]
    fn test_aggregate_of_empty_collection() {
        let agg = aggregate_score(&[]);
        assert_eq!(agg.resort_count, 0);
        assert_eq!(agg.overall, 0.0);
    }
}
