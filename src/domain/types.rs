//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - used in-memory while preparing a chart
//! - carried across the worker-thread boundary in the TUI
//! - exported later (e.g. alongside a rendered SVG) without conversion

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How rows are split into named series.
///
/// Each scheme is a closed table: one source file, at most one grouping
/// column, and a fixed member list. Everything is resolved by exhaustive
/// `match`, so an unrepresentable scheme cannot reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingScheme {
    /// The whole dataset as a single ungrouped series.
    FullDataset,
    /// Elite vs. non-elite universities.
    EliteStatus,
    /// Four US regions.
    Region,
    /// Private vs. public universities.
    UniversityType,
}

impl GroupingScheme {
    pub const ALL: [GroupingScheme; 4] = [
        GroupingScheme::FullDataset,
        GroupingScheme::EliteStatus,
        GroupingScheme::Region,
        GroupingScheme::UniversityType,
    ];

    /// Human-readable label for headers and status lines.
    pub fn display_name(self) -> &'static str {
        match self {
            GroupingScheme::FullDataset => "full dataset",
            GroupingScheme::EliteStatus => "elite status",
            GroupingScheme::Region => "region",
            GroupingScheme::UniversityType => "university type",
        }
    }

    /// The CSV resource holding this scheme's aggregates.
    pub fn csv_file(self) -> &'static str {
        match self {
            GroupingScheme::FullDataset => "aggregates_full.csv",
            GroupingScheme::EliteStatus => "aggregates_elite_status.csv",
            GroupingScheme::Region => "aggregates_regions.csv",
            GroupingScheme::UniversityType => "aggregates_university_type.csv",
        }
    }

    /// The CSV column carrying the group label, if the scheme is grouped.
    pub fn group_column(self) -> Option<&'static str> {
        match self {
            GroupingScheme::FullDataset => None,
            GroupingScheme::EliteStatus => Some("elite_status"),
            GroupingScheme::Region => Some("region"),
            GroupingScheme::UniversityType => Some("university_type"),
        }
    }

    /// Member series of this scheme, in legend order.
    pub fn members(self) -> &'static [GroupLabel] {
        match self {
            GroupingScheme::FullDataset => &[GroupLabel::FullDataset],
            GroupingScheme::EliteStatus => &[GroupLabel::Elite, GroupLabel::NonElite],
            GroupingScheme::Region => &[
                GroupLabel::Midwest,
                GroupLabel::Northeast,
                GroupLabel::South,
                GroupLabel::West,
            ],
            GroupingScheme::UniversityType => &[GroupLabel::Private, GroupLabel::Public],
        }
    }

    pub fn next(self) -> GroupingScheme {
        match self {
            GroupingScheme::FullDataset => GroupingScheme::EliteStatus,
            GroupingScheme::EliteStatus => GroupingScheme::Region,
            GroupingScheme::Region => GroupingScheme::UniversityType,
            GroupingScheme::UniversityType => GroupingScheme::FullDataset,
        }
    }

    pub fn prev(self) -> GroupingScheme {
        match self {
            GroupingScheme::FullDataset => GroupingScheme::UniversityType,
            GroupingScheme::EliteStatus => GroupingScheme::FullDataset,
            GroupingScheme::Region => GroupingScheme::EliteStatus,
            GroupingScheme::UniversityType => GroupingScheme::Region,
        }
    }
}

/// One named series across all schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupLabel {
    FullDataset,
    Elite,
    NonElite,
    Midwest,
    Northeast,
    South,
    West,
    Private,
    Public,
}

impl GroupLabel {
    /// The spelling used in the CSV grouping column.
    pub fn csv_name(self) -> &'static str {
        match self {
            GroupLabel::FullDataset => "full",
            GroupLabel::Elite => "elite",
            GroupLabel::NonElite => "non-elite",
            GroupLabel::Midwest => "midwest",
            GroupLabel::Northeast => "northeast",
            GroupLabel::South => "south",
            GroupLabel::West => "west",
            GroupLabel::Private => "private",
            GroupLabel::Public => "public",
        }
    }

    /// Legend label (capitalized).
    pub fn display_name(self) -> &'static str {
        match self {
            GroupLabel::FullDataset => "Full Dataset",
            GroupLabel::Elite => "Elite",
            GroupLabel::NonElite => "Non-elite",
            GroupLabel::Midwest => "Midwest",
            GroupLabel::Northeast => "Northeast",
            GroupLabel::South => "South",
            GroupLabel::West => "West",
            GroupLabel::Private => "Private",
            GroupLabel::Public => "Public",
        }
    }

    /// Resolve a grouping-column cell to one of the scheme's members.
    ///
    /// Cells naming a label outside the active scheme are rejected (the row
    /// is skipped at ingest).
    pub fn from_csv_name(scheme: GroupingScheme, s: &str) -> Option<GroupLabel> {
        scheme
            .members()
            .iter()
            .copied()
            .find(|label| label.csv_name().eq_ignore_ascii_case(s.trim()))
    }

    /// Fixed series color as `(r, g, b)`.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            // crimson
            GroupLabel::FullDataset | GroupLabel::Elite | GroupLabel::Midwest | GroupLabel::Private => {
                (0xA8, 0x29, 0x31)
            }
            // blue
            GroupLabel::NonElite | GroupLabel::Northeast | GroupLabel::Public => (0x00, 0x4E, 0x6A),
            // orange
            GroupLabel::South => (0xF9, 0x9D, 0x1C),
            // green
            GroupLabel::West => (0x21, 0x84, 0x46),
        }
    }
}

/// A parsed data row: January-1 date, resolved group, optional score.
///
/// `value: None` encodes a missing or invalid sentiment score (empty cell,
/// `NA`/`NaN`, unparseable, non-finite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub year: NaiveDate,
    pub group: GroupLabel,
    pub value: Option<f64>,
}

/// A point in one series where the score is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: NaiveDate,
    pub value: f64,
}

/// One slot of a chronologically sorted series, score present or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub year: NaiveDate,
    pub value: Option<f64>,
}

/// A dashed connector bridging one interior run of missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSegment {
    pub start: SeriesPoint,
    pub end: SeriesPoint,
}

/// The two selectors driving a load/render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub scheme: GroupingScheme,
    /// Name of the CSV value column to plot.
    pub metric: String,
}

/// Map a date onto the fractional-year x axis (2003-01-01 → 2003.0).
pub fn year_coord(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_tables_are_consistent() {
        for scheme in GroupingScheme::ALL {
            assert!(!scheme.members().is_empty());
            // Grouped schemes have a column; the full dataset does not.
            assert_eq!(
                scheme.group_column().is_some(),
                scheme != GroupingScheme::FullDataset
            );
            // Every member resolves back through its CSV spelling.
            for &label in scheme.members() {
                assert_eq!(
                    GroupLabel::from_csv_name(scheme, label.csv_name()),
                    Some(label)
                );
            }
        }
        assert_eq!(GroupingScheme::Region.members().len(), 4);
    }

    #[test]
    fn from_csv_name_rejects_labels_outside_scheme() {
        // `south` is a region, not an elite-status member.
        assert_eq!(
            GroupLabel::from_csv_name(GroupingScheme::EliteStatus, "south"),
            None
        );
        // Case and surrounding whitespace are tolerated.
        assert_eq!(
            GroupLabel::from_csv_name(GroupingScheme::Region, "  South "),
            Some(GroupLabel::South)
        );
    }

    #[test]
    fn scheme_cycling_visits_all_variants() {
        let mut seen = Vec::new();
        let mut cur = GroupingScheme::FullDataset;
        for _ in 0..GroupingScheme::ALL.len() {
            seen.push(cur);
            cur = cur.next();
        }
        assert_eq!(cur, GroupingScheme::FullDataset);
        for scheme in GroupingScheme::ALL {
            assert!(seen.contains(&scheme));
            assert_eq!(scheme.next().prev(), scheme);
        }
    }

    #[test]
    fn year_coord_is_year_at_january_first() {
        let d = NaiveDate::from_ymd_opt(2003, 1, 1).unwrap();
        assert!((year_coord(d) - 2003.0).abs() < 1e-12);
        let mid = NaiveDate::from_ymd_opt(2003, 7, 2).unwrap();
        assert!(year_coord(mid) > 2003.4 && year_coord(mid) < 2003.6);
    }
}
