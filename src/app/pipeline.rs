//! Shared load pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> parse -> group -> sort -> gap reconstruction
//!
//! The CLI and the TUI then focus on presentation (SVG file vs widgets).

use crate::data::DataSource;
use crate::domain::{ChartConfig, GapSegment, GroupLabel, GroupingScheme, Observation, Row, SeriesPoint};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedRows, RowError};
use crate::plot::gaps::{bridge_gaps, solid_runs};

/// One member series, ready to draw.
#[derive(Debug, Clone)]
pub struct PreparedSeries {
    pub label: GroupLabel,
    /// Maximal runs of valid points; each run is one solid sub-path.
    pub runs: Vec<Vec<SeriesPoint>>,
    /// Dashed connectors across interior runs of missing values.
    pub gaps: Vec<GapSegment>,
}

/// Everything the renderer needs for one chart, plus ingest bookkeeping.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub scheme: GroupingScheme,
    pub metric: String,
    pub series: Vec<PreparedSeries>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Execute the full load pipeline for one selector pair.
///
/// `Ok(None)` means the fetch succeeded but carried no data rows; per the
/// component contract nothing is drawn in that case.
pub fn load_chart(source: &DataSource, config: &ChartConfig) -> Result<Option<ChartData>, AppError> {
    let bytes = source.fetch(config.scheme, &config.metric)?;
    let ingested = ingest::parse_rows(&bytes, config.scheme, &config.metric)?;
    Ok(prepare_chart(ingested, config))
}

/// Group, sort, and gap-bridge freshly parsed rows.
///
/// Pure data preparation; separated from `load_chart` so it can be tested
/// without a data source.
pub fn prepare_chart(ingested: IngestedRows, config: &ChartConfig) -> Option<ChartData> {
    if ingested.rows.is_empty() {
        return None;
    }

    let series = config
        .scheme
        .members()
        .iter()
        .map(|&label| prepare_series(&ingested.rows, label))
        .collect();

    Some(ChartData {
        scheme: config.scheme,
        metric: config.metric.clone(),
        series,
        rows_read: ingested.rows_read,
        rows_used: ingested.rows_used(),
        row_errors: ingested.row_errors,
    })
}

fn prepare_series(rows: &[Row], label: GroupLabel) -> PreparedSeries {
    let mut obs: Vec<Observation> = rows
        .iter()
        .filter(|r| r.group == label)
        .map(|r| Observation {
            year: r.year,
            value: r.value,
        })
        .collect();

    // Line drawing needs chronological order regardless of file order.
    obs.sort_by_key(|o| o.year);

    PreparedSeries {
        label,
        runs: solid_runs(&obs),
        gaps: bridge_gaps(&obs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(year: i32, group: GroupLabel, value: Option<f64>) -> Row {
        Row {
            year: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            group,
            value,
        }
    }

    fn ingested(rows: Vec<Row>) -> IngestedRows {
        IngestedRows {
            rows_read: rows.len(),
            rows,
            row_errors: Vec::new(),
        }
    }

    fn config(scheme: GroupingScheme) -> ChartConfig {
        ChartConfig {
            scheme,
            metric: "sentiment".to_string(),
        }
    }

    #[test]
    fn empty_ingest_prepares_nothing() {
        assert!(prepare_chart(ingested(Vec::new()), &config(GroupingScheme::Region)).is_none());
    }

    #[test]
    fn one_series_per_scheme_member() {
        let rows = vec![
            row(2000, GroupLabel::Elite, Some(0.2)),
            row(2001, GroupLabel::Elite, Some(0.21)),
            row(2000, GroupLabel::NonElite, Some(0.18)),
        ];
        let chart = prepare_chart(ingested(rows), &config(GroupingScheme::EliteStatus)).unwrap();

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, GroupLabel::Elite);
        assert_eq!(chart.series[1].label, GroupLabel::NonElite);
        assert_eq!(chart.series[0].runs.len(), 1);
        assert_eq!(chart.series[0].runs[0].len(), 2);
    }

    #[test]
    fn members_absent_from_data_still_get_a_series() {
        let rows = vec![row(2000, GroupLabel::Midwest, Some(0.2))];
        let chart = prepare_chart(ingested(rows), &config(GroupingScheme::Region)).unwrap();
        let west = chart
            .series
            .iter()
            .find(|s| s.label == GroupLabel::West)
            .unwrap();
        assert!(west.runs.is_empty());
        assert!(west.gaps.is_empty());
    }

    #[test]
    fn unsorted_rows_are_ordered_before_bridging() {
        let rows = vec![
            row(2003, GroupLabel::FullDataset, Some(0.25)),
            row(2001, GroupLabel::FullDataset, None),
            row(2000, GroupLabel::FullDataset, Some(0.20)),
            row(2002, GroupLabel::FullDataset, None),
        ];
        let chart = prepare_chart(ingested(rows), &config(GroupingScheme::FullDataset)).unwrap();

        let series = &chart.series[0];
        assert_eq!(series.gaps.len(), 1);
        assert!((series.gaps[0].start.value - 0.20).abs() < 1e-12);
        assert!((series.gaps[0].end.value - 0.25).abs() < 1e-12);
        assert_eq!(series.runs.len(), 2);
    }

    #[test]
    fn rows_from_other_groups_are_filtered_per_series() {
        let rows = vec![
            row(2000, GroupLabel::Midwest, Some(0.2)),
            row(2000, GroupLabel::West, Some(0.3)),
        ];
        let chart = prepare_chart(ingested(rows), &config(GroupingScheme::Region)).unwrap();
        let midwest = chart
            .series
            .iter()
            .find(|s| s.label == GroupLabel::Midwest)
            .unwrap();
        assert_eq!(midwest.runs.len(), 1);
        assert_eq!(midwest.runs[0].len(), 1);
        assert!((midwest.runs[0][0].value - 0.2).abs() < 1e-12);
    }
}
