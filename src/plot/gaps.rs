//! Gap reconstruction for dashed-line rendering.
//!
//! A series with missing years should show a *break* in the solid line and a
//! dashed connector spanning exactly the missing stretch. Both structures
//! fall out of one linear pass over the chronologically sorted observations:
//!
//! - `solid_runs` splits the series into maximal runs of valid points
//! - `bridge_gaps` emits one connector per maximal run of missing values
//!   that has a valid anchor on *both* sides
//!
//! A run of missing values touching either end of the series has only one
//! anchor and produces no connector.

use crate::domain::{GapSegment, Observation, SeriesPoint};

/// Maximal runs of consecutive valid points.
///
/// Each run becomes one solid sub-path; a run of length one draws nothing
/// but still breaks the line on both sides.
pub fn solid_runs(obs: &[Observation]) -> Vec<Vec<SeriesPoint>> {
    let mut runs = Vec::new();
    let mut current: Vec<SeriesPoint> = Vec::new();
    for o in obs {
        match o.value {
            Some(value) => current.push(SeriesPoint { year: o.year, value }),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// One connector per interior run of missing values.
pub fn bridge_gaps(obs: &[Observation]) -> Vec<GapSegment> {
    let mut gaps = Vec::new();
    let mut last_valid: Option<SeriesPoint> = None;
    let mut in_gap = false;

    for o in obs {
        match o.value {
            Some(value) => {
                let point = SeriesPoint { year: o.year, value };
                if in_gap {
                    // A leading run has no anchor before it; skip it.
                    if let Some(start) = last_valid {
                        gaps.push(GapSegment { start, end: point });
                    }
                    in_gap = false;
                }
                last_valid = Some(point);
            }
            None => in_gap = true,
        }
    }

    // A trailing run never closes, so it contributes nothing.
    gaps
}
