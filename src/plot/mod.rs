//! Chart construction: gap reconstruction and rendering.
//!
//! The geometry and the axis domains are configuration constants rather than
//! data-derived, so every dataset variant is drawn at the same visual scale
//! and charts stay comparable across selections.

pub mod gaps;
pub mod render;

use crate::domain::{year_coord, GapSegment, SeriesPoint};

/// Output surface size in logical units.
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

/// Fixed x domain: calendar years.
pub const X_MIN: f64 = 2000.0;
pub const X_MAX: f64 = 2024.0;

/// Fixed y domain: sentiment score.
pub const Y_MIN: f64 = 0.12;
pub const Y_MAX: f64 = 0.37;

/// Dash pattern of the gap-reconstruction line.
pub const DASH_SIZE: i32 = 5;
pub const DASH_SPACING: i32 = 5;

/// Interpolated positions inserted between adjacent observed years.
pub const SAMPLES_PER_SEGMENT: usize = 15;

/// A solid run as chart coordinates.
pub fn run_coords(run: &[SeriesPoint]) -> Vec<(f64, f64)> {
    run.iter().map(|p| (year_coord(p.year), p.value)).collect()
}

/// A gap connector as chart coordinates.
pub fn gap_coords(gap: &GapSegment) -> [(f64, f64); 2] {
    [
        (year_coord(gap.start.year), gap.start.value),
        (year_coord(gap.end.year), gap.end.value),
    ]
}
