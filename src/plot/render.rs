//! SVG chart rendering via Plotters.
//!
//! The drawing itself is generic over the Plotters backend so the TUI preview
//! widget can reuse it; the entry points below bind it to the SVG backend at
//! the fixed 800×400 surface size.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::app::pipeline::ChartData;
use crate::domain::GroupLabel;
use crate::error::AppError;
use crate::math::sample_monotone;
use crate::plot::{
    gap_coords, run_coords, DASH_SIZE, DASH_SPACING, HEIGHT, SAMPLES_PER_SEGMENT, WIDTH, X_MAX,
    X_MIN, Y_MAX, Y_MIN,
};

pub fn series_color(label: GroupLabel) -> RGBColor {
    let (r, g, b) = label.color();
    RGBColor(r, g, b)
}

/// Draw the full chart (axes, solid lines, dashed gap lines, legend) into a
/// prepared drawing area.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &ChartData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = ChartBuilder::on(root)
        .margin_top(20)
        .margin_right(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(X_MIN..X_MAX, Y_MIN..Y_MAX)?;

    // Axes + tick labels. No mesh lines: the source chart draws bare axes.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Year")
        .y_desc("Sentiment")
        .x_labels(7)
        .y_labels(6)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style(("serif", 14))
        .axis_desc_style(("serif", 16))
        .axis_style(&BLACK)
        .draw()?;

    for series in &data.series {
        let color = series_color(series.label);

        // Legend entry first, carried by an empty series so every scheme
        // member appears even when its data is entirely missing.
        chart
            .draw_series(LineSeries::new(
                std::iter::empty::<(f64, f64)>(),
                color.stroke_width(2),
            ))?
            .label(series.label.display_name())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });

        // Solid sub-paths, one per run of valid points, monotone-interpolated.
        for run in &series.runs {
            if run.len() < 2 {
                continue;
            }
            let sampled = sample_monotone(&run_coords(run), SAMPLES_PER_SEGMENT);
            chart.draw_series(LineSeries::new(sampled, color.stroke_width(2)))?;
        }

        // Dashed connectors across interior gaps, same color.
        for gap in &series.gaps {
            chart.draw_series(DashedLineSeries::new(
                gap_coords(gap),
                DASH_SIZE,
                DASH_SPACING,
                color.stroke_width(2),
            ))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK.mix(0.4))
        .label_font(("serif", 14))
        .draw()?;

    Ok(())
}

/// Render the chart to an SVG file at the fixed surface size.
pub fn render_svg(data: &ChartData, path: &Path) -> Result<(), AppError> {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::runtime(format!("Failed to clear drawing surface: {e}")))?;
    draw_chart(&root, data).map_err(|e| AppError::runtime(format!("Chart drawing failed: {e}")))?;
    root.present()
        .map_err(|e| AppError::runtime(format!("Failed to write SVG: {e}")))?;
    Ok(())
}

/// Render the chart into an in-memory SVG document.
pub fn render_svg_string(data: &ChartData) -> Result<String, AppError> {
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AppError::runtime(format!("Failed to clear drawing surface: {e}")))?;
        draw_chart(&root, data)
            .map_err(|e| AppError::runtime(format!("Chart drawing failed: {e}")))?;
        root.present()
            .map_err(|e| AppError::runtime(format!("Failed to finalize SVG: {e}")))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{prepare_chart, PreparedSeries};
    use crate::domain::{ChartConfig, GroupingScheme, Row};
    use crate::io::ingest::IngestedRows;
    use chrono::NaiveDate;

    fn sample_chart() -> ChartData {
        let mut rows = Vec::new();
        for (label, base) in [
            (GroupLabel::Elite, 0.22),
            (GroupLabel::NonElite, 0.18),
        ] {
            for (i, year) in (2000..=2006).enumerate() {
                let value = if year == 2003 {
                    None
                } else {
                    Some(base + i as f64 * 0.005)
                };
                rows.push(Row {
                    year: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                    group: label,
                    value,
                });
            }
        }
        prepare_chart(
            IngestedRows {
                rows_read: rows.len(),
                rows,
                row_errors: Vec::new(),
            },
            &ChartConfig {
                scheme: GroupingScheme::EliteStatus,
                metric: "sentiment".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn renders_svg_with_lines_and_legend() {
        let data = sample_chart();
        let svg = render_svg_string(&data).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("polyline") || svg.contains("path"));
        // Axis titles and legend labels are present as text.
        assert!(svg.contains("Year"));
        assert!(svg.contains("Sentiment"));
        assert!(svg.contains("Elite"));
        assert!(svg.contains("Non-elite"));
        // Both series colors appear.
        let lower = svg.to_ascii_lowercase();
        assert!(lower.contains("#a82931"));
        assert!(lower.contains("#004e6a"));
    }

    #[test]
    fn empty_series_still_render() {
        // A chart whose members carry no points at all must not fail; the
        // legend is drawn from empty series.
        let data = ChartData {
            scheme: GroupingScheme::Region,
            metric: "sentiment".to_string(),
            series: GroupingScheme::Region
                .members()
                .iter()
                .map(|&label| PreparedSeries {
                    label,
                    runs: Vec::new(),
                    gaps: Vec::new(),
                })
                .collect(),
            rows_read: 0,
            rows_used: 0,
            row_errors: Vec::new(),
        };
        let svg = render_svg_string(&data).unwrap();
        assert!(svg.contains("Midwest"));
        assert!(svg.contains("West"));
    }
}
