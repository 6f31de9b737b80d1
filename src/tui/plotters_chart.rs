//! Plotters-powered sentiment chart widget for Ratatui.
//!
//! The SVG renderer targets an 800×400 surface with room for axis titles and
//! a legend; terminal cells are far coarser, so this widget builds its own
//! compact chart (tight margins, few labels, no legend box — the header
//! carries the legend as colored member names) over the same prepared data.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::app::pipeline::ChartData;
use crate::math::sample_monotone;
use crate::plot::render::series_color;
use crate::plot::{
    gap_coords, run_coords, DASH_SIZE, DASH_SPACING, SAMPLES_PER_SEGMENT, X_MAX, X_MIN, Y_MAX,
    Y_MIN,
};

pub struct SentimentChart<'a> {
    pub data: &'a ChartData,
}

impl Widget for SentimentChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let data = self.data;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Terminal cells are low-res, so keep label areas compact.
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(X_MIN..X_MAX, Y_MIN..Y_MAX)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            for series in &data.series {
                let color = series_color(series.label);
                for run in &series.runs {
                    if run.len() < 2 {
                        continue;
                    }
                    let sampled = sample_monotone(&run_coords(run), SAMPLES_PER_SEGMENT);
                    chart.draw_series(LineSeries::new(sampled, &color))?;
                }
                for gap in &series.gaps {
                    chart.draw_series(DashedLineSeries::new(
                        gap_coords(gap),
                        DASH_SIZE,
                        DASH_SPACING,
                        color.stroke_width(1),
                    ))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
