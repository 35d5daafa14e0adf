//! Plotters-powered debt time-series chart widget for Ratatui.
//!
//! Plotters renders the axes and mesh more cleanly than Ratatui's built-in
//! `Chart`, and its output goes into the Ratatui buffer through
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Series palette, cycled by series index. Matches `SERIES_TERM_COLORS`.
pub const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(0, 255, 255),
    RGBColor(255, 170, 0),
    RGBColor(0, 255, 0),
    RGBColor(255, 0, 255),
    RGBColor(255, 255, 0),
];

/// The same palette as terminal colors, for legends drawn with Ratatui.
pub const SERIES_TERM_COLORS: [Color; 5] = [
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 170, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(255, 0, 255),
    Color::Rgb(255, 255, 0),
];

/// A render-only chart description. Series and bounds are computed outside
/// the render call.
pub struct DebtPlottersChart<'a> {
    /// One `(year, billions)` line per indicator, in legend order.
    pub series: &'a [Vec<(f64, f64)>],
    /// X bounds (years).
    pub x_bounds: [f64; 2],
    /// Y bounds (US$ billions).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for DebtPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (idx, line) in self.series.iter().enumerate() {
                let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
                chart.draw_series(LineSeries::new(line.iter().copied(), &color))?;
                // Single-year series have no segment to draw; mark the point.
                // `Pixel` rather than `Circle`: the backend scales circle radii wrongly.
                chart.draw_series(line.iter().map(|&(x, y)| Pixel::new((x, y), color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
