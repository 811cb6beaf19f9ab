#![forbid(unsafe_code)]

//! Multi-series line chart drawn directly into the frame buffer.
//!
//! Layout inside the render area:
//!
//! ```text
//! ● Actual  ▲ Baseline  ■ Total        <- legend
//! 2480 │      ●──●
//!      │   ●·'
//! 2440 │●'
//!      └──────────────
//!       2010      2019                 <- x labels
//! ```

use ftui_core::geometry::Rect;
use ftui_render::cell::PackedRgba;
use ftui_render::frame::Frame;
use ftui_widgets::Widget;
use shocksim_core::{ForecastSeries, SeriesKind};

use super::draw::{label_width, put_char, put_str};
use super::theme;

const MIN_WIDTH: u16 = 16;
const MIN_HEIGHT: u16 = 6;
/// Fraction of the value span added above and below the data.
const Y_PADDING: f64 = 0.05;

/// Inclusive numeric range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Range of the finite values, or `None` when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |bounds, value| match bounds {
                None => Some(Self {
                    min: value,
                    max: value,
                }),
                Some(b) => Some(Self {
                    min: b.min.min(value),
                    max: b.max.max(value),
                }),
            })
    }

    /// Widen by `fraction` of the span on both sides. A flat range is
    /// widened by one unit so it still has height.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Self {
        let span = self.max - self.min;
        if span <= 0.0 {
            return Self {
                min: self.min - 1.0,
                max: self.max + 1.0,
            };
        }
        Self {
            min: self.min - span * fraction,
            max: self.max + span * fraction,
        }
    }

    /// Position of `value` in `[0.0, 1.0]`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn mid(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Map a data point to a cell inside `plot`. Larger y is drawn higher.
#[must_use]
pub fn project(x_bounds: Bounds, y_bounds: Bounds, plot: Rect, x: f64, y: f64) -> (u16, u16) {
    let max_col = f64::from(plot.width.saturating_sub(1));
    let max_row = f64::from(plot.height.saturating_sub(1));
    let col = (x_bounds.normalize(x) * max_col).round() as u16;
    let row = ((1.0 - y_bounds.normalize(y)) * max_row).round() as u16;
    (plot.x + col, plot.y + row)
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub marker: char,
    pub color: PackedRgba,
    /// Draw connecting segments with gaps.
    pub dashed: bool,
}

/// Line chart widget.
#[derive(Debug, Clone, Default)]
pub struct LineChart {
    series: Vec<LineSeries>,
}

impl LineChart {
    #[must_use]
    pub fn new(series: Vec<LineSeries>) -> Self {
        Self { series }
    }

    /// The three Kcal series over year.
    #[must_use]
    pub fn from_forecast(data: &ForecastSeries) -> Self {
        let series = SeriesKind::ALL
            .iter()
            .map(|&kind| LineSeries {
                label: kind.label().to_string(),
                points: data
                    .points(kind)
                    .map(|(year, value)| (f64::from(year), value))
                    .collect(),
                marker: theme::series_marker(kind),
                color: theme::series_color(kind),
                dashed: kind == SeriesKind::BaselineForecast,
            })
            .collect();
        Self::new(series)
    }

    #[must_use]
    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    fn bounds(&self) -> Option<(Bounds, Bounds)> {
        let points = || self.series.iter().flat_map(|s| s.points.iter().copied());
        let x = Bounds::of(points().map(|(x, _)| x))?;
        let y = Bounds::of(points().map(|(_, y)| y))?.padded(Y_PADDING);
        Some((x, y))
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let mut col = area.x;
        for series in &self.series {
            put_char(frame, area, col, area.y, series.marker, series.color);
            col = put_str(frame, area, col + 2, area.y, &series.label, theme::fg::SECONDARY);
            col = col.saturating_add(3);
            if col >= area.right() {
                break;
            }
        }
    }

    fn render_segment(
        &self,
        frame: &mut Frame,
        plot: Rect,
        from: (u16, u16),
        to: (u16, u16),
        series: &LineSeries,
    ) {
        let (mut x0, mut y0) = (i32::from(from.0), i32::from(from.1));
        let (x1, y1) = (i32::from(to.0), i32::from(to.1));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut step = 0u32;

        loop {
            if !series.dashed || step % 2 == 0 {
                if let (Ok(x), Ok(y)) = (u16::try_from(x0), u16::try_from(y0)) {
                    put_char(frame, plot, x, y, '·', series.color);
                }
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1;
        }
    }
}

impl Widget for LineChart {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return;
        }
        let Some((x_bounds, y_bounds)) = self.bounds() else {
            put_str(frame, area, area.x, area.y, "no data", theme::fg::MUTED);
            return;
        };
        let axis_color = theme::fg::MUTED;

        self.render_legend(frame, Rect::new(area.x, area.y, area.width, 1));

        let y_labels = [
            format!("{:.0}", y_bounds.max),
            format!("{:.0}", y_bounds.mid()),
            format!("{:.0}", y_bounds.min),
        ];
        let gutter = y_labels.iter().map(|label| label_width(label)).max().unwrap_or(0) + 1;
        let axis_x = area.x + gutter;
        let axis_y = area.bottom() - 2;
        let plot = Rect::new(
            axis_x + 1,
            area.y + 1,
            area.right().saturating_sub(axis_x + 1),
            axis_y.saturating_sub(area.y + 1),
        );
        if plot.width < 2 || plot.height < 2 {
            return;
        }

        // Axes.
        for y in plot.y..axis_y {
            put_char(frame, area, axis_x, y, '│', axis_color);
        }
        put_char(frame, area, axis_x, axis_y, '└', axis_color);
        for x in plot.x..plot.right() {
            put_char(frame, area, x, axis_y, '─', axis_color);
        }

        // Y labels: top, middle, bottom of the plot, right-aligned in the gutter.
        let label_rows = [plot.y, plot.y + plot.height / 2, plot.bottom() - 1];
        for (label, row) in y_labels.iter().zip(label_rows) {
            let x = axis_x.saturating_sub(1 + label_width(label));
            put_str(frame, area, x, row, label, theme::fg::SECONDARY);
        }

        // X labels: first and last year, middle one if it fits.
        let label_row = area.bottom() - 1;
        let first = format!("{:.0}", x_bounds.min);
        let last = format!("{:.0}", x_bounds.max);
        put_str(frame, area, plot.x, label_row, &first, theme::fg::SECONDARY);
        if x_bounds.max > x_bounds.min {
            let last_x = plot.right().saturating_sub(label_width(&last));
            put_str(frame, area, last_x, label_row, &last, theme::fg::SECONDARY);
            let mid = format!("{:.0}", x_bounds.mid().round());
            let mid_x = plot.x + plot.width / 2 - label_width(&mid) / 2;
            if mid_x > plot.x + label_width(&first) && mid_x + label_width(&mid) < last_x {
                put_str(frame, area, mid_x, label_row, &mid, theme::fg::SECONDARY);
            }
        }

        // Segments first, then markers on top.
        for series in &self.series {
            let cells: Vec<(u16, u16)> = series
                .points
                .iter()
                .map(|&(x, y)| project(x_bounds, y_bounds, plot, x, y))
                .collect();
            for pair in cells.windows(2) {
                self.render_segment(frame, plot, pair[0], pair[1], series);
            }
        }
        for series in &self.series {
            for &(x, y) in &series.points {
                let (col, row) = project(x_bounds, y_bounds, plot, x, y);
                put_char(frame, plot, col, row, series.marker, series.color);
            }
        }
    }
}
