#![forbid(unsafe_code)]

//! Forecast tab: actual vs. baseline vs. shock-adjusted series.

use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_text::WrapMode;
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use shocksim_core::{ForecastSeries, ModelParams};

use super::card;
use super::chart::LineChart;
use super::theme;

pub const HEADING: &str = "Actual vs. Shock-Adjusted Forecast";
pub const NOTE: &str = "The Total Forecast includes the calculated impact of the lagged supply \
                        shock on the expected baseline trend.";
pub const CHART_TITLE: &str = "National Kcal Supply Forecast Comparison (kcal/capita/day by year)";
pub const BASELINE_CAPTION: &str =
    "Forecasts the expected Kcal supply based purely on historical time trend.";

pub fn render(frame: &mut Frame, area: Rect, series: &ForecastSeries) {
    if area.is_empty() {
        return;
    }
    let rows = Flex::vertical()
        .constraints([
            Constraint::Fixed(1),
            Constraint::Fixed(2),
            Constraint::Min(8),
            Constraint::Fixed(3),
            Constraint::Fixed(1),
        ])
        .split(area);

    Paragraph::new(HEADING)
        .style(theme::title())
        .render(rows[0], frame);
    Paragraph::new(NOTE)
        .style(theme::subtitle())
        .wrap(WrapMode::Word)
        .render(rows[1], frame);

    let chart_block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(CHART_TITLE)
        .title_alignment(Alignment::Center)
        .style(theme::content_border());
    let chart_area = chart_block.inner(rows[2]);
    chart_block.render(rows[2], frame);
    LineChart::from_forecast(series).render(chart_area, frame);

    card::render_row(
        frame,
        rows[3],
        &ModelParams::baseline_cards(series.baseline_mean()),
    );
    Paragraph::new(BASELINE_CAPTION)
        .style(theme::muted())
        .render(rows[4], frame);
}
