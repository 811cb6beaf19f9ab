#![forbid(unsafe_code)]

//! Scenario tab: shock slider on the left, quantified impact on the right,
//! regression parameters underneath.

use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_text::{WrapMode, wrap_text};
use ftui_widgets::Widget;
use ftui_widgets::paragraph::Paragraph;
use shocksim_core::{Impact, ModelParams, ShockInput, format};

use super::card::{self, MetricCard};
use super::slider::Slider;
use super::theme;

pub const HEADING: &str = "Policy Scenario Simulation";
pub const NOTE: &str = "Use the slider to simulate a hypothetical systemic food supply shock for \
                        the next year and instantly calculate the impact on Kcal supply.";
pub const SLIDER_LABEL: &str = "Hypothetical Systemic Supply Shock (%)";
pub const SHOCK_INDEX_INFO: &str = "The Shock Index is defined as the Lagged Year-over-Year % \
                                    Change in Total Supply (Production + Imports - Exports - \
                                    Stock Variation).";
pub const OUTPUT_HEADING: &str = "Quantified Policy Impact";
pub const METRIC_TITLE: &str = "Calculated Utilization Deviation";
pub const PARAMS_HEADING: &str = "Impact Regression";

/// Below this width the input and output panels are stacked.
const WIDE_MIN_WIDTH: u16 = 100;
const COLUMN_GAP: u16 = 2;

/// Everything the tab shows. `impact` is recomputed by the caller whenever
/// `shock` changes.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioView<'a> {
    pub params: &'a ModelParams,
    pub shock: ShockInput,
    pub impact: &'a Impact,
}

impl ScenarioView<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        if area.width >= WIDE_MIN_WIDTH && area.height >= self.wide_height(area.width) {
            self.render_wide(frame, area);
        } else {
            self.render_stacked(frame, area);
        }
    }

    /// Rows the two-column layout needs at `width`.
    fn wide_height(&self, width: u16) -> u16 {
        let column = width.saturating_sub(COLUMN_GAP) / 2;
        let input = 3 + 1 + wrapped_rows(SHOCK_INDEX_INFO, column);
        let output = 1
            + 3
            + wrapped_rows(&self.impact.headline(), column)
            + wrapped_rows(self.impact.message(), column);
        1 + wrapped_rows(NOTE, width) + input.max(output) + 1 + 3 + 2
    }

    fn render_wide(&self, frame: &mut Frame, area: Rect) {
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(wrapped_rows(NOTE, area.width)),
                Constraint::Min(9),
                Constraint::Fixed(1),
                Constraint::Fixed(3),
                Constraint::Fixed(2),
            ])
            .split(area);

        Paragraph::new(HEADING)
            .style(theme::title())
            .render(rows[0], frame);
        Paragraph::new(NOTE)
            .style(theme::subtitle())
            .wrap(WrapMode::Word)
            .render(rows[1], frame);

        let columns = Flex::horizontal()
            .gap(COLUMN_GAP)
            .constraints([Constraint::Percentage(50.0), Constraint::Percentage(50.0)])
            .split(rows[2]);
        self.render_input(frame, columns[0]);
        self.render_output(frame, columns[1]);

        Paragraph::new(PARAMS_HEADING)
            .style(theme::title())
            .render(rows[3], frame);
        card::render_row(frame, rows[4], &self.params.impact_cards());
        Paragraph::new(self.params.interpretation())
            .style(theme::muted())
            .wrap(WrapMode::Word)
            .render(rows[5], frame);
    }

    /// Single column for narrow terminals. Cards collapse to one row each
    /// and the caption gets every row it wraps to.
    fn render_stacked(&self, frame: &mut Frame, area: Rect) {
        let headline = self.impact.headline();
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(3),
                Constraint::Fixed(wrapped_rows(SHOCK_INDEX_INFO, area.width)),
                Constraint::Fixed(1),
                Constraint::Fixed(wrapped_rows(&headline, area.width)),
                Constraint::Fixed(wrapped_rows(self.impact.message(), area.width)),
                Constraint::Fixed(1),
                Constraint::Fixed(3),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(HEADING)
            .style(theme::title())
            .render(rows[0], frame);
        Slider::new(SLIDER_LABEL, self.shock).render(rows[1], frame);
        Paragraph::new(SHOCK_INDEX_INFO)
            .style(theme::info())
            .wrap(WrapMode::Word)
            .render(rows[2], frame);

        let deviation = format::signed_2(self.impact.deviation);
        MetricCard::new(METRIC_TITLE, &deviation)
            .value_style(theme::tone(self.impact.narrative.tone))
            .render_inline(frame, rows[3]);
        Paragraph::new(headline)
            .style(theme::tone(self.impact.narrative.tone))
            .wrap(WrapMode::Word)
            .render(rows[4], frame);
        Paragraph::new(self.impact.message())
            .style(theme::muted())
            .wrap(WrapMode::Word)
            .render(rows[5], frame);

        Paragraph::new(PARAMS_HEADING)
            .style(theme::title())
            .render(rows[6], frame);
        card::render_list(frame, rows[7], &self.params.impact_cards());
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let rows = Flex::vertical()
            .constraints([Constraint::Fixed(3), Constraint::Fixed(1), Constraint::Min(1)])
            .split(area);
        Slider::new(SLIDER_LABEL, self.shock).render(rows[0], frame);
        Paragraph::new(SHOCK_INDEX_INFO)
            .style(theme::info())
            .wrap(WrapMode::Word)
            .render(rows[2], frame);
    }

    fn render_output(&self, frame: &mut Frame, area: Rect) {
        let headline = self.impact.headline();
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(3),
                Constraint::Fixed(wrapped_rows(&headline, area.width)),
                Constraint::Min(1),
            ])
            .split(area);

        Paragraph::new(OUTPUT_HEADING)
            .style(theme::title())
            .render(rows[0], frame);

        let deviation = format::signed_2(self.impact.deviation);
        MetricCard::new(METRIC_TITLE, &deviation).render(rows[1], frame);

        Paragraph::new(headline)
            .style(theme::tone(self.impact.narrative.tone))
            .wrap(WrapMode::Word)
            .render(rows[2], frame);
        Paragraph::new(self.impact.message())
            .style(theme::muted())
            .wrap(WrapMode::Word)
            .render(rows[3], frame);
    }
}

/// Rows `text` occupies when word-wrapped to `width` columns.
fn wrapped_rows(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let lines = wrap_text(text, usize::from(width), WrapMode::Word).len();
    u16::try_from(lines).unwrap_or(u16::MAX)
}
