#![forbid(unsafe_code)]

//! Bordered title/value card.

use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_style::Style;
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use shocksim_core::ParamCard;

use super::draw::put_str;
use super::theme;

#[derive(Debug, Clone)]
pub struct MetricCard<'a> {
    title: &'a str,
    value: &'a str,
    value_style: Style,
}

impl<'a> MetricCard<'a> {
    #[must_use]
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            value_style: theme::metric_value(),
        }
    }

    #[must_use]
    pub fn from_param(card: &'a ParamCard) -> Self {
        Self::new(card.title, &card.value)
    }

    #[must_use]
    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    /// Borderless `Title: value` on the first row of `area`.
    pub fn render_inline(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let value_color = self.value_style.fg.unwrap_or(theme::fg::PRIMARY);
        let x = put_str(frame, area, area.x, area.y, self.title, theme::fg::SECONDARY);
        let x = put_str(frame, area, x, area.y, ": ", theme::fg::SECONDARY);
        put_str(frame, area, x, area.y, self.value, value_color);
    }
}

impl Widget for MetricCard<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title)
            .title_alignment(Alignment::Left)
            .style(theme::card_border());
        let inner = block.inner(area);
        block.render(area, frame);
        if inner.is_empty() {
            return;
        }
        Paragraph::new(self.value)
            .style(self.value_style)
            .render(inner, frame);
    }
}

/// Lay `cards` out side by side in equal columns.
pub fn render_row(frame: &mut Frame, area: Rect, cards: &[ParamCard]) {
    if cards.is_empty() || area.is_empty() {
        return;
    }
    let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
    let columns = Flex::horizontal()
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);
    for (card, column) in cards.iter().zip(columns) {
        MetricCard::from_param(card).render(column, frame);
    }
}

/// One `Title: value` row per card, for areas too narrow for [`render_row`].
pub fn render_list(frame: &mut Frame, area: Rect, cards: &[ParamCard]) {
    for (card, y) in cards.iter().zip(area.y..area.bottom()) {
        MetricCard::from_param(card).render_inline(frame, Rect::new(area.x, y, area.width, 1));
    }
}

#[cfg(test)]
mod tests {
    use ftui_render::grapheme_pool::GraphemePool;
    use shocksim_core::ModelParams;

    use super::*;

    fn row_text(frame: &Frame, y: u16) -> String {
        (0..frame.buffer.width())
            .map(|x| {
                frame
                    .buffer
                    .get(x, y)
                    .and_then(|cell| cell.content.as_char())
                    .unwrap_or(' ')
            })
            .collect()
    }

    #[test]
    fn card_shows_title_and_value() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(30, 3, &mut pool);
        MetricCard::new("Model Used", "ARIMA(1, 0, 0)").render(Rect::new(0, 0, 30, 3), &mut frame);
        assert!(row_text(&frame, 0).contains("Model Used"));
        assert!(row_text(&frame, 1).contains("ARIMA(1, 0, 0)"));
    }

    #[test]
    fn row_splits_cards_evenly() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(120, 3, &mut pool);
        let cards = ModelParams::published().impact_cards();
        render_row(&mut frame, Rect::new(0, 0, 120, 3), &cards);
        let values = row_text(&frame, 1);
        assert!(values.contains("Linear Regression"));
        assert!(values.contains("-0.0987 kcal per 1% shock"));
        assert!(values.contains("0.69 kcal/cap/day"));
    }

    #[test]
    fn list_keeps_full_values_in_narrow_areas() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(78, 3, &mut pool);
        let cards = ModelParams::published().impact_cards();
        render_list(&mut frame, Rect::new(0, 0, 78, 3), &cards);
        assert_eq!(row_text(&frame, 0).trim_end(), "Model Used: Linear Regression");
        assert_eq!(
            row_text(&frame, 1).trim_end(),
            "Shock Coefficient (B): -0.0987 kcal per 1% shock"
        );
        assert!(row_text(&frame, 2).contains("0.69 kcal/cap/day"));
    }

    #[test]
    fn inline_value_uses_value_style() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(40, 1, &mut pool);
        MetricCard::new("Deviation", "+0.99")
            .value_style(theme::tone(shocksim_core::Tone::Success))
            .render_inline(&mut frame, Rect::new(0, 0, 40, 1));
        assert_eq!(row_text(&frame, 0).trim_end(), "Deviation: +0.99");
        let cell = frame.buffer.get(11, 0).unwrap();
        assert_eq!(cell.fg, theme::accent::SUCCESS);
    }
}
