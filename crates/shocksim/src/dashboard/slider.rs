#![forbid(unsafe_code)]

//! Horizontal slider for the shock percentage.

use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_style::Style;
use ftui_widgets::Widget;
use shocksim_core::{ShockInput, format};

use super::draw::{label_width, put_char, put_str};
use super::theme;

/// Three rows: label and value, track with knob, range ends.
#[derive(Debug, Clone)]
pub struct Slider<'a> {
    label: &'a str,
    value: ShockInput,
    track_style: Style,
    knob_style: Style,
}

impl<'a> Slider<'a> {
    #[must_use]
    pub fn new(label: &'a str, value: ShockInput) -> Self {
        Self {
            label,
            value,
            track_style: theme::slider_track(),
            knob_style: theme::slider_knob(),
        }
    }

    /// Column of the knob for a track starting at `start` with `len` cells.
    #[must_use]
    pub fn knob_column(value: ShockInput, start: u16, len: u16) -> u16 {
        let span = f64::from(len.saturating_sub(1));
        start + (value.fraction() * span).round() as u16
    }
}

impl Widget for Slider<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 8 || area.height == 0 {
            return;
        }
        let track_color = self.track_style.fg.unwrap_or(theme::fg::MUTED);
        let knob_color = self.knob_style.fg.unwrap_or(theme::accent::INFO);

        let value = self.value.label();
        let value_x = area.right().saturating_sub(label_width(&value));
        // Keep one blank column between the label and the value.
        let label_clip = Rect::new(area.x, area.y, value_x.saturating_sub(area.x + 1), 1);
        put_str(frame, label_clip, area.x, area.y, self.label, theme::fg::SECONDARY);
        put_str(frame, area, value_x, area.y, &value, knob_color);
        if area.height < 2 {
            return;
        }

        let row = area.y + 1;
        put_char(frame, area, area.x, row, '├', track_color);
        put_char(frame, area, area.right() - 1, row, '┤', track_color);
        let start = area.x + 1;
        let len = area.width - 2;
        let knob = Self::knob_column(self.value, start, len);
        for x in start..start + len {
            let (ch, color) = if x == knob {
                ('●', knob_color)
            } else if x < knob {
                ('━', knob_color)
            } else {
                ('─', track_color)
            };
            put_char(frame, area, x, row, ch, color);
        }
        if area.height < 3 {
            return;
        }

        let min = format::percent_1(ShockInput::MIN);
        let max = format::percent_1(ShockInput::MAX);
        put_str(frame, area, area.x, row + 1, &min, theme::fg::MUTED);
        put_str(
            frame,
            area,
            area.right().saturating_sub(label_width(&max)),
            row + 1,
            &max,
            theme::fg::MUTED,
        );
    }
}
