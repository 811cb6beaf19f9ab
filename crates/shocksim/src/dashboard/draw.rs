#![forbid(unsafe_code)]

//! Cell-level drawing helpers shared by the chart and slider widgets.

use ftui_core::geometry::Rect;
use ftui_render::cell::{Cell, PackedRgba};
use ftui_render::frame::Frame;

/// Set one cell if `(x, y)` lies inside `clip`.
pub fn put_char(frame: &mut Frame, clip: Rect, x: u16, y: u16, ch: char, color: PackedRgba) {
    if x >= clip.x && x < clip.right() && y >= clip.y && y < clip.bottom() {
        frame.buffer.set(x, y, Cell::from_char(ch).with_fg(color));
    }
}

/// Write `text` starting at `(x, y)`, clipped to `clip`. Returns the column
/// after the last written character.
pub fn put_str(frame: &mut Frame, clip: Rect, x: u16, y: u16, text: &str, color: PackedRgba) -> u16 {
    let mut col = x;
    for ch in text.chars() {
        if col >= clip.right() {
            break;
        }
        put_char(frame, clip, col, y, ch, color);
        col = col.saturating_add(1);
    }
    col
}

/// Visible width of a plain label, one column per char.
#[must_use]
pub fn label_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
