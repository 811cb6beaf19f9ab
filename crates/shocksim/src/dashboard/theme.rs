#![forbid(unsafe_code)]

//! Palette and named styles for the dashboard.

use ftui_render::cell::PackedRgba;
use ftui_style::{Style, StyleFlags};
use shocksim_core::{SeriesKind, Tone};

// ---------------------------------------------------------------------------
// Color palette
// ---------------------------------------------------------------------------

pub mod bg {
    use super::*;

    pub const SURFACE: PackedRgba = PackedRgba::rgb(34, 37, 50);
    pub const OVERLAY: PackedRgba = PackedRgba::rgb(46, 50, 68);
    pub const HIGHLIGHT: PackedRgba = PackedRgba::rgb(60, 66, 90);
}

pub mod fg {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(225, 228, 238);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(180, 186, 205);
    pub const MUTED: PackedRgba = PackedRgba::rgb(125, 130, 150);
}

pub mod accent {
    use super::*;

    pub const SUCCESS: PackedRgba = PackedRgba::rgb(90, 210, 130);
    pub const WARNING: PackedRgba = PackedRgba::rgb(245, 195, 80);
    pub const ERROR: PackedRgba = PackedRgba::rgb(240, 95, 95);
    pub const INFO: PackedRgba = PackedRgba::rgb(100, 190, 250);
}

/// Line colours, matching the printed report: black actual, blue baseline,
/// red total. Black is lifted to a light grey for dark terminals.
pub mod series {
    use super::*;

    pub const ACTUAL: PackedRgba = PackedRgba::rgb(230, 230, 230);
    pub const BASELINE: PackedRgba = PackedRgba::rgb(90, 140, 255);
    pub const TOTAL: PackedRgba = PackedRgba::rgb(240, 80, 80);
}

#[must_use]
pub const fn series_color(kind: SeriesKind) -> PackedRgba {
    match kind {
        SeriesKind::SupplyTarget => series::ACTUAL,
        SeriesKind::BaselineForecast => series::BASELINE,
        SeriesKind::TotalForecast => series::TOTAL,
    }
}

/// Marker glyph per series (circle, triangle, square).
#[must_use]
pub const fn series_marker(kind: SeriesKind) -> char {
    match kind {
        SeriesKind::SupplyTarget => '●',
        SeriesKind::BaselineForecast => '▲',
        SeriesKind::TotalForecast => '■',
    }
}

#[must_use]
pub const fn tone_color(tone: Tone) -> PackedRgba {
    match tone {
        Tone::Success => accent::SUCCESS,
        Tone::Error => accent::ERROR,
        Tone::Warning => accent::WARNING,
    }
}

// ---------------------------------------------------------------------------
// Named styles
// ---------------------------------------------------------------------------

pub fn title() -> Style {
    Style::new().fg(fg::PRIMARY).attrs(StyleFlags::BOLD)
}

pub fn subtitle() -> Style {
    Style::new().fg(fg::SECONDARY).attrs(StyleFlags::ITALIC)
}

pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn info() -> Style {
    Style::new().fg(accent::INFO)
}

pub fn metric_value() -> Style {
    Style::new().fg(fg::PRIMARY).attrs(StyleFlags::BOLD)
}

pub fn tone(tone: Tone) -> Style {
    Style::new().fg(tone_color(tone)).attrs(StyleFlags::BOLD)
}

// ---------------------------------------------------------------------------
// Component styles
// ---------------------------------------------------------------------------

pub fn tab_bar() -> Style {
    Style::new().bg(bg::SURFACE).fg(fg::SECONDARY)
}

pub fn tab_active() -> Style {
    Style::new()
        .bg(bg::HIGHLIGHT)
        .fg(fg::PRIMARY)
        .attrs(StyleFlags::BOLD)
}

pub fn status_bar() -> Style {
    Style::new().bg(bg::SURFACE).fg(fg::MUTED)
}

pub fn content_border() -> Style {
    Style::new().fg(PackedRgba::rgb(70, 76, 110))
}

pub fn card_border() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn help_overlay() -> Style {
    Style::new().bg(bg::OVERLAY).fg(fg::PRIMARY)
}

pub fn slider_track() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn slider_knob() -> Style {
    Style::new().fg(accent::INFO).attrs(StyleFlags::BOLD)
}
