//! Terminal dashboard: forecast chart and interactive shock scenario.
//!
//! # Controls
//!
//! - Tab / Shift+Tab / 1-2: switch tabs
//! - Left/Right, h/l: move the shock by 0.5 (Scenario tab)
//! - PageUp/PageDown: move the shock by 5
//! - Home/End: jump to -20% / +20%
//! - 0: zero shock, r: reset to the configured shock
//! - ?: toggle help
//! - q / Esc / Ctrl+C: quit

pub mod app;
pub mod card;
pub mod chart;
pub mod draw;
pub mod forecast;
pub mod scenario;
pub mod slider;
pub mod theme;

use ftui_runtime::{App, ScreenMode};

pub use app::{DashboardApp, DashboardMsg, Tab};

use crate::context::DashboardContext;
use crate::error::Result;

/// Run the dashboard on the alternate screen until the user quits.
pub fn run(context: DashboardContext) -> Result<()> {
    App::new(DashboardApp::new(context))
        .screen_mode(ScreenMode::AltScreen)
        .run()?;
    tracing::info!(message = "dashboard.exit");
    Ok(())
}
