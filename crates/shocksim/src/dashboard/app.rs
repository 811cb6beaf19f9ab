#![forbid(unsafe_code)]

//! Top-level dashboard model.

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_runtime::{Cmd, Model};
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use ftui_widgets::tabs::{Tab as TabItem, Tabs, TabsState};
use ftui_widgets::{StatefulWidget, Widget};
use shocksim_core::{Impact, ParamSource, ShockInput, format};

use super::scenario::ScenarioView;
use super::{forecast, theme};
use crate::context::DashboardContext;

pub const TITLE: &str = "Food Security Impact & Scenario Simulator";
pub const SUBTITLE: &str =
    "Quantifying the systemic availability shock impact on national Kcal utilization.";

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Forecast,
    Scenario,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Forecast, Self::Scenario];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Forecast => "Forecast",
            Self::Scenario => "Scenario",
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::Forecast)
    }
}

/// Top-level application message.
#[derive(Debug, Clone)]
pub enum DashboardMsg {
    Event(Event),
}

impl From<Event> for DashboardMsg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Dashboard state: the immutable startup context plus the slider position
/// and the impact evaluated for it.
pub struct DashboardApp {
    context: DashboardContext,
    tabs: TabsState,
    shock: ShockInput,
    impact: Impact,
    show_help: bool,
}

impl DashboardApp {
    #[must_use]
    pub fn new(context: DashboardContext) -> Self {
        let shock = context.initial_shock();
        let impact = context.params().impact(shock);
        Self {
            context,
            tabs: TabsState::default(),
            shock,
            impact,
            show_help: false,
        }
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        Tab::from_index(self.tabs.active)
    }

    #[must_use]
    pub fn shock(&self) -> ShockInput {
        self.shock
    }

    #[must_use]
    pub fn impact(&self) -> &Impact {
        &self.impact
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    /// Move the slider and re-evaluate. Returns whether the value changed.
    pub fn set_shock(&mut self, shock: ShockInput) -> bool {
        if shock == self.shock {
            return false;
        }
        self.shock = shock;
        self.impact = self.context.params().impact(shock);
        tracing::debug!(
            message = "scenario.update",
            shock_pct = shock.value(),
            deviation = self.impact.deviation,
            sign = self.impact.sign.as_str()
        );
        true
    }

    fn select_tab(&mut self, index: usize) {
        self.tabs.select(index, Tab::ALL.len());
    }

    fn cycle_tab(&mut self, forward: bool) {
        let count = Tab::ALL.len();
        let next = if forward {
            (self.tabs.active + 1) % count
        } else {
            (self.tabs.active + count - 1) % count
        };
        self.select_tab(next);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<DashboardMsg> {
        if key.kind != KeyEventKind::Press {
            return Cmd::None;
        }
        if key.ctrl() {
            return if key.is_char('c') { Cmd::Quit } else { Cmd::None };
        }

        match key.code {
            KeyCode::Char('q') => return Cmd::Quit,
            KeyCode::Escape if self.show_help => {
                self.show_help = false;
                return Cmd::None;
            }
            KeyCode::Escape => return Cmd::Quit,
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                return Cmd::None;
            }
            KeyCode::Tab if key.shift() => self.cycle_tab(false),
            KeyCode::Tab => self.cycle_tab(true),
            KeyCode::BackTab => self.cycle_tab(false),
            KeyCode::Char('1') => self.select_tab(0),
            KeyCode::Char('2') => self.select_tab(1),
            _ => match self.active_tab() {
                Tab::Scenario => self.handle_scenario_key(key.code),
                Tab::Forecast => {
                    self.tabs.handle_key(&key, Tab::ALL.len());
                }
            },
        }
        Cmd::None
    }

    fn handle_scenario_key(&mut self, code: KeyCode) {
        let next = match code {
            KeyCode::Left | KeyCode::Char('h') => self.shock.step_down(),
            KeyCode::Right | KeyCode::Char('l') => self.shock.step_up(),
            KeyCode::PageUp => self.shock.jump_up(),
            KeyCode::PageDown => self.shock.jump_down(),
            KeyCode::Home => self.shock.to_min(),
            KeyCode::End => self.shock.to_max(),
            KeyCode::Char('0') => ShockInput::zero(),
            KeyCode::Char('r') => self.context.initial_shock(),
            _ => return,
        };
        self.set_shock(next);
    }

    fn status_text(&self) -> String {
        let source = match self.context.params().source() {
            ParamSource::Published => "published".to_string(),
            ParamSource::Refit { observations, .. } => format!("refit, n={observations}"),
        };
        let keys = match self.active_tab() {
            Tab::Forecast => "Tab/1-2 switch  ←/→ tabs",
            Tab::Scenario => "Tab/1-2 switch  ←/→ ±0.5  PgUp/PgDn ±5  Home/End  0 zero  r reset",
        };
        format!(
            " B = {} ({source})  |  {keys}  ? help  q quit",
            format::signed_4(self.context.params().shock_coefficient())
        )
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let overlay_width = 56u16.min(area.width.saturating_sub(4));
        let overlay_height = 15u16.min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        let help_block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title("Help")
            .title_alignment(Alignment::Center)
            .style(theme::help_overlay());

        let help_inner = help_block.inner(overlay_area);
        help_block.render(overlay_area, frame);

        let help_text = Paragraph::new(
            "Keybindings:\n\n\
             Tab / Shift+Tab   Next / previous tab\n\
             1 / 2             Forecast / Scenario\n\
             Left / Right, h/l Shock -0.5 / +0.5\n\
             PgDn / PgUp       Shock -5 / +5\n\
             Home / End        Shock -20% / +20%\n\
             0                 Zero shock\n\
             r                 Reset shock\n\
             ?                 Toggle help\n\
             q / Esc / Ctrl+C  Quit",
        )
        .style(theme::help_overlay());
        help_text.render(help_inner, frame);
    }
}

impl Model for DashboardApp {
    type Message = DashboardMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        tracing::info!(
            message = "dashboard.start",
            rows = self.context.series().len(),
            shock_pct = self.shock.value()
        );
        Cmd::None
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            DashboardMsg::Event(Event::Key(key)) => self.handle_key(key),
            DashboardMsg::Event(_) => Cmd::None,
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());

        // Header (2 rows) + tab bar + content + status bar.
        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Min(1),
                Constraint::Fixed(1),
            ])
            .split(area);

        Paragraph::new(TITLE)
            .style(theme::title())
            .render(chunks[0], frame);
        Paragraph::new(SUBTITLE)
            .style(theme::subtitle())
            .render(chunks[1], frame);

        let tabs = Tabs::new(Tab::ALL.iter().map(|tab| TabItem::new(tab.title())))
            .style(theme::tab_bar())
            .active_style(theme::tab_active());
        let mut tabs_state = self.tabs.clone();
        StatefulWidget::render(&tabs, chunks[2], frame, &mut tabs_state);

        let active = self.active_tab();
        let content_block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(active.title())
            .title_alignment(Alignment::Center)
            .style(theme::content_border());
        let inner = content_block.inner(chunks[3]);
        content_block.render(chunks[3], frame);

        match active {
            Tab::Forecast => forecast::render(frame, inner, self.context.series()),
            Tab::Scenario => ScenarioView {
                params: self.context.params(),
                shock: self.shock,
                impact: &self.impact,
            }
            .render(frame, inner),
        }

        if self.show_help {
            self.render_help_overlay(frame, area);
        }

        Paragraph::new(self.status_text())
            .style(theme::status_bar())
            .render(chunks[4], frame);
    }
}
