//! Screen components
//!
//! Every screen module has:
//! - `State`: its local state, owned by the application root
//! - `render(frame, area, props)`: draws the screen from the root state,
//!   its own local state and the top navigation entry
//! - `on_key(local, key, root) -> Vec<Intent>`: turns a key into intents
//!
//! The route table maps each `ScreenId` to one of the `render_*` entry
//! points below.

pub mod craving_log;
pub mod eco_impact;
pub mod history;
pub mod home;
pub mod login;
pub mod onboarding;
pub mod register;
pub mod settings;
pub mod task_player;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use tui_textarea::TextArea;

use libquitmath::error::NavigationError;
use libquitmath::{NavEntry, RootState, RouteTable, ScreenId};

use crate::app::Intent;
use crate::ui::Theme;

/// What the application root hands to a route's render entry point
pub struct View<'a> {
    pub root: &'a RootState,
    pub locals: &'a ScreenLocals,
    pub entry: &'a NavEntry,
    pub theme: Theme,
}

impl<'a> View<'a> {
    pub fn props<L>(&self, local: &'a L) -> Props<'a, L> {
        Props {
            root: self.root,
            local,
            entry: self.entry,
            theme: self.theme,
        }
    }
}

/// Read-only inputs of one screen's render function
pub struct Props<'a, L> {
    pub root: &'a RootState,
    pub local: &'a L,
    pub entry: &'a NavEntry,
    pub theme: Theme,
}

pub type RenderFn = fn(&mut Frame, Rect, &View);

/// The application's route table: every screen, starting at Onboarding
pub fn route_table() -> Result<RouteTable<RenderFn>, NavigationError> {
    RouteTable::standard(|id| match id {
        ScreenId::Onboarding => render_onboarding as RenderFn,
        ScreenId::Login => render_login,
        ScreenId::Register => render_register,
        ScreenId::Home => render_home,
        ScreenId::CravingLog => render_craving_log,
        ScreenId::TaskPlayer => render_task_player,
        ScreenId::History => render_history,
        ScreenId::EcoImpact => render_eco_impact,
        ScreenId::Settings => render_settings,
    })
}

fn render_onboarding(frame: &mut Frame, area: Rect, view: &View) {
    onboarding::render(frame, area, &view.props(&view.locals.onboarding));
}

fn render_login(frame: &mut Frame, area: Rect, view: &View) {
    login::render(frame, area, &view.props(&view.locals.login));
}

fn render_register(frame: &mut Frame, area: Rect, view: &View) {
    register::render(frame, area, &view.props(&view.locals.register));
}

fn render_home(frame: &mut Frame, area: Rect, view: &View) {
    home::render(frame, area, &view.props(&view.locals.home));
}

fn render_craving_log(frame: &mut Frame, area: Rect, view: &View) {
    craving_log::render(frame, area, &view.props(&view.locals.craving_log));
}

fn render_task_player(frame: &mut Frame, area: Rect, view: &View) {
    task_player::render(frame, area, &view.props(&view.locals.task_player));
}

fn render_history(frame: &mut Frame, area: Rect, view: &View) {
    history::render(frame, area, &view.props(&view.locals.history));
}

fn render_eco_impact(frame: &mut Frame, area: Rect, view: &View) {
    eco_impact::render(frame, area, &view.props(&view.locals.eco_impact));
}

fn render_settings(frame: &mut Frame, area: Rect, view: &View) {
    settings::render(frame, area, &view.props(&view.locals.settings));
}

/// Local state of every screen
#[derive(Debug, Default)]
pub struct ScreenLocals {
    pub onboarding: onboarding::State,
    pub login: login::State,
    pub register: register::State,
    pub home: home::State,
    pub craving_log: craving_log::State,
    pub task_player: task_player::State,
    pub history: history::State,
    pub eco_impact: eco_impact::State,
    pub settings: settings::State,
}

impl ScreenLocals {
    /// Prepare the local state of the screen that just became visible
    pub fn enter(&mut self, entry: &NavEntry, root: &RootState) {
        match entry.screen {
            ScreenId::Login => self.login = login::State::default(),
            ScreenId::Register => self.register = register::State::default(),
            ScreenId::Home => self.home = home::State::default(),
            ScreenId::CravingLog => self.craving_log = craving_log::State::default(),
            ScreenId::TaskPlayer => self.task_player.enter(&entry.params),
            ScreenId::History => self.history = history::State::default(),
            ScreenId::EcoImpact => self.eco_impact = eco_impact::State::default(),
            ScreenId::Settings => self.settings.enter(root),
            ScreenId::Onboarding => {}
        }
    }

    /// Forget typed credentials
    pub fn clear_credentials(&mut self) {
        self.login = login::State::default();
        self.register = register::State::default();
    }

    /// Whether printable keys on `screen` are text input
    pub fn captures_text(&self, screen: ScreenId) -> bool {
        match screen {
            ScreenId::Login | ScreenId::Register => true,
            ScreenId::CravingLog => self.craving_log.editing_note(),
            ScreenId::TaskPlayer => self.task_player.answering(),
            _ => false,
        }
    }
}

/// Route a key to the visible screen's handler
pub fn handle_key(locals: &mut ScreenLocals, screen: ScreenId, key: KeyEvent, root: &RootState) -> Vec<Intent> {
    match screen {
        ScreenId::Onboarding => onboarding::on_key(&mut locals.onboarding, key, root),
        ScreenId::Login => login::on_key(&mut locals.login, key, root),
        ScreenId::Register => register::on_key(&mut locals.register, key, root),
        ScreenId::Home => home::on_key(&mut locals.home, key, root),
        ScreenId::CravingLog => craving_log::on_key(&mut locals.craving_log, key, root),
        ScreenId::TaskPlayer => task_player::on_key(&mut locals.task_player, key, root),
        ScreenId::History => history::on_key(&mut locals.history, key, root),
        ScreenId::EcoImpact => eco_impact::on_key(&mut locals.eco_impact, key, root),
        ScreenId::Settings => settings::on_key(&mut locals.settings, key, root),
    }
}

/// Single-line input
pub(crate) fn text_field(placeholder: &str) -> TextArea<'static> {
    let mut field = TextArea::default();
    field.set_placeholder_text(placeholder);
    field.set_cursor_line_style(ratatui::style::Style::default());
    field
}

pub(crate) fn field_text(field: &TextArea<'_>) -> String {
    field.lines().join("\n")
}
