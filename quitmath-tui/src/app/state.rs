//! Application state
//!
//! One value owns everything the application root is responsible for: the
//! store (created exactly once), the navigator, the screens' local state and
//! the overlays. State transitions go through the reducer (see
//! `reducer.rs`).

use libquitmath::{Config, NavEntry, Navigator, RootState, RouteTable, Store};

use super::actions::Request;
use crate::screens::ScreenLocals;

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,

    pub store: Store,

    pub navigator: Navigator,

    /// Per-screen local state, each field owned by one screen
    pub screens: ScreenLocals,

    pub help_visible: bool,

    /// Error overlay
    pub error: Option<String>,

    /// Status bar message
    pub status: Option<String>,

    pub config: UiConfig,

    /// Collaborator requests raised since the event loop last looked
    pub outbox: Vec<Request>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            colors_enabled: true,
            tick_rate_ms: 100,
        }
    }
}

impl UiConfig {
    /// UI settings after `QUITMATH_TUI_TICK_MS` / `NO_COLOR` overrides
    pub fn from_config(config: &Config) -> Self {
        let mut config = config.clone();
        config.apply_env_overrides();
        Self {
            colors_enabled: config.ui.colors,
            tick_rate_ms: config.ui.tick_rate_ms,
        }
    }
}

impl AppState {
    /// Fresh state positioned on the route table's initial screen
    pub fn new<R>(routes: &RouteTable<R>, config: UiConfig) -> Self {
        Self {
            should_quit: false,
            store: Store::new(),
            navigator: Navigator::new(routes),
            screens: ScreenLocals::default(),
            help_visible: false,
            error: None,
            status: None,
            config,
            outbox: Vec::new(),
        }
    }

    /// Replace the settings screen's model summary with `config`
    pub fn with_model_config(mut self, config: &Config) -> Self {
        self.screens.settings = crate::screens::settings::State::new(config);
        self
    }

    pub fn root(&self) -> &RootState {
        self.store.get_state()
    }

    pub fn current(&self) -> &NavEntry {
        self.navigator.current()
    }

    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some()
    }

    /// Requests raised since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }
}
