//! Screen routing
//!
//! - `ScreenId`: the closed set of screens
//! - `RouteTable`: screen -> render entry point + display options, fixed at startup
//! - `Navigator`: the runtime stack of visible screens
//!
//! The route table is generic over the render entry point so that the core
//! library stays independent of the terminal toolkit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NavigationError;
use crate::types::TaskKind;

const SCREEN_COUNT: usize = 9;

/// Screen identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    Onboarding,
    Login,
    Register,
    Home,
    CravingLog,
    TaskPlayer,
    History,
    EcoImpact,
    Settings,
}

impl ScreenId {
    pub const ALL: [ScreenId; SCREEN_COUNT] = [
        ScreenId::Onboarding,
        ScreenId::Login,
        ScreenId::Register,
        ScreenId::Home,
        ScreenId::CravingLog,
        ScreenId::TaskPlayer,
        ScreenId::History,
        ScreenId::EcoImpact,
        ScreenId::Settings,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScreenId::Onboarding => "Onboarding",
            ScreenId::Login => "Login",
            ScreenId::Register => "Register",
            ScreenId::Home => "Home",
            ScreenId::CravingLog => "CravingLog",
            ScreenId::TaskPlayer => "TaskPlayer",
            ScreenId::History => "History",
            ScreenId::EcoImpact => "EcoImpact",
            ScreenId::Settings => "Settings",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Title and header visibility of the stock route table
    pub fn default_options(&self) -> ScreenOptions {
        match self {
            ScreenId::Onboarding => ScreenOptions::headerless("Welcome"),
            ScreenId::Login => ScreenOptions::titled("Sign in"),
            ScreenId::Register => ScreenOptions::titled("Create account"),
            ScreenId::Home => ScreenOptions::titled("Quit-Math"),
            ScreenId::CravingLog => ScreenOptions::titled("Craving log"),
            ScreenId::TaskPlayer => ScreenOptions::titled("Task session"),
            ScreenId::History => ScreenOptions::titled("History"),
            ScreenId::EcoImpact => ScreenOptions::titled("Eco impact"),
            ScreenId::Settings => ScreenOptions::titled("Settings"),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScreenId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown screen: '{}'", s))
    }
}

/// Static display options of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub title: &'static str,
    pub header_shown: bool,
}

impl ScreenOptions {
    pub const fn titled(title: &'static str) -> Self {
        Self {
            title,
            header_shown: true,
        }
    }

    pub const fn headerless(title: &'static str) -> Self {
        Self {
            title,
            header_shown: false,
        }
    }
}

/// One entry of the route table
#[derive(Debug, Clone)]
pub struct Route<R> {
    pub id: ScreenId,
    pub options: ScreenOptions,
    pub render: R,
}

impl<R> Route<R> {
    /// Route with the stock display options for `id`
    pub fn new(id: ScreenId, render: R) -> Self {
        Self {
            id,
            options: id.default_options(),
            render,
        }
    }
}

/// Ordered, immutable mapping from screen to route
#[derive(Debug, Clone)]
pub struct RouteTable<R> {
    routes: Vec<Route<R>>,
    /// Position in `routes` for each `ScreenId`, indexed by discriminant
    slots: [usize; SCREEN_COUNT],
    initial: ScreenId,
}

impl<R> RouteTable<R> {
    /// Build a route table
    ///
    /// # Errors
    ///
    /// - `DuplicateRoute` if a screen is declared twice
    /// - `UndeclaredInitialRoute` if `initial` has no route
    /// - `MissingRoute` if any other screen has no route
    pub fn new(initial: ScreenId, routes: Vec<Route<R>>) -> Result<Self, NavigationError> {
        let mut slots: [Option<usize>; SCREEN_COUNT] = [None; SCREEN_COUNT];

        for (pos, route) in routes.iter().enumerate() {
            let slot = &mut slots[route.id.index()];
            if slot.is_some() {
                return Err(NavigationError::DuplicateRoute(route.id));
            }
            *slot = Some(pos);
        }

        if slots[initial.index()].is_none() {
            return Err(NavigationError::UndeclaredInitialRoute(initial));
        }

        let mut resolved = [0usize; SCREEN_COUNT];
        for id in ScreenId::ALL {
            resolved[id.index()] = slots[id.index()].ok_or(NavigationError::MissingRoute(id))?;
        }

        Ok(Self {
            routes,
            slots: resolved,
            initial,
        })
    }

    /// Route table declaring every screen with its stock options, starting
    /// at Onboarding
    pub fn standard(mut render_for: impl FnMut(ScreenId) -> R) -> Result<Self, NavigationError> {
        let routes = ScreenId::ALL
            .iter()
            .map(|&id| Route::new(id, render_for(id)))
            .collect();
        Self::new(ScreenId::Onboarding, routes)
    }

    pub fn initial(&self) -> ScreenId {
        self.initial
    }

    pub fn get(&self, id: ScreenId) -> &Route<R> {
        &self.routes[self.slots[id.index()]]
    }

    pub fn options(&self, id: ScreenId) -> ScreenOptions {
        self.get(id).options
    }

    /// Routes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Route<R>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Per-entry navigation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavParams {
    #[default]
    None,
    /// Open the task player with this task preselected
    Task { kind: TaskKind },
}

/// One entry of the navigation stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub screen: ScreenId,
    pub params: NavParams,
}

impl NavEntry {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            params: NavParams::None,
        }
    }
}

/// Navigation stack
///
/// Never empty: the root entry cannot be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    root: NavEntry,
    above: Vec<NavEntry>,
}

impl Navigator {
    /// Navigator positioned on the table's initial route
    pub fn new<R>(routes: &RouteTable<R>) -> Self {
        Self::starting_at(routes.initial())
    }

    pub fn starting_at(screen: ScreenId) -> Self {
        Self {
            root: NavEntry::new(screen),
            above: Vec::new(),
        }
    }

    /// Push `screen` onto the stack
    pub fn navigate(&mut self, screen: ScreenId) {
        self.navigate_with(screen, NavParams::None);
    }

    /// Push `screen` with parameters onto the stack
    pub fn navigate_with(&mut self, screen: ScreenId, params: NavParams) {
        tracing::debug!(from = %self.current().screen, to = %screen, "navigate");
        self.above.push(NavEntry { screen, params });
    }

    /// Pop the top entry
    ///
    /// Returns `false` (and does nothing) at the root.
    pub fn go_back(&mut self) -> bool {
        match self.above.pop() {
            Some(entry) => {
                tracing::debug!(from = %entry.screen, to = %self.current().screen, "back");
                true
            }
            None => false,
        }
    }

    /// Replace the whole stack with a single entry
    pub fn reset(&mut self, screen: ScreenId) {
        tracing::debug!(to = %screen, "reset");
        self.root = NavEntry::new(screen);
        self.above.clear();
    }

    /// The visible entry
    pub fn current(&self) -> &NavEntry {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn depth(&self) -> usize {
        1 + self.above.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Screen identifiers from bottom to top
    pub fn screens(&self) -> Vec<ScreenId> {
        std::iter::once(&self.root)
            .chain(self.above.iter())
            .map(|e| e.screen)
            .collect()
    }
}
