//! Centralized application state
//!
//! The root state is split into five independently owned slices. Each slice
//! has a pure reducer `(SliceState, &Action) -> SliceState`; the root reducer
//! hands every action to every slice and reassembles the results. Slices
//! return their input unchanged for actions they do not recognize.

pub mod actions;
pub mod auth;
pub mod cravings;
pub mod eco;
pub mod sessions;
pub mod tasks;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use actions::Action;
pub use auth::{AuthState, AuthStatus};
pub use cravings::CravingsState;
pub use eco::EcoState;
pub use sessions::SessionsState;
pub use tasks::TasksState;

/// Names of the root state slices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceKey {
    Auth,
    Cravings,
    Tasks,
    Sessions,
    Eco,
}

impl SliceKey {
    pub const ALL: [SliceKey; 5] = [
        SliceKey::Auth,
        SliceKey::Cravings,
        SliceKey::Tasks,
        SliceKey::Sessions,
        SliceKey::Eco,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::Auth => "auth",
            SliceKey::Cravings => "cravings",
            SliceKey::Tasks => "tasks",
            SliceKey::Sessions => "sessions",
            SliceKey::Eco => "eco",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Root application state
///
/// Single source of truth for everything the screens display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootState {
    pub auth: AuthState,
    pub cravings: CravingsState,
    pub tasks: TasksState,
    pub sessions: SessionsState,
    pub eco: EcoState,
}

/// Root reducer
///
/// Applies `action` to each slice independently. Pure: no I/O, no clock,
/// no randomness.
pub fn reduce(state: RootState, action: &Action) -> RootState {
    RootState {
        auth: auth::reduce(state.auth, action),
        cravings: cravings::reduce(state.cravings, action),
        tasks: tasks::reduce(state.tasks, action),
        sessions: sessions::reduce(state.sessions, action),
        eco: eco::reduce(state.eco, action),
    }
}

/// The state store
///
/// Owns the root state for the lifetime of the application. The only way
/// to change it is `dispatch`.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: RootState,
    dispatched: u64,
}

impl Store {
    /// Create a store holding the initial state of every slice
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a previously captured state
    pub fn with_state(state: RootState) -> Self {
        Self { state, dispatched: 0 }
    }

    /// Current snapshot of the root state
    pub fn get_state(&self) -> &RootState {
        &self.state
    }

    /// Apply an action to every slice, synchronously
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.type_name(), "dispatch");

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        self.dispatched += 1;
    }

    /// Number of actions dispatched so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched
    }
}
