//! Application module
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: `(State, Action) -> State`
//! - Event: terminal input

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Intent, Request};
pub use reducer::{apply_intents, reduce};
pub use state::{AppState, UiConfig};
