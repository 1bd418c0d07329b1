//! Quit-Math - a companion for quitting smoking and vaping
//!
//! The core of the application without any terminal code: a centralized
//! state store with one reducer per slice, a navigation stack over a closed
//! set of screens, and the collaborators that feed the store (accounts,
//! task content, the craving model, the daily Markov model, the task
//! scheduler and the eco-impact calculator).

pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{QuitMathError, Result};
pub use navigation::{NavEntry, NavParams, Navigator, Route, RouteTable, ScreenId, ScreenOptions};
pub use service::QuitMathService;
pub use store::{Action, RootState, SliceKey, Store};
pub use types::{CravingEntry, DailySession, DailyState, EcoRecord, EcoSummaryRow, TaskKind, TaskLog};
