//! quitmath-tui library
//!
//! Application root, screen components and terminal plumbing. Exposed as a
//! library so the screens and the key handling can be tested without a
//! terminal.

pub mod app;
pub mod error;
pub mod screens;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{reduce, Action, AppState};
pub use error::{Result, TuiError};
