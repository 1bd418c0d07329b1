//! Error types for quitmath-tui

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Core library error
    #[error("{0}")]
    Core(#[from] libquitmath::QuitMathError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Route table could not be built
    #[error("Navigation error: {0}")]
    Navigation(#[from] libquitmath::error::NavigationError),
}

pub type Result<T> = std::result::Result<T, TuiError>;
