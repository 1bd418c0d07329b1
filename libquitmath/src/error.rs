//! Error types for Quit-Math

use thiserror::Error;

use crate::navigation::ScreenId;

pub type Result<T> = std::result::Result<T, QuitMathError>;

#[derive(Error, Debug)]
pub enum QuitMathError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuitMathError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuitMathError::InvalidInput(_) => 3,
            QuitMathError::Service(ServiceError::Validation(_)) => 3,
            QuitMathError::Service(ServiceError::Authentication(_)) => 2,
            QuitMathError::Service(_) => 1,
            QuitMathError::Config(_) => 1,
            QuitMathError::Navigation(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Route table construction failures.
///
/// Navigating itself cannot fail: screen identifiers are a closed enum and
/// a table that does not declare every one of them is rejected here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Screen {0} is declared more than once")]
    DuplicateRoute(ScreenId),

    #[error("Screen {0} has no route")]
    MissingRoute(ScreenId),

    #[error("Initial route {0} is not declared")]
    UndeclaredInitialRoute(ScreenId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Simulation failed: {0}")]
    Simulation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = QuitMathError::InvalidInput("c0 out of range".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_validation_error() {
        let error = QuitMathError::Service(ServiceError::Validation("score".to_string()));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_authentication_error() {
        let error = QuitMathError::Service(ServiceError::Authentication("bad password".to_string()));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_simulation_error() {
        let error = QuitMathError::Service(ServiceError::Simulation("length".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_and_navigation() {
        let config = QuitMathError::Config(ConfigError::MissingField("ode".to_string()));
        assert_eq!(config.exit_code(), 1);

        let nav = QuitMathError::Navigation(NavigationError::MissingRoute(ScreenId::Home));
        assert_eq!(nav.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting() {
        let error = QuitMathError::Service(ServiceError::Authentication(
            "Incorrect email or password.".to_string(),
        ));
        assert_eq!(
            error.to_string(),
            "Service error: Authentication failed: Incorrect email or password."
        );

        let nav = NavigationError::DuplicateRoute(ScreenId::Login);
        assert_eq!(nav.to_string(), "Screen Login is declared more than once");
    }

    #[test]
    fn test_invalid_value_formatting() {
        let error = ConfigError::InvalidValue {
            field: "ode.tau_r".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for ode.tau_r: must be positive");
    }

    #[test]
    fn test_error_conversion_from_service_error() {
        let error: QuitMathError = ServiceError::Simulation("test".to_string()).into();
        assert!(matches!(error, QuitMathError::Service(_)));
    }
}
