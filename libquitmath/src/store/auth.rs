//! Authentication slice

use serde::{Deserialize, Serialize};

use super::Action;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    #[default]
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub status: AuthStatus,
    /// Email of the signed-in user
    pub user: Option<String>,
    /// Bearer token issued by the account service
    pub token: Option<String>,
    /// Reason the last sign-in attempt failed
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.status == AuthStatus::LoggedIn
    }
}

pub fn reduce(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::Login { user, token } => AuthState {
            status: AuthStatus::LoggedIn,
            user: Some(user.clone()),
            token: token.clone(),
            error: None,
        },

        Action::LoginFailed { error } => AuthState {
            status: AuthStatus::LoggedOut,
            user: None,
            token: None,
            error: Some(error.clone()),
        },

        Action::Logout => AuthState::default(),

        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_then_logout() {
        let state = reduce(
            AuthState::default(),
            &Action::Login {
                user: "sam@example.org".to_string(),
                token: Some("t0k3n".to_string()),
            },
        );
        assert!(state.is_logged_in());
        assert_eq!(state.token.as_deref(), Some("t0k3n"));

        let state = reduce(state, &Action::Logout);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_failed_login_clears_session_and_keeps_reason() {
        let logged_in = reduce(
            AuthState::default(),
            &Action::Login {
                user: "a".to_string(),
                token: None,
            },
        );

        let state = reduce(
            logged_in,
            &Action::LoginFailed {
                error: "Incorrect email or password.".to_string(),
            },
        );

        assert!(!state.is_logged_in());
        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("Incorrect email or password."));
    }

    #[test]
    fn test_successful_login_clears_previous_error() {
        let failed = reduce(
            AuthState::default(),
            &Action::LoginFailed {
                error: "nope".to_string(),
            },
        );
        let state = reduce(
            failed,
            &Action::Login {
                user: "a".to_string(),
                token: None,
            },
        );
        assert!(state.error.is_none());
    }

    #[test]
    fn test_other_slices_actions_are_ignored() {
        let state = AuthState::default();
        let next = reduce(state.clone(), &Action::CravingsCleared);
        assert_eq!(next, state);
    }
}
