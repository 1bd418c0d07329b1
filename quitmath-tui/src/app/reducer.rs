//! Application reducer: `(AppState, Action) -> AppState`
//!
//! Keys are turned into screen intents here and the intents are applied to
//! the navigator and the store. Collaborator requests are only queued in
//! `outbox`; the event loop executes them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use libquitmath::{NavParams, ScreenId};

use super::actions::{Action, Intent};
use super::state::AppState;
use crate::screens;

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,
        Action::Resize(_, _) => state,

        // === Application ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState { error: None, ..state },

        Action::SetStatus(message) => AppState {
            status: Some(message),
            ..state
        },

        Action::ClearStatus => AppState { status: None, ..state },

        // === Navigation ===
        Action::Navigate(screen, params) => navigate(state, screen, params),

        Action::Back => {
            let mut state = state;
            state.navigator.go_back();
            state
        }

        // === Store ===
        Action::Dispatch(store_action) => dispatch(state, store_action),

        Action::TaskPromptReady(prompt) => {
            let mut state = state;
            state.screens.task_player.start(prompt);
            state
        }
    }
}

/// Apply screen intents in order
pub fn apply_intents(state: AppState, intents: Vec<Intent>) -> AppState {
    intents.into_iter().fold(state, |state, intent| match intent {
        Intent::Navigate(screen, params) => navigate(state, screen, params),
        Intent::Back => reduce(state, Action::Back),
        Intent::Dispatch(store_action) => dispatch(state, store_action),
        Intent::Request(request) => {
            let mut state = state;
            tracing::debug!(request = request.name(), "queued request");
            state.outbox.push(request);
            state
        }
        Intent::Quit => reduce(state, Action::Quit),
    })
}

fn navigate(state: AppState, screen: ScreenId, params: NavParams) -> AppState {
    let mut state = state;
    state.navigator.navigate_with(screen, params);
    let entry = state.navigator.current().clone();
    state.screens.enter(&entry, state.store.get_state());
    state
}

/// Dispatch to the store; signing in or out replaces the navigation stack
fn dispatch(state: AppState, store_action: libquitmath::Action) -> AppState {
    let mut state = state;
    let was_logged_in = state.store.get_state().auth.is_logged_in();

    state.store.dispatch(store_action);

    let auth = &state.store.get_state().auth;
    match (was_logged_in, auth.is_logged_in()) {
        (false, true) => {
            let user = auth.user.clone().unwrap_or_default();
            state.navigator.reset(ScreenId::Home);
            state.screens.clear_credentials();
            state.status = Some(format!("Signed in as {}", user));
        }
        (true, false) => {
            state.navigator.reset(ScreenId::Onboarding);
            state.status = Some("Signed out".to_string());
        }
        _ => {}
    }

    let entry = state.navigator.current().clone();
    if was_logged_in != state.store.get_state().auth.is_logged_in() {
        state.screens.enter(&entry, state.store.get_state());
    }
    state
}

/// Global keys first, then the visible screen's handler
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    if key.kind != KeyEventKind::Press {
        return state;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return reduce(state, Action::Quit),

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => return reduce(state, Action::DismissError),
        (KeyCode::Esc, _) if state.help_visible => return reduce(state, Action::HideHelp),
        (KeyCode::Esc, _) => return reduce(state, Action::Back),

        _ => {}
    }

    // Overlays swallow everything else
    if state.overlay_visible() {
        return state;
    }

    let screen = state.navigator.current().screen;

    if key.code == KeyCode::Char('q')
        && key.modifiers == KeyModifiers::NONE
        && !state.screens.captures_text(screen)
    {
        return reduce(state, Action::Quit);
    }

    let mut state = state;
    let intents = screens::handle_key(&mut state.screens, screen, key, state.store.get_state());
    apply_intents(state, intents)
}
