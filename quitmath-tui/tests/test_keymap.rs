//! Test keybinding mappings to actions
//!
//! Verifies that keyboard input reaches the reducer's global bindings
//! before the visible screen sees it.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libquitmath::{NavParams, ScreenId};
use quitmath_tui::app::{reduce, Action, AppState, UiConfig};
use quitmath_tui::screens::route_table;

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn press(state: AppState, code: KeyCode) -> AppState {
    reduce(state, Action::Key(key_event(code, KeyModifiers::NONE)))
}

fn boot() -> AppState {
    AppState::new(&route_table().unwrap(), UiConfig::default())
}

#[test]
fn test_q_quits_application() {
    let state = press(boot(), KeyCode::Char('q'));
    assert!(state.should_quit);
}

#[test]
fn test_ctrl_c_quits_from_text_field() {
    let state = reduce(boot(), Action::Navigate(ScreenId::Login, NavParams::None));
    let state = reduce(
        state,
        Action::Key(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    );
    assert!(state.should_quit);
}

#[test]
fn test_q_is_typed_into_login_form() {
    let state = reduce(boot(), Action::Navigate(ScreenId::Login, NavParams::None));
    let state = press(state, KeyCode::Char('q'));

    assert!(!state.should_quit);
    assert_eq!(state.screens.login.email.lines().join(""), "q");
}

#[test]
fn test_f1_toggles_help() {
    let state = press(boot(), KeyCode::F(1));
    assert!(state.help_visible);

    let state = press(state, KeyCode::F(1));
    assert!(!state.help_visible);
}

#[test]
fn test_help_overlay_swallows_keys() {
    let state = press(boot(), KeyCode::F(1));
    let state = press(state, KeyCode::Char('q'));
    assert!(!state.should_quit);

    let state = press(state, KeyCode::Enter);
    assert_eq!(state.current().screen, ScreenId::Onboarding);
}

#[test]
fn test_esc_dismisses_error_before_going_back() {
    let state = press(boot(), KeyCode::Enter);
    assert_eq!(state.current().screen, ScreenId::Login);

    let state = reduce(state, Action::ShowError("nope".to_string()));
    let state = press(state, KeyCode::Esc);
    assert!(state.error.is_none());
    assert_eq!(state.current().screen, ScreenId::Login);

    let state = press(state, KeyCode::Esc);
    assert_eq!(state.current().screen, ScreenId::Onboarding);
}

#[test]
fn test_esc_at_root_stays() {
    let state = press(boot(), KeyCode::Esc);
    assert_eq!(state.current().screen, ScreenId::Onboarding);
    assert!(!state.should_quit);
}

#[test]
fn test_key_release_is_ignored() {
    let mut key = key_event(KeyCode::Char('q'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;

    let state = reduce(boot(), Action::Key(key));
    assert!(!state.should_quit);
}
