//! Render every screen into an in-memory terminal

use libquitmath::{Action as StoreAction, CravingEntry, NavParams, ScreenId, TaskKind};
use quitmath_tui::app::{reduce, Action, AppState, UiConfig};
use quitmath_tui::screens::{route_table, RenderFn};
use quitmath_tui::ui;
use ratatui::{backend::TestBackend, Terminal};

use libquitmath::RouteTable;

fn draw(state: &AppState, routes: &RouteTable<RenderFn>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal.draw(|frame| ui::render(frame, state, routes)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn signed_in(routes: &RouteTable<RenderFn>) -> AppState {
    let state = AppState::new(routes, UiConfig::default());
    reduce(
        state,
        Action::Dispatch(StoreAction::Login {
            user: "sam@example.org".to_string(),
            token: None,
        }),
    )
}

#[test]
fn test_onboarding_renders_without_header() {
    let routes = route_table().unwrap();
    let state = AppState::new(&routes, UiConfig::default());

    let screen = draw(&state, &routes);
    assert!(screen.contains("Quit-Math"));
    assert!(screen.contains("create account"));
    assert!(!screen.contains("›"));
}

#[test]
fn test_every_screen_renders() {
    let routes = route_table().unwrap();

    for id in ScreenId::ALL {
        let state = reduce(signed_in(&routes), Action::Navigate(id, NavParams::None));
        let screen = draw(&state, &routes);
        assert!(!screen.trim().is_empty(), "{} rendered nothing", id);
    }
}

#[test]
fn test_home_shows_streak_and_header() {
    let routes = route_table().unwrap();
    let state = signed_in(&routes);

    let screen = draw(&state, &routes);
    assert!(screen.contains("Abstinent streak"));
    assert!(screen.contains("sam@example.org"));
    assert!(screen.contains("Log a craving"));
}

#[test]
fn test_history_lists_cravings() {
    let routes = route_table().unwrap();
    let state = signed_in(&routes);
    let state = reduce(
        state,
        Action::Dispatch(StoreAction::CravingLogged {
            entry: CravingEntry::new(7, Some(2), Some("after coffee".to_string())).unwrap(),
        }),
    );
    let state = reduce(state, Action::Navigate(ScreenId::History, NavParams::None));

    let screen = draw(&state, &routes);
    assert!(screen.contains("after coffee"));
}

#[test]
fn test_task_player_with_preselected_kind() {
    let routes = route_table().unwrap();
    let state = reduce(
        signed_in(&routes),
        Action::Navigate(ScreenId::TaskPlayer, NavParams::Task { kind: TaskKind::Breath }),
    );
    assert_eq!(state.screens.task_player.kind, TaskKind::Breath);

    let screen = draw(&state, &routes);
    assert!(screen.contains("Box breathing"));
}

#[test]
fn test_error_overlay_is_drawn() {
    let routes = route_table().unwrap();
    let state = reduce(
        AppState::new(&routes, UiConfig::default()),
        Action::ShowError("Incorrect email or password.".to_string()),
    );

    let screen = draw(&state, &routes);
    assert!(screen.contains("Incorrect email or password."));
    assert!(screen.contains("Press Esc to dismiss"));
}
