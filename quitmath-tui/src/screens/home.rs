//! Dashboard: streak, latest craving and the main menu

use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use libquitmath::{RootState, ScreenId};

use super::Props;
use crate::app::{Intent, Request};

/// Menu entries and the screens they open
pub const MENU: [(&str, ScreenId); 5] = [
    ("Log a craving", ScreenId::CravingLog),
    ("Start a task", ScreenId::TaskPlayer),
    ("History", ScreenId::History),
    ("Eco impact", ScreenId::EcoImpact),
    ("Settings", ScreenId::Settings),
];

#[derive(Debug, Default)]
pub struct State {
    pub selected: usize,
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let root = props.root;

    let [summary_area, menu_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Abstinent streak: "),
            Span::styled(
                format!("{} day(s)", root.sessions.current_streak()),
                theme.good().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   best {}", root.sessions.longest_streak()),
                theme.muted(),
            ),
        ]),
        Line::from(format!("Eco karma: {:.2}", root.eco.total_karma())),
    ];

    match root.cravings.latest() {
        Some(entry) => lines.push(Line::from(format!(
            "Last craving: {}/10 at {}",
            entry.score,
            entry.timestamp.format("%H:%M")
        ))),
        None => lines.push(Line::from(Span::styled("No cravings logged yet", theme.muted()))),
    }

    if let Some(rate) = root.tasks.success_rate() {
        lines.push(Line::from(format!(
            "Tasks: {} done, {:.0}% solved",
            root.tasks.logs.len(),
            rate * 100.0
        )));
    }

    lines.push(Line::from(""));
    if root.tasks.suggested_offsets.is_empty() {
        lines.push(Line::from(Span::styled(
            "Press s to plan tasks for the next hours",
            theme.muted(),
        )));
    } else {
        let now = Utc::now();
        let times: Vec<String> = root
            .tasks
            .suggested_offsets
            .iter()
            .map(|m| (now + Duration::minutes(i64::from(*m))).format("%H:%M").to_string())
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Suggested tasks: ", theme.bold()),
            Span::raw(times.join(", ")),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Today ")),
        summary_area,
    );

    let items: Vec<ListItem> = MENU
        .iter()
        .enumerate()
        .map(|(idx, (label, _))| ListItem::new(format!("{}  {}", idx + 1, label)))
        .collect();

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Menu "))
        .highlight_style(theme.accent().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    list_state.select(Some(props.local.selected));
    frame.render_stateful_widget(menu, menu_area, &mut list_state);
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            local.selected = (local.selected + MENU.len() - 1) % MENU.len();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            local.selected = (local.selected + 1) % MENU.len();
            Vec::new()
        }
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            local.selected = idx;
            vec![Intent::navigate(MENU[idx].1)]
        }
        KeyCode::Enter => vec![Intent::navigate(MENU[local.selected].1)],
        KeyCode::Char('s') => vec![Intent::Request(Request::SuggestTasks)],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(local: &mut State, code: KeyCode) -> Vec<Intent> {
        on_key(local, KeyEvent::new(code, KeyModifiers::NONE), &RootState::default())
    }

    #[test]
    fn test_selection_wraps() {
        let mut local = State::default();
        press(&mut local, KeyCode::Up);
        assert_eq!(local.selected, MENU.len() - 1);
        press(&mut local, KeyCode::Down);
        assert_eq!(local.selected, 0);
    }

    #[test]
    fn test_enter_opens_selected_screen() {
        let mut local = State { selected: 2 };
        let intents = press(&mut local, KeyCode::Enter);
        assert!(matches!(intents.as_slice(), [Intent::Navigate(ScreenId::History, _)]));
    }

    #[test]
    fn test_digit_shortcut() {
        let mut local = State::default();
        let intents = press(&mut local, KeyCode::Char('4'));
        assert!(matches!(intents.as_slice(), [Intent::Navigate(ScreenId::EcoImpact, _)]));
        assert_eq!(local.selected, 3);
    }

    #[test]
    fn test_s_requests_schedule() {
        let intents = press(&mut State::default(), KeyCode::Char('s'));
        assert!(matches!(intents.as_slice(), [Intent::Request(Request::SuggestTasks)]));
    }
}
