//! Welcome screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use libquitmath::{RootState, ScreenId};

use super::Props;
use crate::app::Intent;

#[derive(Debug, Default)]
pub struct State;

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let [_, body, _] = Layout::vertical([
        Constraint::Percentage(15),
        Constraint::Min(12),
        Constraint::Percentage(15),
    ])
    .areas(area);

    let lines = vec![
        Line::from(Span::styled("Quit-Math", theme.accent().patch(theme.bold()))),
        Line::from(""),
        Line::from("Cravings pass. A few minutes of focus helps them pass sooner."),
        Line::from(""),
        Line::from("  • Log a craving the moment it hits"),
        Line::from("  • Ride it out with a short math, memory, typing or breathing task"),
        Line::from("  • Watch your abstinent streak and eco impact grow"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", theme.bold()),
            Span::raw(" sign in   "),
            Span::styled("r", theme.bold()),
            Span::raw(" create account   "),
            Span::styled("q", theme.bold()),
            Span::raw(" quit"),
        ]),
    ];

    let welcome = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(theme.accent()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(welcome, body);
}

pub fn on_key(_local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Enter => vec![Intent::navigate(ScreenId::Login)],
        KeyCode::Char('r') => vec![Intent::navigate(ScreenId::Register)],
        _ => Vec::new(),
    }
}
