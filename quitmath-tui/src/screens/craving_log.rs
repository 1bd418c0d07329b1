//! Craving entry: intensity, attention and an optional note

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use libquitmath::types::SCALE_MAX;
use libquitmath::RootState;

use super::{field_text, text_field, Props};
use crate::app::{Intent, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Score,
    Attention,
    Note,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Score => Focus::Attention,
            Focus::Attention => Focus::Note,
            Focus::Note => Focus::Score,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Score => Focus::Note,
            Focus::Attention => Focus::Score,
            Focus::Note => Focus::Attention,
        }
    }
}

#[derive(Debug)]
pub struct State {
    pub score: u8,
    pub attention: u8,
    pub focus: Focus,
    pub note: TextArea<'static>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            score: 5,
            attention: 5,
            focus: Focus::Score,
            note: text_field("what triggered it? (optional)"),
        }
    }
}

impl State {
    pub fn editing_note(&self) -> bool {
        self.focus == Focus::Note
    }

    fn adjust(&mut self, delta: i8) {
        let value = match self.focus {
            Focus::Score => &mut self.score,
            Focus::Attention => &mut self.attention,
            Focus::Note => return,
        };
        *value = value.saturating_add_signed(delta).min(SCALE_MAX);
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;

    let [score_area, attention_area, note_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    let gauge = |title: &'static str, value: u8, focused: bool| {
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(theme.focus(focused)),
            )
            .gauge_style(theme.accent())
            .ratio(f64::from(value) / f64::from(SCALE_MAX))
            .label(format!("{}/{}", value, SCALE_MAX))
    };

    frame.render_widget(
        gauge(" Craving intensity ", local.score, local.focus == Focus::Score),
        score_area,
    );
    frame.render_widget(
        gauge(" Attention ", local.attention, local.focus == Focus::Attention),
        attention_area,
    );

    let mut note = local.note.clone();
    note.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Note ")
            .border_style(theme.focus(local.focus == Focus::Note)),
    );
    frame.render_widget(&note, note_area);

    let hints = Line::from(vec![
        Span::styled("Tab", theme.bold()),
        Span::raw(" next   "),
        Span::styled("←/→", theme.bold()),
        Span::raw(" adjust   "),
        Span::styled("Enter", theme.bold()),
        Span::raw(" save"),
    ]);
    frame.render_widget(Paragraph::new(hints).style(theme.muted()), hints_area);
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            local.focus = local.focus.next();
            Vec::new()
        }
        KeyCode::BackTab | KeyCode::Up => {
            local.focus = local.focus.previous();
            Vec::new()
        }
        KeyCode::Enter => {
            let note = field_text(&local.note);
            vec![
                Intent::Request(Request::LogCraving {
                    score: local.score,
                    attention: Some(local.attention),
                    note: if note.trim().is_empty() { None } else { Some(note) },
                }),
                Intent::Back,
            ]
        }
        _ if local.editing_note() => {
            local.note.input(key);
            Vec::new()
        }
        KeyCode::Left | KeyCode::Char('-') => {
            local.adjust(-1);
            Vec::new()
        }
        KeyCode::Right | KeyCode::Char('+') => {
            local.adjust(1);
            Vec::new()
        }
        KeyCode::Char(c @ '0'..='9') => {
            let value = c as u8 - b'0';
            match local.focus {
                Focus::Score => local.score = value,
                Focus::Attention => local.attention = value,
                Focus::Note => {}
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
