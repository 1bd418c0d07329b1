//! Sign-in form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use secrecy::SecretString;
use tui_textarea::TextArea;

use libquitmath::{RootState, ScreenId};

use super::{field_text, text_field, Props};
use crate::app::{Intent, Request};
use crate::ui::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

#[derive(Debug)]
pub struct State {
    pub email: TextArea<'static>,
    pub password: TextArea<'static>,
    pub focus: Field,
    /// Form problem found before anything was sent
    pub problem: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let mut password = text_field("at least 8 characters");
        password.set_mask_char('•');
        Self {
            email: text_field("you@example.org"),
            password,
            focus: Field::Email,
            problem: None,
        }
    }
}

impl State {
    fn focused(&mut self) -> &mut TextArea<'static> {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Email => Field::Password,
            Field::Password => Field::Email,
        };
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;
    let form = centered_rect(60, 80, area);

    let [email_area, password_area, message_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(form);

    let mut email = local.email.clone();
    email.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Email ")
            .border_style(theme.focus(local.focus == Field::Email)),
    );
    frame.render_widget(&email, email_area);

    let mut password = local.password.clone();
    password.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Password ")
            .border_style(theme.focus(local.focus == Field::Password)),
    );
    frame.render_widget(&password, password_area);

    let message = local
        .problem
        .as_deref()
        .or(props.root.auth.error.as_deref());
    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(Span::styled(message.to_string(), theme.bad())),
            message_area,
        );
    }

    let hints = Line::from(vec![
        Span::styled("Tab", theme.bold()),
        Span::raw(" switch field   "),
        Span::styled("Enter", theme.bold()),
        Span::raw(" sign in   "),
        Span::styled("Ctrl+N", theme.bold()),
        Span::raw(" create account"),
    ]);
    frame.render_widget(Paragraph::new(hints).style(theme.muted()), hints_area);
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
            local.toggle_focus();
            Vec::new()
        }

        (KeyCode::Char('n'), KeyModifiers::CONTROL) => vec![Intent::navigate(ScreenId::Register)],

        (KeyCode::Enter, _) => submit(local),

        _ => {
            local.focused().input(key);
            Vec::new()
        }
    }
}

fn submit(local: &mut State) -> Vec<Intent> {
    let email = field_text(&local.email).trim().to_string();
    let password = field_text(&local.password);

    if email.is_empty() || password.is_empty() {
        local.problem = Some("Enter your email and password.".to_string());
        return Vec::new();
    }
    if local.focus == Field::Email {
        local.focus = Field::Password;
    }

    local.problem = None;
    vec![Intent::Request(Request::Login {
        email,
        password: SecretString::from(password),
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn press(local: &mut State, code: KeyCode) -> Vec<Intent> {
        on_key(local, KeyEvent::new(code, KeyModifiers::NONE), &RootState::default())
    }

    fn type_text(local: &mut State, text: &str) {
        for c in text.chars() {
            press(local, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut local = State::default();
        type_text(&mut local, "a@b.co");
        press(&mut local, KeyCode::Tab);
        type_text(&mut local, "secret123");

        assert_eq!(field_text(&local.email), "a@b.co");
        assert_eq!(field_text(&local.password), "secret123");
    }

    #[test]
    fn test_empty_form_is_not_sent() {
        let mut local = State::default();
        assert!(press(&mut local, KeyCode::Enter).is_empty());
        assert!(local.problem.is_some());
    }

    #[test]
    fn test_submit_requests_login() {
        let mut local = State::default();
        type_text(&mut local, " a@b.co ");
        press(&mut local, KeyCode::Tab);
        type_text(&mut local, "secret123");

        let intents = press(&mut local, KeyCode::Enter);
        match intents.as_slice() {
            [Intent::Request(Request::Login { email, password })] => {
                assert_eq!(email, "a@b.co");
                assert_eq!(password.expose_secret(), "secret123");
            }
            other => panic!("unexpected intents: {:?}", other),
        }
    }
}
