//! Account creation form

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use secrecy::SecretString;
use tui_textarea::TextArea;

use libquitmath::RootState;

use super::{field_text, text_field, Props};
use crate::app::{Intent, Request};
use crate::ui::centered_rect;

const FIELDS: usize = 3;

#[derive(Debug)]
pub struct State {
    pub email: TextArea<'static>,
    pub password: TextArea<'static>,
    pub confirm: TextArea<'static>,
    /// 0 email, 1 password, 2 confirmation
    pub focus: usize,
    pub problem: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let mut password = text_field("at least 8 characters");
        password.set_mask_char('•');
        let mut confirm = text_field("repeat password");
        confirm.set_mask_char('•');
        Self {
            email: text_field("you@example.org"),
            password,
            confirm,
            focus: 0,
            problem: None,
        }
    }
}

impl State {
    fn focused(&mut self) -> &mut TextArea<'static> {
        match self.focus {
            0 => &mut self.email,
            1 => &mut self.password,
            _ => &mut self.confirm,
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;
    let form = centered_rect(60, 90, area);

    let [email_area, password_area, confirm_area, message_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(form);

    let fields = [
        (&local.email, " Email ", email_area),
        (&local.password, " Password ", password_area),
        (&local.confirm, " Confirm password ", confirm_area),
    ];
    for (idx, (field, title, field_area)) in fields.into_iter().enumerate() {
        let mut field = field.clone();
        field.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(theme.focus(local.focus == idx)),
        );
        frame.render_widget(&field, field_area);
    }

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
        Span::raw(" next field   "),
        Span::styled("Enter", theme.bold()),
        Span::raw(" create account   "),
        Span::styled("Esc", theme.bold()),
        Span::raw(" back"),
    ]);
    frame.render_widget(Paragraph::new(hints).style(theme.muted()), hints_area);
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            local.focus = (local.focus + 1) % FIELDS;
            Vec::new()
        }
        KeyCode::BackTab | KeyCode::Up => {
            local.focus = (local.focus + FIELDS - 1) % FIELDS;
            Vec::new()
        }
        KeyCode::Enter => submit(local),
        _ => {
            local.focused().input(key);
            Vec::new()
        }
    }
}

fn submit(local: &mut State) -> Vec<Intent> {
    let email = field_text(&local.email).trim().to_string();
    let password = field_text(&local.password);
    let confirm = field_text(&local.confirm);

    if email.is_empty() || password.is_empty() {
        local.problem = Some("Enter an email and a password.".to_string());
        return Vec::new();
    }
    if password != confirm {
        local.problem = Some("Passwords do not match.".to_string());
        local.confirm = {
            let mut confirm = text_field("repeat password");
            confirm.set_mask_char('•');
            confirm
        };
        local.focus = 2;
        return Vec::new();
    }

    local.problem = None;
    vec![Intent::Request(Request::Register {
        email,
        password: SecretString::from(password),
    })]
}
