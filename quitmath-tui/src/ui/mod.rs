//! Frame layout shared by every screen
//!
//! Header (when the route shows one), the visible screen's body, the status
//! bar, and the help and error overlays. The body is drawn by the render
//! entry point the route table holds for the top navigation entry.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use libquitmath::RouteTable;

use crate::app::AppState;
use crate::screens::{RenderFn, View};

/// Colour helper honouring `NO_COLOR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: bool,
}

impl Theme {
    pub fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    pub fn accent(&self) -> Style {
        self.fg(Color::Cyan)
    }

    pub fn good(&self) -> Style {
        self.fg(Color::Green)
    }

    pub fn bad(&self) -> Style {
        self.fg(Color::Red)
    }

    pub fn muted(&self) -> Style {
        self.fg(Color::Gray)
    }

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Border of a focused or unfocused input
    pub fn focus(&self, focused: bool) -> Style {
        match (focused, self.colors) {
            (true, true) => Style::default().fg(Color::Yellow),
            (true, false) => Style::default().add_modifier(Modifier::BOLD),
            (false, _) => Style::default(),
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState, routes: &RouteTable<RenderFn>) {
    let area = frame.area();
    let theme = Theme {
        colors: state.config.colors_enabled,
    };

    let entry = state.navigator.current();
    let route = routes.get(entry.screen);

    let [header, body, status] = if route.options.header_shown {
        Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(area)
    } else {
        let [body, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        [Rect::default(), body, status]
    };

    if route.options.header_shown {
        render_header(frame, header, state, route.options.title, theme);
    }

    let view = View {
        root: state.store.get_state(),
        locals: &state.screens,
        entry,
        theme,
    };
    (route.render)(frame, body, &view);

    render_status_bar(frame, status, state, theme);

    if state.help_visible {
        render_help_overlay(frame, area, theme);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, title: &str, theme: Theme) {
    let mut spans = vec![
        Span::styled(" Quit-Math ", theme.accent().add_modifier(Modifier::BOLD)),
        Span::raw("› "),
        Span::styled(title.to_string(), theme.bold()),
    ];

    if let Some(user) = &state.root().auth.user {
        spans.push(Span::styled(format!("  ({})", user), theme.muted()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let hints = if state.navigator.can_go_back() {
        "F1 help · Esc back · Ctrl+C quit"
    } else {
        "F1 help · Ctrl+C quit"
    };

    let line = match &state.status {
        Some(message) => Line::from(vec![
            Span::styled(message.clone(), theme.good()),
            Span::raw("  "),
            Span::styled(hints, theme.muted()),
        ]),
        None => Line::from(Span::styled(hints, theme.muted())),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, theme: Theme) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.bold())),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Esc      - Back / dismiss overlay"),
        Line::from("  q        - Quit (outside text fields)"),
        Line::from("  Ctrl+C   - Quit"),
        Line::from(""),
        Line::from("Forms:"),
        Line::from("  Tab      - Next field"),
        Line::from("  ←/→      - Adjust value"),
        Line::from("  Enter    - Submit"),
        Line::from(""),
        Line::from("History:"),
        Line::from("  d / s    - Close today (abstinent / smoked)"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(theme.accent()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, theme: Theme) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled("Error", theme.bad().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(theme.bad()),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Rectangle of the given percentage size centred in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
