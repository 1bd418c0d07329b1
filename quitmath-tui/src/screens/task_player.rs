//! Distraction task player
//!
//! Two phases: choosing a kind and difficulty, then answering the prompt the
//! task provider generated. Answers are scored locally for immediate
//! feedback; the log entry itself is produced by the collaborator.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use libquitmath::service::tasks::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use libquitmath::service::{TaskPrompt, TaskProvider};
use libquitmath::{NavParams, RootState, TaskKind};

use super::{field_text, text_field, Props};
use crate::app::{Intent, Request};

#[derive(Debug)]
pub struct State {
    pub kind: TaskKind,
    pub difficulty: u8,
    pub prompt: Option<TaskPrompt>,
    pub answer: TextArea<'static>,
    pub started_at: Option<DateTime<Utc>>,
    /// Outcome of the last answered prompt
    pub last_result: Option<bool>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            kind: TaskKind::Math,
            difficulty: 3,
            prompt: None,
            answer: text_field("your answer"),
            started_at: None,
            last_result: None,
        }
    }
}

impl State {
    /// Reset for a fresh visit, honouring a preselected task kind
    pub fn enter(&mut self, params: &NavParams) {
        *self = Self::default();
        if let NavParams::Task { kind } = params {
            self.kind = *kind;
        }
    }

    /// Show a generated prompt and start the clock
    pub fn start(&mut self, prompt: TaskPrompt) {
        self.kind = prompt.kind;
        self.difficulty = prompt.difficulty;
        self.prompt = Some(prompt);
        self.answer = text_field("your answer");
        self.started_at = Some(Utc::now());
        self.last_result = None;
    }

    pub fn answering(&self) -> bool {
        self.prompt.is_some()
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;

    let [tabs_area, body_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(area);

    let selected = TaskKind::ALL.iter().position(|k| *k == local.kind).unwrap_or(0);
    let tabs = Tabs::new(TaskKind::ALL.iter().map(|k| k.label()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Difficulty {}/{} ", local.difficulty, MAX_DIFFICULTY)),
        )
        .select(selected)
        .highlight_style(theme.accent().add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let hints = match &local.prompt {
        Some(prompt) => {
            let [question_area, answer_area] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(body_area);

            let question = Paragraph::new(vec![
                Line::from(Span::styled(prompt.instructions.clone(), theme.muted())),
                Line::from(""),
                Line::from(Span::styled(prompt.question.clone(), theme.bold())),
            ])
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", prompt.kind.label())))
            .wrap(Wrap { trim: false });
            frame.render_widget(question, question_area);

            let mut answer = local.answer.clone();
            answer.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Answer ")
                    .border_style(theme.focus(true)),
            );
            frame.render_widget(&answer, answer_area);

            "Enter submit · Esc leave"
        }
        None => {
            let mut lines = Vec::new();
            match local.last_result {
                Some(true) => lines.push(Line::from(Span::styled("Correct! Nice focus.", theme.good()))),
                Some(false) => lines.push(Line::from(Span::styled(
                    "Not quite. The craving still passed a little.",
                    theme.bad(),
                ))),
                None => {}
            }
            lines.push(Line::from(""));
            lines.push(Line::from("Pick a task and press Enter to begin."));

            frame.render_widget(
                Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
                body_area,
            );

            "←/→ task · +/- difficulty · Enter start"
        }
    };

    frame.render_widget(Paragraph::new(hints).style(theme.muted()), hints_area);
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    if local.answering() {
        return answer_key(local, key);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => local.kind = local.kind.previous(),
        KeyCode::Right | KeyCode::Char('l') => local.kind = local.kind.next(),
        KeyCode::Up | KeyCode::Char('+') => {
            local.difficulty = (local.difficulty + 1).min(MAX_DIFFICULTY);
        }
        KeyCode::Down | KeyCode::Char('-') => {
            local.difficulty = local.difficulty.saturating_sub(1).max(MIN_DIFFICULTY);
        }
        KeyCode::Enter => {
            return vec![Intent::Request(Request::NewTask {
                kind: local.kind,
                difficulty: local.difficulty,
            })];
        }
        _ => {}
    }
    Vec::new()
}

fn answer_key(local: &mut State, key: KeyEvent) -> Vec<Intent> {
    if key.code != KeyCode::Enter {
        local.answer.input(key);
        return Vec::new();
    }

    let Some(prompt) = local.prompt.take() else {
        return Vec::new();
    };
    let answer = field_text(&local.answer);
    let started_at = local.started_at.take().unwrap_or_else(Utc::now);

    local.last_result = Some(TaskProvider::check(&prompt, &answer));
    local.answer = text_field("your answer");

    vec![Intent::Request(Request::CompleteTask {
        prompt,
        answer,
        started_at,
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(local: &mut State, code: KeyCode) -> Vec<Intent> {
        on_key(local, KeyEvent::new(code, KeyModifiers::NONE), &RootState::default())
    }

    fn math_prompt() -> TaskPrompt {
        TaskPrompt {
            kind: TaskKind::Math,
            difficulty: 2,
            instructions: "Solve it.".to_string(),
            question: "3 + 4 = ?".to_string(),
            answer: "7".to_string(),
        }
    }

    #[test]
    fn test_enter_with_preselected_kind() {
        let mut local = State::default();
        local.difficulty = 9;
        local.enter(&NavParams::Task { kind: TaskKind::Breath });
        assert_eq!(local.kind, TaskKind::Breath);
        assert_eq!(local.difficulty, 3);
    }

    #[test]
    fn test_difficulty_is_bounded() {
        let mut local = State::default();
        for _ in 0..20 {
            press(&mut local, KeyCode::Up);
        }
        assert_eq!(local.difficulty, MAX_DIFFICULTY);
        for _ in 0..20 {
            press(&mut local, KeyCode::Down);
        }
        assert_eq!(local.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_enter_requests_new_task() {
        let mut local = State::default();
        press(&mut local, KeyCode::Right);
        let intents = press(&mut local, KeyCode::Enter);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Request(Request::NewTask { kind: TaskKind::NBack, difficulty: 3 })]
        ));
    }

    #[test]
    fn test_correct_answer_is_scored_and_sent() {
        let mut local = State::default();
        local.start(math_prompt());
        assert!(local.answering());

        press(&mut local, KeyCode::Char('7'));
        let intents = press(&mut local, KeyCode::Enter);

        assert_eq!(local.last_result, Some(true));
        assert!(!local.answering());
        assert!(matches!(
            intents.as_slice(),
            [Intent::Request(Request::CompleteTask { answer, .. })] if answer == "7"
        ));
    }

    #[test]
    fn test_wrong_answer_is_a_failure() {
        let mut local = State::default();
        local.start(math_prompt());
        press(&mut local, KeyCode::Char('8'));
        press(&mut local, KeyCode::Enter);
        assert_eq!(local.last_result, Some(false));
    }
}
