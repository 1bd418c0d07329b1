//! Application actions, screen intents and collaborator requests
//!
//! - `Action`: everything the application reducer reacts to
//! - `Intent`: what a screen's key handler may ask for
//! - `Request`: work for a collaborator, executed outside the reducer

use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use secrecy::SecretString;

use libquitmath::service::TaskPrompt;
use libquitmath::{NavParams, ScreenId, TaskKind};

/// Actions that trigger application state transitions
#[derive(Debug)]
pub enum Action {
    // === UI Events ===
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    Resize(u16, u16),

    // === Application ===
    Quit,

    ShowHelp,

    HideHelp,

    ShowError(String),

    DismissError,

    SetStatus(String),

    ClearStatus,

    // === Navigation ===
    Navigate(ScreenId, NavParams),

    Back,

    // === Store ===
    /// Apply a store action
    Dispatch(libquitmath::Action),

    // === Collaborator results for screen-local state ===
    /// A task prompt is ready for the task player
    TaskPromptReady(TaskPrompt),
}

/// What a screen asks the application root to do
#[derive(Debug)]
pub enum Intent {
    Navigate(ScreenId, NavParams),
    Back,
    Dispatch(libquitmath::Action),
    Request(Request),
    Quit,
}

impl Intent {
    pub fn navigate(screen: ScreenId) -> Self {
        Intent::Navigate(screen, NavParams::None)
    }
}

/// Work for a collaborator
#[derive(Debug)]
pub enum Request {
    Login {
        email: String,
        password: SecretString,
    },
    Register {
        email: String,
        password: SecretString,
    },
    Logout,
    LogCraving {
        score: u8,
        attention: Option<u8>,
        note: Option<String>,
    },
    NewTask {
        kind: TaskKind,
        difficulty: u8,
    },
    CompleteTask {
        prompt: TaskPrompt,
        answer: String,
        started_at: DateTime<Utc>,
    },
    /// Close today; `smoked` marks a day with smoking
    CloseDay {
        smoked: bool,
    },
    LogDisposables {
        units: f64,
    },
    SetBaseline {
        units_per_day: f64,
    },
    /// Ask the scheduler for task times based on recent cravings
    SuggestTasks,
}

impl Request {
    /// Short name for logs; never includes credentials
    pub fn name(&self) -> &'static str {
        match self {
            Request::Login { .. } => "login",
            Request::Register { .. } => "register",
            Request::Logout => "logout",
            Request::LogCraving { .. } => "log_craving",
            Request::NewTask { .. } => "new_task",
            Request::CompleteTask { .. } => "complete_task",
            Request::CloseDay { .. } => "close_day",
            Request::LogDisposables { .. } => "log_disposables",
            Request::SetBaseline { .. } => "set_baseline",
            Request::SuggestTasks => "suggest_tasks",
        }
    }
}
