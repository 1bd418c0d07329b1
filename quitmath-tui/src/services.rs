//! Collaborator requests
//!
//! Screens raise `Request`s; the event loop hands them to a `ServiceHandle`
//! after the reducer has run. Results that belong in the store are sent as
//! store actions through the action channel. Results that only concern the
//! UI (an error overlay, a status line, a generated task prompt) are
//! returned as application actions.

use chrono::Local;
use secrecy::SecretString;

use libquitmath::service::{ActionReceiver, ActionSender, TaskProvider};
use libquitmath::{Action as StoreAction, CravingEntry, QuitMathService, RootState};

use crate::app::{reduce, Action, AppState, Request};

/// How many recent cravings seed the scheduler
const RECENT_CRAVINGS: usize = 5;

/// Initial levels when nothing has been logged yet
const DEFAULT_CRAVING: f64 = 0.5;
const DEFAULT_ATTENTION: f64 = 0.5;

pub struct ServiceHandle {
    service: QuitMathService,
    sender: ActionSender,
}

impl ServiceHandle {
    pub fn new(service: QuitMathService, sender: ActionSender) -> Self {
        Self { service, sender }
    }

    pub fn service(&self) -> &QuitMathService {
        &self.service
    }

    /// Execute one request against the current root state
    pub fn execute(&mut self, request: Request, root: &RootState) -> Vec<Action> {
        let name = request.name();
        tracing::debug!(request = name, "executing request");

        match request {
            Request::Login { email, password } => self.login(&email, &password),

            Request::Register { email, password } => {
                match self.service.accounts_mut().register(&email, &password) {
                    Ok(account) => self.login(&account.email, &password),
                    Err(e) => self.auth_failed(e.to_string()),
                }
            }

            Request::Logout => {
                if let Some(token) = root.auth.token.as_deref() {
                    self.service.accounts_mut().revoke(token);
                }
                self.sender.send(StoreAction::Logout);
                Vec::new()
            }

            Request::LogCraving {
                score,
                attention,
                note,
            } => match CravingEntry::new(score, attention, note) {
                Ok(entry) => {
                    tracing::info!(score = entry.score, "craving logged");
                    self.sender.send(StoreAction::CravingLogged { entry });
                    vec![Action::SetStatus("Craving logged".to_string())]
                }
                Err(e) => rejected(name, e.to_string()),
            },

            Request::NewTask { kind, difficulty } => {
                match self.service.tasks_mut().generate(kind, difficulty) {
                    Ok(prompt) => vec![Action::TaskPromptReady(prompt)],
                    Err(e) => rejected(name, e.to_string()),
                }
            }

            Request::CompleteTask {
                prompt,
                answer,
                started_at,
            } => {
                let log = TaskProvider::complete(&prompt, &answer, started_at);
                tracing::info!(kind = %log.kind, success = log.success, "task completed");
                let status = if log.success {
                    format!("Task solved (+{:.3} reward)", log.reward_delta)
                } else {
                    "Task logged".to_string()
                };
                self.sender.send(StoreAction::TaskLogged { log });
                vec![Action::SetStatus(status)]
            }

            Request::CloseDay { smoked } => {
                // Days follow the user's wall clock
                let today = Local::now().date_naive();
                let session = self.service.sessions().close_day(
                    today,
                    root.cravings.on(today, Local),
                    root.tasks.on(today, Local),
                    root.sessions.before(today),
                    smoked,
                );
                tracing::info!(
                    date = %session.date,
                    state = %session.state,
                    streak = session.abstinent_streak,
                    "day closed"
                );
                let status = format!(
                    "Day closed: {} · streak {}",
                    session.state.label(),
                    session.abstinent_streak
                );
                self.sender.send(StoreAction::SessionRecorded { session });
                vec![Action::SetStatus(status)]
            }

            Request::LogDisposables { units } => {
                match self.service.eco().records_for_disposables(units) {
                    Ok(records) => {
                        let karma: f64 = records.iter().map(|r| r.karma).sum();
                        self.sender.send(StoreAction::EcoRecorded { records });
                        vec![Action::SetStatus(format!("+{:.3} karma", karma))]
                    }
                    Err(e) => rejected(name, e.to_string()),
                }
            }

            Request::SetBaseline { units_per_day } => {
                if !units_per_day.is_finite() || units_per_day < 0.0 {
                    return rejected(name, "baseline must be a non-negative number".to_string());
                }
                self.sender.send(StoreAction::EcoBaselineSet { units_per_day });
                vec![Action::SetStatus(format!("Baseline set to {:.1}/day", units_per_day))]
            }

            Request::SuggestTasks => {
                let (c0, a0) = initial_levels(root);
                match self.service.scheduler().suggest_task_schedule(c0, a0, 0.0) {
                    Ok(minute_offsets) => {
                        let status = if minute_offsets.is_empty() {
                            "No craving peak expected in the next hour".to_string()
                        } else {
                            format!("{} task(s) suggested", minute_offsets.len())
                        };
                        self.sender.send(StoreAction::TasksSuggested { minute_offsets });
                        vec![Action::SetStatus(status)]
                    }
                    Err(e) => rejected(name, e.to_string()),
                }
            }
        }
    }

    fn login(&mut self, email: &str, password: &SecretString) -> Vec<Action> {
        match self.service.accounts_mut().login(email, password) {
            Ok(token) => {
                self.sender.send(StoreAction::Login {
                    user: token.email,
                    token: Some(token.access_token),
                });
                Vec::new()
            }
            Err(e) => self.auth_failed(e.to_string()),
        }
    }

    fn auth_failed(&self, error: String) -> Vec<Action> {
        tracing::warn!(error = %error, "authentication rejected");
        self.sender.send(StoreAction::LoginFailed {
            error: error.clone(),
        });
        vec![Action::ShowError(error)]
    }
}

/// Run every queued request and apply what came back
///
/// Store actions sent by a collaborator are dispatched before the
/// application actions it returned, so an error overlay or status line
/// lands on top of the state it describes.
pub fn settle(state: AppState, services: &mut ServiceHandle, rx: &ActionReceiver) -> AppState {
    let mut state = drain(state, rx);
    loop {
        let requests = state.take_requests();
        if requests.is_empty() {
            return state;
        }
        for request in requests {
            let results = services.execute(request, state.root());
            state = drain(state, rx);
            state = results.into_iter().fold(state, reduce);
        }
    }
}

fn drain(state: AppState, rx: &ActionReceiver) -> AppState {
    rx.try_iter()
        .fold(state, |state, action| reduce(state, Action::Dispatch(action)))
}

fn rejected(request: &str, error: String) -> Vec<Action> {
    tracing::warn!(request, error = %error, "request rejected");
    vec![Action::ShowError(error)]
}

/// Scheduler start values on [0, 1] from the most recent cravings
fn initial_levels(root: &RootState) -> (f64, f64) {
    let scale = f64::from(libquitmath::types::SCALE_MAX);
    let c0 = root
        .cravings
        .recent_average(RECENT_CRAVINGS)
        .map(|avg| avg / scale)
        .unwrap_or(DEFAULT_CRAVING);

    let attention: Vec<f64> = root
        .cravings
        .entries
        .iter()
        .take(RECENT_CRAVINGS)
        .filter_map(|e| e.attention)
        .map(|a| f64::from(a) / scale)
        .collect();
    let a0 = if attention.is_empty() {
        DEFAULT_ATTENTION
    } else {
        attention.iter().sum::<f64>() / attention.len() as f64
    };

    (c0.clamp(0.0, 1.0), a0.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libquitmath::service::events::{channel, dispatch_pending};
    use libquitmath::service::{ActionReceiver, TaskPrompt};
    use libquitmath::{Store, TaskKind};
    use chrono::Utc;

    fn handle() -> (ServiceHandle, ActionReceiver) {
        let (tx, rx) = channel();
        let service = QuitMathService::default().with_task_provider(TaskProvider::seeded(11));
        (ServiceHandle::new(service, tx), rx)
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_register_signs_in() {
        let (mut services, rx) = handle();
        let mut store = Store::new();

        let actions = services.execute(
            Request::Register {
                email: "Quit@Example.org".to_string(),
                password: secret("longenough"),
            },
            store.get_state(),
        );
        assert!(actions.is_empty());

        dispatch_pending(&mut store, &rx);
        let auth = &store.get_state().auth;
        assert!(auth.is_logged_in());
        assert_eq!(auth.user.as_deref(), Some("quit@example.org"));
        assert!(auth.token.is_some());
    }

    #[test]
    fn test_bad_login_sends_failure_and_shows_error() {
        let (mut services, rx) = handle();
        let mut store = Store::new();

        let actions = services.execute(
            Request::Login {
                email: "nobody@example.org".to_string(),
                password: secret("whatever1"),
            },
            store.get_state(),
        );
        assert!(matches!(actions.as_slice(), [Action::ShowError(_)]));

        dispatch_pending(&mut store, &rx);
        assert!(!store.get_state().auth.is_logged_in());
        assert!(store.get_state().auth.error.is_some());
    }

    #[test]
    fn test_logout_revokes_token() {
        let (mut services, rx) = handle();
        let mut store = Store::new();
        services.execute(
            Request::Register {
                email: "a@b.co".to_string(),
                password: secret("password1"),
            },
            store.get_state(),
        );
        dispatch_pending(&mut store, &rx);
        let token = store.get_state().auth.token.clone().unwrap();

        services.execute(Request::Logout, store.get_state());
        dispatch_pending(&mut store, &rx);

        assert!(!store.get_state().auth.is_logged_in());
        assert!(services.service().accounts().verify_token(&token).is_none());
    }

    #[test]
    fn test_new_task_returns_prompt() {
        let (mut services, _rx) = handle();
        let actions = services.execute(
            Request::NewTask {
                kind: TaskKind::Motor,
                difficulty: 2,
            },
            &RootState::default(),
        );
        match actions.as_slice() {
            [Action::TaskPromptReady(prompt)] => {
                assert_eq!(prompt.kind, TaskKind::Motor);
                assert_eq!(prompt.answer.len(), 5);
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_difficulty_is_an_error() {
        let (mut services, rx) = handle();
        let actions = services.execute(
            Request::NewTask {
                kind: TaskKind::Math,
                difficulty: 0,
            },
            &RootState::default(),
        );
        assert!(matches!(actions.as_slice(), [Action::ShowError(_)]));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_complete_task_logs_reward() {
        let (mut services, rx) = handle();
        let mut store = Store::new();
        let prompt = TaskPrompt {
            kind: TaskKind::Math,
            difficulty: 2,
            instructions: String::new(),
            question: "1 + 1 = ?".to_string(),
            answer: "2".to_string(),
        };

        services.execute(
            Request::CompleteTask {
                prompt,
                answer: "2".to_string(),
                started_at: Utc::now(),
            },
            store.get_state(),
        );
        dispatch_pending(&mut store, &rx);

        let log = &store.get_state().tasks.logs[0];
        assert!(log.success);
        assert!((log.reward_delta - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_close_day_counts_streak() {
        let (mut services, rx) = handle();
        let mut store = Store::new();

        services.execute(Request::CloseDay { smoked: false }, store.get_state());
        dispatch_pending(&mut store, &rx);
        assert_eq!(store.get_state().sessions.current_streak(), 1);

        // Closing the same day again replaces it
        services.execute(Request::CloseDay { smoked: true }, store.get_state());
        dispatch_pending(&mut store, &rx);
        assert_eq!(store.get_state().sessions.days.len(), 1);
        assert_eq!(store.get_state().sessions.current_streak(), 0);
    }

    #[test]
    fn test_close_day_uses_local_date() {
        let (mut services, rx) = handle();
        let mut store = Store::new();

        let before = Local::now().date_naive();
        services.execute(Request::CloseDay { smoked: false }, store.get_state());
        let after = Local::now().date_naive();
        dispatch_pending(&mut store, &rx);

        let date = store.get_state().sessions.latest().unwrap().date;
        assert!(date == before || date == after);
    }

    #[test]
    fn test_eco_and_baseline() {
        let (mut services, rx) = handle();
        let mut store = Store::new();

        services.execute(Request::LogDisposables { units: 2.0 }, store.get_state());
        services.execute(Request::SetBaseline { units_per_day: 1.5 }, store.get_state());
        dispatch_pending(&mut store, &rx);

        let eco = &store.get_state().eco;
        assert!((eco.total_karma() - 0.065).abs() < 1e-9);
        assert_eq!(eco.baseline_per_day, 1.5);

        let actions = services.execute(Request::SetBaseline { units_per_day: -1.0 }, store.get_state());
        assert!(matches!(actions.as_slice(), [Action::ShowError(_)]));
    }

    #[test]
    fn test_suggest_uses_recent_cravings() {
        let (mut services, rx) = handle();
        let mut store = Store::new();
        store.dispatch(StoreAction::CravingLogged {
            entry: CravingEntry::new(9, Some(1), None).unwrap(),
        });

        let (c0, a0) = initial_levels(store.get_state());
        assert!((c0 - 0.9).abs() < 1e-9);
        assert!((a0 - 0.1).abs() < 1e-9);

        services.execute(Request::SuggestTasks, store.get_state());
        dispatch_pending(&mut store, &rx);
        let offsets = &store.get_state().tasks.suggested_offsets;
        assert!(offsets.len() <= 4);
    }
}
