//! Settings: eco baseline, sign out, and the active model parameters

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use libquitmath::{Config, RootState};

use super::Props;
use crate::app::{Intent, Request};

const BASELINE_STEP: f64 = 0.5;
const BASELINE_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Item {
    #[default]
    Baseline,
    Logout,
}

#[derive(Debug)]
pub struct State {
    /// Read-only `(name, value)` pairs of the loaded model configuration
    pub parameters: Vec<(String, String)>,
    pub baseline: f64,
    pub selected: Item,
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl State {
    pub fn new(config: &Config) -> Self {
        let ode = &config.ode;
        let markov = &config.markov;
        let scheduler = &config.scheduler;
        let eco = &config.eco;

        let parameters = [
            ("ode.alpha_c", ode.alpha_c),
            ("ode.beta_c", ode.beta_c),
            ("ode.gamma_c", ode.gamma_c),
            ("ode.delta_c", ode.delta_c),
            ("ode.lambda_a", ode.lambda_a),
            ("ode.eta_a", ode.eta_a),
            ("ode.kappa_a", ode.kappa_a),
            ("ode.tau_r", ode.tau_r),
            ("markov.theta_c_relapse", markov.theta_c_relapse),
            ("markov.theta_a_protect", markov.theta_a_protect),
            ("markov.k_relapse", markov.k_relapse),
            ("markov.k_recovery", markov.k_recovery),
            ("scheduler.threshold_high", scheduler.threshold_high),
            ("eco.karma_per_gram", eco.karma_per_gram),
            ("eco.karma_per_kg_co2e", eco.karma_per_kg_co2e),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), format!("{}", value)))
        .chain([
            (
                "scheduler.max_tasks_per_hour".to_string(),
                scheduler.max_tasks_per_hour.to_string(),
            ),
            (
                "auth.access_token_expire_minutes".to_string(),
                config.auth.access_token_expire_minutes.to_string(),
            ),
        ])
        .collect();

        Self {
            parameters,
            baseline: 0.0,
            selected: Item::Baseline,
        }
    }

    /// Pick up the stored baseline; parameters stay as loaded
    pub fn enter(&mut self, root: &RootState) {
        self.baseline = root.eco.baseline_per_day;
        self.selected = Item::Baseline;
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;

    let [menu_area, params_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

    let [items_area, hints_area] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(2)]).areas(menu_area);

    let baseline_label = if (local.baseline - props.root.eco.baseline_per_day).abs() > f64::EPSILON {
        format!("Baseline: {:.1} disposables/day (unsaved)", local.baseline)
    } else {
        format!("Baseline: {:.1} disposables/day", local.baseline)
    };
    let account = props.root.auth.user.as_deref().unwrap_or("not signed in");

    let items = vec![
        ListItem::new(baseline_label),
        ListItem::new(Line::from(vec![
            Span::raw("Sign out "),
            Span::styled(format!("({})", account), theme.muted()),
        ])),
    ];
    let mut list_state = ListState::default();
    list_state.select(Some(match local.selected {
        Item::Baseline => 0,
        Item::Logout => 1,
    }));
    frame.render_stateful_widget(
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Settings "))
            .highlight_style(theme.accent().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› "),
        items_area,
        &mut list_state,
    );
    frame.render_widget(
        Paragraph::new("↑/↓ select · ←/→ adjust · Enter apply").style(theme.muted()),
        hints_area,
    );

    let rows: Vec<Row> = local
        .parameters
        .iter()
        .map(|(name, value)| Row::new(vec![name.clone(), value.clone()]))
        .collect();
    frame.render_widget(
        Table::new(rows, [Constraint::Min(28), Constraint::Length(12)])
            .header(Row::new(vec!["Parameter", "Value"]).style(theme.bold()))
            .block(Block::default().borders(Borders::ALL).title(" Model ")),
        params_area,
    );
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
            local.selected = match local.selected {
                Item::Baseline => Item::Logout,
                Item::Logout => Item::Baseline,
            };
        }
        KeyCode::Left | KeyCode::Char('-') if local.selected == Item::Baseline => {
            local.baseline = (local.baseline - BASELINE_STEP).max(0.0);
        }
        KeyCode::Right | KeyCode::Char('+') if local.selected == Item::Baseline => {
            local.baseline = (local.baseline + BASELINE_STEP).min(BASELINE_MAX);
        }
        KeyCode::Enter => {
            return match local.selected {
                Item::Baseline => vec![Intent::Request(Request::SetBaseline {
                    units_per_day: local.baseline,
                })],
                Item::Logout => vec![Intent::Request(Request::Logout)],
            };
        }
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use libquitmath::{Action as StoreAction, Store};

    fn press(local: &mut State, code: KeyCode) -> Vec<Intent> {
        on_key(local, KeyEvent::new(code, KeyModifiers::NONE), &RootState::default())
    }

    #[test]
    fn test_parameters_reflect_config() {
        let mut config = Config::default();
        config.ode.alpha_c = 0.42;
        let local = State::new(&config);
        assert!(local
            .parameters
            .iter()
            .any(|(name, value)| name == "ode.alpha_c" && value == "0.42"));
    }

    #[test]
    fn test_enter_loads_stored_baseline() {
        let mut store = Store::new();
        store.dispatch(StoreAction::EcoBaselineSet { units_per_day: 2.5 });

        let mut local = State::default();
        local.enter(store.get_state());
        assert_eq!(local.baseline, 2.5);
    }

    #[test]
    fn test_baseline_never_negative() {
        let mut local = State::default();
        press(&mut local, KeyCode::Left);
        assert_eq!(local.baseline, 0.0);
        press(&mut local, KeyCode::Right);
        press(&mut local, KeyCode::Right);

        let intents = press(&mut local, KeyCode::Enter);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Request(Request::SetBaseline { units_per_day })] if *units_per_day == 1.0
        ));
    }

    #[test]
    fn test_logout_item() {
        let mut local = State::default();
        press(&mut local, KeyCode::Down);
        let intents = press(&mut local, KeyCode::Enter);
        assert!(matches!(intents.as_slice(), [Intent::Request(Request::Logout)]));
    }
}
