//! Eco impact: log avoided disposables, see karma totals per metric

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use libquitmath::RootState;

use super::Props;
use crate::app::{Intent, Request};

pub const MAX_UNITS: u32 = 100;

#[derive(Debug)]
pub struct State {
    /// Disposables to log as avoided
    pub units: u32,
}

impl Default for State {
    fn default() -> Self {
        Self { units: 1 }
    }
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let eco = &props.root.eco;

    let [entry_area, table_area, hints_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut lines = vec![Line::from(vec![
        Span::raw("Disposables avoided: "),
        Span::styled(props.local.units.to_string(), theme.accent().add_modifier(Modifier::BOLD)),
    ])];
    if eco.baseline_per_day > 0.0 {
        lines.push(Line::from(Span::styled(
            format!("Your baseline: {:.1} per day", eco.baseline_per_day),
            theme.muted(),
        )));
    }
    lines.push(Line::from(vec![
        Span::raw("Total karma: "),
        Span::styled(format!("{:.3}", eco.total_karma()), theme.good()),
    ]));
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log ")),
        entry_area,
    );

    let rows: Vec<Row> = eco
        .summary()
        .into_iter()
        .map(|row| {
            Row::new(vec![
                row.metric,
                format!("{:.1} {}", row.total_value, row.unit),
                format!("{:.3}", row.total_karma),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Min(24), Constraint::Length(16), Constraint::Length(10)],
    )
    .header(Row::new(vec!["Metric", "Total", "Karma"]).style(theme.bold()))
    .block(Block::default().borders(Borders::ALL).title(" Impact "));
    frame.render_widget(table, table_area);

    frame.render_widget(
        Paragraph::new("+/- or ←/→ units · Enter log").style(theme.muted()),
        hints_area,
    );
}

pub fn on_key(local: &mut State, key: KeyEvent, _root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => {
            local.units = (local.units + 1).min(MAX_UNITS);
        }
        KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => {
            local.units = local.units.saturating_sub(1).max(1);
        }
        KeyCode::Enter => {
            return vec![Intent::Request(Request::LogDisposables {
                units: f64::from(local.units),
            })];
        }
        _ => {}
    }
    Vec::new()
}
