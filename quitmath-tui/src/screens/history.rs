//! Logged cravings, tasks and closed days

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use libquitmath::{Action as StoreAction, RootState};

use super::Props;
use crate::app::{Intent, Request};
use crate::ui::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Cravings,
    Tasks,
    Days,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Cravings, Tab::Tasks, Tab::Days];

    fn title(&self) -> &'static str {
        match self {
            Tab::Cravings => "Cravings",
            Tab::Tasks => "Tasks",
            Tab::Days => "Days",
        }
    }

    fn index(&self) -> usize {
        match self {
            Tab::Cravings => 0,
            Tab::Tasks => 1,
            Tab::Days => 2,
        }
    }

    fn len(&self, root: &RootState) -> usize {
        match self {
            Tab::Cravings => root.cravings.entries.len(),
            Tab::Tasks => root.tasks.logs.len(),
            Tab::Days => root.sessions.days.len(),
        }
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub tab: Tab,
    /// Rows skipped from the top of the table
    pub offset: usize,
}

pub fn render(frame: &mut Frame, area: Rect, props: &Props<'_, State>) {
    let theme = props.theme;
    let local = props.local;
    let root = props.root;

    let [tabs_area, table_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
        .block(Block::default().borders(Borders::ALL))
        .select(local.tab.index())
        .highlight_style(theme.accent().add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let table = match local.tab {
        Tab::Cravings => cravings_table(root, local.offset, theme),
        Tab::Tasks => tasks_table(root, local.offset, theme),
        Tab::Days => days_table(root, local.offset, theme),
    };
    frame.render_widget(table, table_area);

    let hints = Line::from(vec![
        Span::styled("Tab", theme.bold()),
        Span::raw(" switch   "),
        Span::styled("d", theme.bold()),
        Span::raw(" close day abstinent   "),
        Span::styled("s", theme.bold()),
        Span::raw(" close day smoked   "),
        Span::styled("x", theme.bold()),
        Span::raw(" clear cravings"),
    ]);
    frame.render_widget(Paragraph::new(hints).style(theme.muted()), hints_area);
}

fn header<'a>(cells: &[&'a str], theme: Theme) -> Row<'a> {
    Row::new(cells.iter().map(|c| Cell::from(*c))).style(theme.bold())
}

fn cravings_table(root: &RootState, offset: usize, theme: Theme) -> Table<'static> {
    let rows: Vec<Row> = root
        .cravings
        .entries
        .iter()
        .skip(offset)
        .map(|e| {
            Row::new(vec![
                e.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                e.score.to_string(),
                e.attention.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
                e.note.clone().unwrap_or_default(),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(header(&["When", "Score", "Attention", "Note"], theme))
    .block(Block::default().borders(Borders::ALL).title(" Cravings "))
}

fn tasks_table(root: &RootState, offset: usize, theme: Theme) -> Table<'static> {
    let rows: Vec<Row> = root
        .tasks
        .logs
        .iter()
        .skip(offset)
        .map(|l| {
            let outcome = if l.success {
                Span::styled("solved", theme.good())
            } else {
                Span::styled("missed", theme.bad())
            };
            Row::new(vec![
                Cell::from(l.started_at.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(l.kind.label()),
                Cell::from(l.difficulty.to_string()),
                Cell::from(outcome),
                Cell::from(format!("{:.3}", l.reward_delta)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(15),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Min(7),
        ],
    )
    .header(header(&["When", "Task", "Lvl", "Result", "Reward"], theme))
    .block(Block::default().borders(Borders::ALL).title(" Tasks "))
}

fn days_table(root: &RootState, offset: usize, theme: Theme) -> Table<'static> {
    // Newest day first
    let rows: Vec<Row> = root
        .sessions
        .days
        .iter()
        .rev()
        .skip(offset)
        .map(|d| {
            Row::new(vec![
                d.date.to_string(),
                format!("{} {}", d.state.code(), d.state.label()),
                format!("{:.2}", d.avg_craving),
                format!("{:.2}", d.avg_attention),
                if d.smoked_today { "yes" } else { "no" }.to_string(),
                d.abstinent_streak.to_string(),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(6),
        ],
    )
    .header(header(&["Date", "State", "Craving", "Attention", "Smoked", "Streak"], theme))
    .block(Block::default().borders(Borders::ALL).title(" Days "))
}

pub fn on_key(local: &mut State, key: KeyEvent, root: &RootState) -> Vec<Intent> {
    match key.code {
        KeyCode::Tab | KeyCode::Right => {
            local.tab = Tab::ALL[(local.tab.index() + 1) % Tab::ALL.len()];
            local.offset = 0;
        }
        KeyCode::BackTab | KeyCode::Left => {
            local.tab = Tab::ALL[(local.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()];
            local.offset = 0;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if local.offset + 1 < local.tab.len(root) {
                local.offset += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => local.offset = local.offset.saturating_sub(1),
        KeyCode::Char('d') => return vec![Intent::Request(Request::CloseDay { smoked: false })],
        KeyCode::Char('s') => return vec![Intent::Request(Request::CloseDay { smoked: true })],
        KeyCode::Char('x') => {
            local.offset = 0;
            return vec![Intent::Dispatch(StoreAction::CravingsCleared)];
        }
        _ => {}
    }
    Vec::new()
}
