//! Task log slice

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::Action;
use crate::types::TaskLog;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksState {
    /// Newest first
    pub logs: Vec<TaskLog>,
    /// Last schedule proposed by the scheduler, minute offsets
    pub suggested_offsets: Vec<u32>,
}

impl TasksState {
    /// Tasks started on `date` as seen in `tz`
    pub fn on<Tz: TimeZone>(&self, date: NaiveDate, tz: Tz) -> impl Iterator<Item = &TaskLog> {
        self.logs
            .iter()
            .filter(move |l| l.started_at.with_timezone(&tz).date_naive() == date)
    }

    /// Share of successful tasks, `None` before the first task
    pub fn success_rate(&self) -> Option<f64> {
        if self.logs.is_empty() {
            return None;
        }
        let successes = self.logs.iter().filter(|l| l.success).count();
        Some(successes as f64 / self.logs.len() as f64)
    }

    pub fn total_reward(&self) -> f64 {
        self.logs.iter().map(|l| l.reward_delta).sum()
    }
}

pub fn reduce(state: TasksState, action: &Action) -> TasksState {
    match action {
        Action::TaskLogged { log } => {
            if state.logs.iter().any(|l| l.id == log.id) {
                return state;
            }

            let mut logs = state.logs;
            let pos = logs.partition_point(|l| l.started_at > log.started_at);
            logs.insert(pos, log.clone());

            TasksState { logs, ..state }
        }

        Action::TasksSuggested { minute_offsets } => TasksState {
            suggested_offsets: minute_offsets.clone(),
            ..state
        },

        _ => state,
    }
}
