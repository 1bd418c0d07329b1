//! Craving log slice

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::Action;
use crate::types::CravingEntry;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CravingsState {
    /// Newest first
    pub entries: Vec<CravingEntry>,
}

impl CravingsState {
    pub fn latest(&self) -> Option<&CravingEntry> {
        self.entries.first()
    }

    /// Entries whose timestamp falls on `date` as seen in `tz`
    pub fn on<Tz: TimeZone>(&self, date: NaiveDate, tz: Tz) -> impl Iterator<Item = &CravingEntry> {
        self.entries
            .iter()
            .filter(move |e| e.timestamp.with_timezone(&tz).date_naive() == date)
    }

    /// Mean craving score of the `n` most recent entries, on the 0–10 scale
    pub fn recent_average(&self, n: usize) -> Option<f64> {
        let recent: Vec<f64> = self.entries.iter().take(n).map(|e| f64::from(e.score)).collect();
        if recent.is_empty() {
            return None;
        }
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    }
}

pub fn reduce(state: CravingsState, action: &Action) -> CravingsState {
    match action {
        Action::CravingLogged { entry } => {
            if state.entries.iter().any(|e| e.id == entry.id) {
                return state;
            }

            let mut entries = state.entries;
            // Keep newest-first even when an older entry arrives late
            let pos = entries.partition_point(|e| e.timestamp > entry.timestamp);
            entries.insert(pos, entry.clone());

            CravingsState { entries }
        }

        Action::CravingsCleared => CravingsState::default(),

        _ => state,
    }
}
