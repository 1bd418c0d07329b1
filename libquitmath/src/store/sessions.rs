//! Daily session slice

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Action;
use crate::types::DailySession;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsState {
    /// Oldest first, at most one per date
    pub days: Vec<DailySession>,
}

impl SessionsState {
    pub fn latest(&self) -> Option<&DailySession> {
        self.days.last()
    }

    pub fn on(&self, date: NaiveDate) -> Option<&DailySession> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Most recent session strictly before `date`
    pub fn before(&self, date: NaiveDate) -> Option<&DailySession> {
        self.days.iter().rev().find(|d| d.date < date)
    }

    /// Abstinent streak as of the latest closed day
    pub fn current_streak(&self) -> u32 {
        self.latest().map(|d| d.abstinent_streak).unwrap_or(0)
    }

    pub fn longest_streak(&self) -> u32 {
        self.days.iter().map(|d| d.abstinent_streak).max().unwrap_or(0)
    }
}

pub fn reduce(state: SessionsState, action: &Action) -> SessionsState {
    match action {
        Action::SessionRecorded { session } => {
            let mut days = state.days;
            match days.binary_search_by(|d| d.date.cmp(&session.date)) {
                Ok(pos) => days[pos] = session.clone(),
                Err(pos) => days.insert(pos, session.clone()),
            }
            SessionsState { days }
        }

        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DailyState;

    fn session(day: u32, streak: u32) -> DailySession {
        DailySession {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            state: DailyState::Withdrawal,
            avg_craving: 0.5,
            avg_attention: 0.5,
            avg_reward: 0.0,
            smoked_today: false,
            abstinent_streak: streak,
        }
    }

    #[test]
    fn test_sessions_are_ordered_by_date() {
        let mut state = SessionsState::default();
        for (day, streak) in [(3, 3), (1, 1), (2, 2)] {
            state = reduce(state, &Action::SessionRecorded { session: session(day, streak) });
        }

        let streaks: Vec<u32> = state.days.iter().map(|d| d.abstinent_streak).collect();
        assert_eq!(streaks, vec![1, 2, 3]);
        assert_eq!(state.current_streak(), 3);
    }

    #[test]
    fn test_recording_same_date_replaces() {
        let state = reduce(SessionsState::default(), &Action::SessionRecorded { session: session(1, 1) });
        let mut smoked = session(1, 0);
        smoked.smoked_today = true;
        let state = reduce(state, &Action::SessionRecorded { session: smoked });

        assert_eq!(state.days.len(), 1);
        assert!(state.days[0].smoked_today);
        assert_eq!(state.current_streak(), 0);
    }

    #[test]
    fn test_before_and_longest() {
        let mut state = SessionsState::default();
        for (day, streak) in [(1, 4), (2, 0), (4, 1)] {
            state = reduce(state, &Action::SessionRecorded { session: session(day, streak) });
        }

        let day4 = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(state.before(day4).map(|d| d.abstinent_streak), Some(0));
        assert_eq!(state.longest_streak(), 4);
        assert!(state.on(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()).is_none());
    }

    #[test]
    fn test_empty_streak_is_zero() {
        assert_eq!(SessionsState::default().current_streak(), 0);
    }
}
