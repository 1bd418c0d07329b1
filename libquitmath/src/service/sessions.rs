//! Closing a day into a `DailySession`

use chrono::NaiveDate;

use super::markov::DailyMarkovModel;
use crate::types::{CravingEntry, DailySession, DailyState, TaskLog, SCALE_MAX};

#[derive(Debug, Clone, Default)]
pub struct SessionSummarizer {
    markov: DailyMarkovModel,
}

impl SessionSummarizer {
    pub fn new(markov: DailyMarkovModel) -> Self {
        Self { markov }
    }

    /// Summarize one day
    ///
    /// Averages are taken over that day's cravings and tasks. The streak
    /// continues only from a session on the immediately preceding day and
    /// resets to zero on a day with smoking. The state is S0 when the user
    /// smoked; otherwise it is the most likely successor of the previous
    /// day's state (S0 when there is none), lifted to at least S1 since the
    /// user did not smoke.
    pub fn close_day<'a>(
        &self,
        date: NaiveDate,
        cravings: impl IntoIterator<Item = &'a CravingEntry>,
        tasks: impl IntoIterator<Item = &'a TaskLog>,
        previous: Option<&DailySession>,
        smoked_today: bool,
    ) -> DailySession {
        let scale = f64::from(SCALE_MAX);

        let cravings: Vec<&CravingEntry> = cravings.into_iter().collect();
        let avg_craving = mean(cravings.iter().map(|e| f64::from(e.score) / scale));
        let avg_attention = mean(
            cravings
                .iter()
                .filter_map(|e| e.attention)
                .map(|a| f64::from(a) / scale),
        );
        let avg_reward = mean(tasks.into_iter().map(|t| t.reward_delta));

        let abstinent_streak = if smoked_today {
            0
        } else {
            let carried = previous
                .filter(|p| date.pred_opt() == Some(p.date))
                .map(|p| p.abstinent_streak)
                .unwrap_or(0);
            carried + 1
        };

        let state = if smoked_today {
            DailyState::Smoking
        } else {
            let from = previous.map(|p| p.state).unwrap_or(DailyState::Smoking);
            let next = self
                .markov
                .transition_probabilities(from, avg_craving, avg_attention, avg_reward)
                .most_likely();
            match next {
                DailyState::Smoking => DailyState::Withdrawal,
                other => other,
            }
        };

        tracing::info!(
            %date,
            state = %state,
            streak = abstinent_streak,
            "closed day"
        );

        DailySession {
            date,
            state,
            avg_craving,
            avg_attention,
            avg_reward,
            smoked_today,
            abstinent_streak,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const NO_CRAVINGS: &[CravingEntry] = &[];
    const NO_TASKS: &[TaskLog] = &[];

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn craving(day: u32, score: u8, attention: Option<u8>) -> CravingEntry {
        let ts = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        CravingEntry::at(ts, score, attention, None).unwrap()
    }

    fn previous(day: u32, state: DailyState, streak: u32) -> DailySession {
        DailySession {
            date: date(day),
            state,
            avg_craving: 0.0,
            avg_attention: 0.0,
            avg_reward: 0.0,
            smoked_today: state == DailyState::Smoking,
            abstinent_streak: streak,
        }
    }

    #[test]
    fn test_averages_scaled_to_unit_interval() {
        let cravings = vec![craving(2, 8, Some(2)), craving(2, 4, None)];
        let session = SessionSummarizer::default().close_day(date(2), &cravings, NO_TASKS, None, false);

        assert!((session.avg_craving - 0.6).abs() < 1e-12);
        assert!((session.avg_attention - 0.2).abs() < 1e-12);
        assert_eq!(session.avg_reward, 0.0);
    }

    #[test]
    fn test_empty_day_is_all_zero() {
        let session = SessionSummarizer::default().close_day(date(2), NO_CRAVINGS, NO_TASKS, None, false);
        assert_eq!(session.avg_craving, 0.0);
        assert_eq!(session.avg_attention, 0.0);
        assert_eq!(session.abstinent_streak, 1);
    }

    #[test]
    fn test_streak_continues_from_yesterday() {
        let prev = previous(4, DailyState::Withdrawal, 3);
        let session = SessionSummarizer::default().close_day(date(5), NO_CRAVINGS, NO_TASKS, Some(&prev), false);
        assert_eq!(session.abstinent_streak, 4);
    }

    #[test]
    fn test_streak_restarts_after_gap() {
        let prev = previous(2, DailyState::Withdrawal, 3);
        let session = SessionSummarizer::default().close_day(date(5), NO_CRAVINGS, NO_TASKS, Some(&prev), false);
        assert_eq!(session.abstinent_streak, 1);
    }

    #[test]
    fn test_smoking_resets_streak_and_state() {
        let prev = previous(4, DailyState::Stable, 10);
        let session = SessionSummarizer::default().close_day(date(5), NO_CRAVINGS, NO_TASKS, Some(&prev), true);
        assert_eq!(session.abstinent_streak, 0);
        assert_eq!(session.state, DailyState::Smoking);
    }

    #[test]
    fn test_abstinent_day_is_never_smoking_state() {
        // High craving, no attention: relapse is the most likely successor
        let cravings = vec![craving(5, 10, Some(0))];
        let prev = previous(4, DailyState::Withdrawal, 1);
        let session =
            SessionSummarizer::default().close_day(date(5), &cravings, NO_TASKS, Some(&prev), false);
        assert_eq!(session.state, DailyState::Withdrawal);
    }

    #[test]
    fn test_calm_stable_day_stays_stable() {
        let cravings = vec![craving(5, 1, Some(9))];
        let prev = previous(4, DailyState::Stable, 20);
        let session =
            SessionSummarizer::default().close_day(date(5), &cravings, NO_TASKS, Some(&prev), false);
        assert_eq!(session.state, DailyState::Stable);
        assert_eq!(session.abstinent_streak, 21);
    }
}
