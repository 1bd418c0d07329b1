//! Daily three-state Markov abstraction
//!
//! S0 smoking, S1 abstinent with high withdrawal, S2 stable abstinence.
//! Transition probabilities depend on the day's average craving, attention
//! and reward (all on [0, 1]).

use serde::{Deserialize, Serialize};

use crate::types::DailyState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkovParams {
    pub theta_c_relapse: f64,
    pub theta_a_protect: f64,
    pub k_relapse: f64,
    pub k_recovery: f64,
}

impl Default for MarkovParams {
    fn default() -> Self {
        Self {
            theta_c_relapse: 0.6,
            theta_a_protect: 0.4,
            k_relapse: 4.0,
            k_recovery: 4.0,
        }
    }
}

/// Next-day probabilities from one state
///
/// The S1 row is built from two independent logistic terms and the
/// remainder is clipped at zero, so it can sum to more than one when both
/// relapse and recovery pressure are high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionProbabilities {
    pub smoking: f64,
    pub withdrawal: f64,
    pub stable: f64,
}

impl TransitionProbabilities {
    pub fn get(&self, state: DailyState) -> f64 {
        match state {
            DailyState::Smoking => self.smoking,
            DailyState::Withdrawal => self.withdrawal,
            DailyState::Stable => self.stable,
        }
    }

    /// Most probable next state; ties go to the earlier state in S0, S1, S2
    pub fn most_likely(&self) -> DailyState {
        DailyState::ALL
            .iter()
            .copied()
            .fold(DailyState::Smoking, |best, s| {
                if self.get(s) > self.get(best) {
                    s
                } else {
                    best
                }
            })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn clip01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default)]
pub struct DailyMarkovModel {
    params: MarkovParams,
}

impl DailyMarkovModel {
    pub fn new(params: MarkovParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MarkovParams {
        &self.params
    }

    pub fn transition_probabilities(
        &self,
        state: DailyState,
        avg_c: f64,
        avg_a: f64,
        avg_r: f64,
    ) -> TransitionProbabilities {
        let p = &self.params;
        match state {
            DailyState::Withdrawal => {
                let x_relapse = avg_c - p.theta_c_relapse - (avg_a - p.theta_a_protect);
                let to_smoking = clip01(sigmoid(p.k_relapse * x_relapse));

                let x_recover = avg_r + avg_a - p.theta_a_protect;
                let to_stable = clip01(sigmoid(p.k_recovery * x_recover));

                TransitionProbabilities {
                    smoking: to_smoking,
                    withdrawal: clip01(1.0 - to_smoking - to_stable),
                    stable: to_stable,
                }
            }

            DailyState::Smoking => {
                let p_quit = clip01(0.1 + 0.4 * avg_r);
                TransitionProbabilities {
                    smoking: 1.0 - p_quit,
                    withdrawal: p_quit,
                    stable: 0.0,
                }
            }

            DailyState::Stable => {
                let relapse = clip01(0.05 + 0.4 * (avg_c - avg_a));
                TransitionProbabilities {
                    smoking: relapse * 0.2,
                    withdrawal: relapse * 0.8,
                    stable: 1.0 - relapse,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoking_row() {
        let model = DailyMarkovModel::default();
        let probs = model.transition_probabilities(DailyState::Smoking, 0.9, 0.1, 0.5);

        assert!((probs.withdrawal - 0.3).abs() < 1e-12);
        assert!((probs.smoking - 0.7).abs() < 1e-12);
        assert_eq!(probs.stable, 0.0);
    }

    #[test]
    fn test_stable_row_sums_to_one() {
        let model = DailyMarkovModel::default();
        let probs = model.transition_probabilities(DailyState::Stable, 0.7, 0.2, 0.0);

        let sum = probs.smoking + probs.withdrawal + probs.stable;
        assert!((sum - 1.0).abs() < 1e-12);
        // relapse = 0.05 + 0.4 * 0.5 = 0.25
        assert!((probs.stable - 0.75).abs() < 1e-12);
        assert!((probs.smoking - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_withdrawal_at_thresholds_is_even() {
        let model = DailyMarkovModel::default();
        // x_relapse = 0 and x_recover = 0 -> both sigmoids are 0.5
        let probs = model.transition_probabilities(DailyState::Withdrawal, 0.6, 0.4, 0.0);

        assert!((probs.smoking - 0.5).abs() < 1e-12);
        assert!((probs.stable - 0.5).abs() < 1e-12);
        assert_eq!(probs.withdrawal, 0.0);
    }

    #[test]
    fn test_withdrawal_high_craving_favours_relapse() {
        let model = DailyMarkovModel::default();
        let probs = model.transition_probabilities(DailyState::Withdrawal, 1.0, 0.0, 0.0);
        assert!(probs.smoking > probs.stable);
        assert_eq!(probs.most_likely(), DailyState::Smoking);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let model = DailyMarkovModel::default();
        for state in DailyState::ALL {
            for &c in &[0.0, 0.5, 1.0] {
                for &a in &[0.0, 0.5, 1.0] {
                    let probs = model.transition_probabilities(state, c, a, 0.3);
                    for s in DailyState::ALL {
                        assert!((0.0..=1.0).contains(&probs.get(s)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_most_likely_tie_prefers_earlier_state() {
        let probs = TransitionProbabilities {
            smoking: 0.2,
            withdrawal: 0.4,
            stable: 0.4,
        };
        assert_eq!(probs.most_likely(), DailyState::Withdrawal);
    }
}
