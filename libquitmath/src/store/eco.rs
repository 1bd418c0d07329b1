//! Eco impact slice

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Action;
use crate::types::{EcoRecord, EcoSummaryRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcoState {
    /// In the order they were recorded
    pub records: Vec<EcoRecord>,
    /// Disposables the user used per day before quitting
    pub baseline_per_day: f64,
}

impl EcoState {
    pub fn total_karma(&self) -> f64 {
        self.records.iter().map(|r| r.karma).sum()
    }

    /// Totals per metric, ordered by metric name
    pub fn summary(&self) -> Vec<EcoSummaryRow> {
        let mut rows: BTreeMap<&str, EcoSummaryRow> = BTreeMap::new();
        for record in &self.records {
            let row = rows.entry(record.metric.as_str()).or_insert_with(|| EcoSummaryRow {
                metric: record.metric.clone(),
                unit: record.unit.clone(),
                total_value: 0.0,
                total_karma: 0.0,
            });
            row.total_value += record.value;
            row.total_karma += record.karma;
        }
        rows.into_values().collect()
    }
}

pub fn reduce(state: EcoState, action: &Action) -> EcoState {
    match action {
        Action::EcoRecorded { records } => {
            let mut all = state.records;
            all.extend(records.iter().cloned());
            EcoState { records: all, ..state }
        }

        Action::EcoBaselineSet { units_per_day } => {
            if !units_per_day.is_finite() || *units_per_day < 0.0 {
                return state;
            }
            EcoState {
                baseline_per_day: *units_per_day,
                ..state
            }
        }

        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_groups_by_metric() {
        let records = vec![
            EcoRecord::new("DisposableVapesAvoided", "units", 2.0, 0.0),
            EcoRecord::new("PlasticPlusBatteryMass", "g", 50.0, 0.065),
            EcoRecord::new("DisposableVapesAvoided", "units", 1.0, 0.0),
        ];
        let state = reduce(EcoState::default(), &Action::EcoRecorded { records });

        let summary = state.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].metric, "DisposableVapesAvoided");
        assert_eq!(summary[0].total_value, 3.0);
        assert_eq!(summary[1].unit, "g");
        assert!((state.total_karma() - 0.065).abs() < 1e-12);
    }

    #[test]
    fn test_baseline_rejects_negative_and_nan() {
        let state = reduce(EcoState::default(), &Action::EcoBaselineSet { units_per_day: 1.5 });
        assert_eq!(state.baseline_per_day, 1.5);

        let state = reduce(state, &Action::EcoBaselineSet { units_per_day: -1.0 });
        assert_eq!(state.baseline_per_day, 1.5);

        let state = reduce(state, &Action::EcoBaselineSet { units_per_day: f64::NAN });
        assert_eq!(state.baseline_per_day, 1.5);
    }

    #[test]
    fn test_baseline_keeps_records() {
        let state = reduce(
            EcoState::default(),
            &Action::EcoRecorded {
                records: vec![EcoRecord::new("CO2eAvoided", "kg", 0.02, 0.0)],
            },
        );
        let state = reduce(state, &Action::EcoBaselineSet { units_per_day: 2.0 });
        assert_eq!(state.records.len(), 1);
    }
}
