//! Task scheduling heuristic
//!
//! Simulates the next hour with the craving model and proposes tasks
//! shortly before predicted craving peaks. Deterministic, so that a learned
//! policy can later be compared against it.

use serde::{Deserialize, Serialize};

use super::ode::{CravingOdeEngine, OdeParams};
use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub horizon_minutes: u32,
    pub dt_minutes: f64,
    /// Craving level that triggers a task
    pub threshold_high: f64,
    pub max_tasks_per_hour: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_minutes: 60,
            dt_minutes: 1.0,
            threshold_high: 0.6,
            max_tasks_per_hour: 4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskScheduler {
    engine: CravingOdeEngine,
    config: SchedulerConfig,
}

impl TaskScheduler {
    pub fn new(ode_params: OdeParams, config: SchedulerConfig) -> Self {
        Self {
            engine: CravingOdeEngine::new(ode_params),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Minute offsets within the horizon at which to propose a task
    ///
    /// A sample qualifies when craving is at or above `threshold_high` and
    /// still rising. Qualifying samples closer than `60 / max_tasks_per_hour`
    /// minutes to the previous pick are skipped, and at most
    /// `max_tasks_per_hour` offsets are returned.
    pub fn suggest_task_schedule(&self, c0: f64, a0: f64, r0: f64) -> Result<Vec<u32>, ServiceError> {
        let cfg = &self.config;
        if cfg.max_tasks_per_hour == 0 {
            return Ok(Vec::new());
        }

        let points = self.engine.simulate(
            c0,
            a0,
            r0,
            f64::from(cfg.horizon_minutes),
            cfg.dt_minutes,
            None,
            None,
        )?;

        let min_gap_steps =
            ((60.0 / (f64::from(cfg.max_tasks_per_hour) * cfg.dt_minutes)) as usize).max(1);

        let mut picks: Vec<usize> = Vec::new();
        let mut last_pick: Option<usize> = None;

        for idx in 1..points.len().saturating_sub(1) {
            let rising = points[idx].c > points[idx - 1].c;
            if points[idx].c >= cfg.threshold_high && rising {
                let far_enough = last_pick.map_or(true, |last| idx - last >= min_gap_steps);
                if far_enough {
                    picks.push(idx);
                    last_pick = Some(idx);
                }
            }
        }

        let offsets = picks
            .into_iter()
            .take(cfg.max_tasks_per_hour as usize)
            .map(|i| points[i].t_min as u32)
            .collect();

        Ok(offsets)
    }
}
