//! Craving / attention / reward dynamics
//!
//! Three coupled state variables, each kept in [0, 1]:
//!
//! ```text
//! dC/dt = α_c - β_c·A - γ_c·R - δ_c·C
//! dA/dt = -λ_a·A + η_a·u(t) - κ_a·C
//! dR/dt = -R / τ_r                       (+ discrete reward pulses)
//! ```
//!
//! `u(t)` is the task input (1 while a task is running). The system is
//! integrated with forward Euler on a fixed grid of `dt` minutes.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Model coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdeParams {
    /// Baseline craving drive
    pub alpha_c: f64,
    /// Attention suppression of craving
    pub beta_c: f64,
    /// Reward suppression of craving
    pub gamma_c: f64,
    /// Craving self-decay
    pub delta_c: f64,
    /// Attention decay
    pub lambda_a: f64,
    /// Task gain on attention
    pub eta_a: f64,
    /// Craving interference with attention
    pub kappa_a: f64,
    /// Reward time constant, minutes
    pub tau_r: f64,
}

impl Default for OdeParams {
    fn default() -> Self {
        Self {
            alpha_c: 0.15,
            beta_c: 0.35,
            gamma_c: 0.25,
            delta_c: 0.05,
            lambda_a: 0.4,
            eta_a: 0.5,
            kappa_a: 0.3,
            tau_r: 2.0,
        }
    }
}

/// One sample of a simulated trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdePoint {
    pub t_min: f64,
    pub c: f64,
    pub a: f64,
    pub r: f64,
}

/// Simulation request with the same bounds the public API accepts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub c0: f64,
    pub a0: f64,
    pub r0: f64,
    pub horizon_minutes: f64,
    pub dt_minutes: f64,
}

impl SimulationRequest {
    pub const MIN_HORIZON: f64 = 5.0;
    pub const MAX_HORIZON: f64 = 1440.0;
    pub const MAX_DT: f64 = 60.0;

    /// Check initial values and grid bounds
    pub fn validate(&self) -> Result<(), ServiceError> {
        for (name, value) in [("c0", self.c0), ("a0", self.a0), ("r0", self.r0)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ServiceError::Validation(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if !(Self::MIN_HORIZON..=Self::MAX_HORIZON).contains(&self.horizon_minutes) {
            return Err(ServiceError::Validation(format!(
                "horizon must be between {} and {} minutes, got {}",
                Self::MIN_HORIZON,
                Self::MAX_HORIZON,
                self.horizon_minutes
            )));
        }
        if !(self.dt_minutes > 0.0 && self.dt_minutes <= Self::MAX_DT) {
            return Err(ServiceError::Validation(format!(
                "dt must be in (0, {}] minutes, got {}",
                Self::MAX_DT,
                self.dt_minutes
            )));
        }
        if step_count(self.horizon_minutes, self.dt_minutes).is_none() {
            return Err(ServiceError::Validation(format!(
                "dt {} is too fine for a {} minute horizon (at most {} steps)",
                self.dt_minutes, self.horizon_minutes, MAX_STEPS
            )));
        }
        Ok(())
    }
}

/// Upper bound on the number of samples in one trajectory
pub const MAX_STEPS: usize = 100_000;

/// `floor(horizon / dt) + 1`, or `None` past `MAX_STEPS`
fn step_count(horizon_minutes: f64, dt_minutes: f64) -> Option<usize> {
    let intervals = (horizon_minutes / dt_minutes).floor();
    if intervals.is_finite() && intervals < MAX_STEPS as f64 {
        Some(intervals as usize + 1)
    } else {
        None
    }
}

fn clip01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default)]
pub struct CravingOdeEngine {
    params: OdeParams,
}

impl CravingOdeEngine {
    pub fn new(params: OdeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OdeParams {
        &self.params
    }

    /// Validate and run a request with no task input and no reward pulses
    pub fn run(&self, request: &SimulationRequest) -> Result<Vec<OdePoint>, ServiceError> {
        request.validate()?;
        self.simulate(
            request.c0,
            request.a0,
            request.r0,
            request.horizon_minutes,
            request.dt_minutes,
            None,
            None,
        )
    }

    /// Integrate the system over `[0, horizon_minutes]`
    ///
    /// The grid has `floor(horizon / dt) + 1` samples evenly spread over the
    /// horizon. `u_schedule` and `reward_pulses`, when given, must have one
    /// value per sample; the value at sample `i - 1` drives step `i`.
    ///
    /// # Errors
    ///
    /// `ServiceError::Simulation` if the grid is degenerate, has more than
    /// `MAX_STEPS` samples, or a schedule has the wrong length.
    #[allow(clippy::too_many_arguments)]
    pub fn simulate(
        &self,
        c0: f64,
        a0: f64,
        r0: f64,
        horizon_minutes: f64,
        dt_minutes: f64,
        u_schedule: Option<&[f64]>,
        reward_pulses: Option<&[f64]>,
    ) -> Result<Vec<OdePoint>, ServiceError> {
        if !(dt_minutes > 0.0) || !dt_minutes.is_finite() {
            return Err(ServiceError::Simulation(format!(
                "dt must be positive, got {}",
                dt_minutes
            )));
        }
        if !(horizon_minutes >= 0.0) || !horizon_minutes.is_finite() {
            return Err(ServiceError::Simulation(format!(
                "horizon must be non-negative, got {}",
                horizon_minutes
            )));
        }

        let n_steps = step_count(horizon_minutes, dt_minutes).ok_or_else(|| {
            ServiceError::Simulation(format!(
                "grid of {} / {} minutes exceeds {} steps",
                horizon_minutes, dt_minutes, MAX_STEPS
            ))
        })?;

        for (name, schedule) in [("u_schedule", u_schedule), ("reward_pulses", reward_pulses)] {
            if let Some(values) = schedule {
                if values.len() != n_steps {
                    return Err(ServiceError::Simulation(format!(
                        "{} length must equal number of time steps ({}), got {}",
                        name,
                        n_steps,
                        values.len()
                    )));
                }
            }
        }

        let p = &self.params;
        let dt = dt_minutes;
        let spacing = if n_steps > 1 {
            horizon_minutes / (n_steps - 1) as f64
        } else {
            0.0
        };

        let mut points = Vec::with_capacity(n_steps);
        points.push(OdePoint {
            t_min: 0.0,
            c: c0,
            a: a0,
            r: r0,
        });

        for i in 1..n_steps {
            let prev = points[i - 1];
            let u_t = u_schedule.map(|u| u[i - 1]).unwrap_or(0.0);
            let pulse = reward_pulses.map(|r| r[i - 1]).unwrap_or(0.0);

            let d_c = p.alpha_c - p.beta_c * prev.a - p.gamma_c * prev.r - p.delta_c * prev.c;
            let d_a = -p.lambda_a * prev.a + p.eta_a * u_t - p.kappa_a * prev.c;
            let d_r = -prev.r / p.tau_r;

            let base_r = clip01(prev.r + dt * d_r);

            points.push(OdePoint {
                t_min: spacing * i as f64,
                c: clip01(prev.c + dt * d_c),
                a: clip01(prev.a + dt * d_a),
                r: clip01(base_r + pulse),
            });
        }

        Ok(points)
    }
}
