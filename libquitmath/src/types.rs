//! Domain records shared by the state store and the services

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ServiceError;

/// Highest value on the craving and attention scales
pub const SCALE_MAX: u8 = 10;

/// A single self-reported craving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CravingEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Craving intensity, 0–10
    pub score: u8,
    /// Self-rated attention, 0–10
    pub attention: Option<u8>,
    pub note: Option<String>,
}

impl CravingEntry {
    /// Create a new entry stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if `score` or `attention` is
    /// outside 0–10.
    pub fn new(score: u8, attention: Option<u8>, note: Option<String>) -> Result<Self, ServiceError> {
        Self::at(Utc::now(), score, attention, note)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Utc>,
        score: u8,
        attention: Option<u8>,
        note: Option<String>,
    ) -> Result<Self, ServiceError> {
        if score > SCALE_MAX {
            return Err(ServiceError::Validation(format!(
                "craving score must be between 0 and {}, got {}",
                SCALE_MAX, score
            )));
        }
        if let Some(a) = attention {
            if a > SCALE_MAX {
                return Err(ServiceError::Validation(format!(
                    "attention must be between 0 and {}, got {}",
                    SCALE_MAX, a
                )));
            }
        }

        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            score,
            attention,
            note,
        })
    }
}

/// Kinds of distraction task offered by the task player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskKind {
    Math,
    NBack,
    Motor,
    Breath,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [TaskKind::Math, TaskKind::NBack, TaskKind::Motor, TaskKind::Breath];

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Math => "Mental math",
            TaskKind::NBack => "N-back",
            TaskKind::Motor => "Motor sequence",
            TaskKind::Breath => "Box breathing",
        }
    }

    /// The next kind in `ALL`, wrapping around
    pub fn next(&self) -> TaskKind {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous kind in `ALL`, wrapping around
    pub fn previous(&self) -> TaskKind {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::Math => "MATH",
            TaskKind::NBack => "NBACK",
            TaskKind::Motor => "MOTOR",
            TaskKind::Breath => "BREATH",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MATH" => Ok(TaskKind::Math),
            "NBACK" => Ok(TaskKind::NBack),
            "MOTOR" => Ok(TaskKind::Motor),
            "BREATH" => Ok(TaskKind::Breath),
            _ => Err(format!(
                "Invalid task kind: '{}'. Valid options: MATH, NBACK, MOTOR, BREATH",
                s
            )),
        }
    }
}

/// A completed (or abandoned) task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLog {
    pub id: String,
    pub kind: TaskKind,
    /// 1–10
    pub difficulty: u8,
    pub success: bool,
    /// Non-negative reward credited to the reward variable of the model
    pub reward_delta: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Daily Markov abstraction of the quit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DailyState {
    /// Smoking
    #[serde(rename = "S0")]
    Smoking,
    /// Abstinent, high withdrawal
    #[serde(rename = "S1")]
    Withdrawal,
    /// Stable abstinence
    #[serde(rename = "S2")]
    Stable,
}

impl DailyState {
    pub const ALL: [DailyState; 3] = [DailyState::Smoking, DailyState::Withdrawal, DailyState::Stable];

    pub fn code(&self) -> &'static str {
        match self {
            DailyState::Smoking => "S0",
            DailyState::Withdrawal => "S1",
            DailyState::Stable => "S2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DailyState::Smoking => "Smoking",
            DailyState::Withdrawal => "Withdrawal",
            DailyState::Stable => "Stable",
        }
    }
}

impl fmt::Display for DailyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for DailyState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "S0" | "SMOKING" => Ok(DailyState::Smoking),
            "S1" | "WITHDRAWAL" => Ok(DailyState::Withdrawal),
            "S2" | "STABLE" => Ok(DailyState::Stable),
            _ => Err(format!("Invalid daily state: '{}'. Valid options: S0, S1, S2", s)),
        }
    }
}

/// Per-day summary of cravings, tasks and abstinence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySession {
    pub date: NaiveDate,
    pub state: DailyState,
    /// Mean craving score scaled to [0, 1]
    pub avg_craving: f64,
    /// Mean attention scaled to [0, 1]
    pub avg_attention: f64,
    /// Mean reward delta of the day's tasks
    pub avg_reward: f64,
    pub smoked_today: bool,
    pub abstinent_streak: u32,
}

/// One eco-impact measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// e.g. "DisposableVapesAvoided"
    pub metric: String,
    /// e.g. "units", "g", "kg"
    pub unit: String,
    pub value: f64,
    pub karma: f64,
}

impl EcoRecord {
    pub fn new(metric: &str, unit: &str, value: f64, karma: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            metric: metric.to_string(),
            unit: unit.to_string(),
            value,
            karma,
        }
    }
}

/// Per-metric totals of eco records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoSummaryRow {
    pub metric: String,
    pub unit: String,
    pub total_value: f64,
    pub total_karma: f64,
}
