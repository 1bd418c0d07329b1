//! Actions for the reducer pattern
//!
//! Every state change is described by an `Action`. Actions are plain data;
//! the slice reducers decide what (if anything) each one means for them.
//! On the wire an action is `{ "type": "<slice>/<event>", "payload": {...} }`.
//! A type string this build does not know, with or without a payload,
//! reads as `Action::Unrecognized`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SliceKey;
use crate::types::{CravingEntry, DailySession, EcoRecord, TaskLog};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", content = "payload")]
pub enum Action {
    // === Auth ===
    /// A user signed in (or finished registering)
    #[serde(rename = "auth/login")]
    Login {
        user: String,
        #[serde(default)]
        token: Option<String>,
    },

    /// Sign-in or registration was rejected
    #[serde(rename = "auth/loginFailed")]
    LoginFailed { error: String },

    #[serde(rename = "auth/logout")]
    Logout,

    // === Cravings ===
    #[serde(rename = "cravings/logged")]
    CravingLogged { entry: CravingEntry },

    #[serde(rename = "cravings/cleared")]
    CravingsCleared,

    // === Tasks ===
    #[serde(rename = "tasks/logged")]
    TaskLogged { log: TaskLog },

    /// Scheduler proposal: minute offsets from now at which to run a task
    #[serde(rename = "tasks/suggested")]
    TasksSuggested { minute_offsets: Vec<u32> },

    // === Sessions ===
    /// A day was closed; replaces any session already recorded for that date
    #[serde(rename = "sessions/recorded")]
    SessionRecorded { session: DailySession },

    // === Eco ===
    #[serde(rename = "eco/recorded")]
    EcoRecorded { records: Vec<EcoRecord> },

    #[serde(rename = "eco/baselineSet")]
    EcoBaselineSet { units_per_day: f64 },

    /// Any type string this build does not know. Every slice ignores it.
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Action::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let known = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))
            .map(Action::is_known_type)?;
        if !known {
            return Ok(Action::Unrecognized);
        }
        Action::deserialize(value).map_err(D::Error::custom)
    }
}

impl Action {
    const KNOWN_TYPES: [&'static str; 10] = [
        "auth/login",
        "auth/loginFailed",
        "auth/logout",
        "cravings/logged",
        "cravings/cleared",
        "tasks/logged",
        "tasks/suggested",
        "sessions/recorded",
        "eco/recorded",
        "eco/baselineSet",
    ];

    fn is_known_type(name: &str) -> bool {
        Self::KNOWN_TYPES.contains(&name)
    }

    /// Stable type string, as used in logs and on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "auth/login",
            Action::LoginFailed { .. } => "auth/loginFailed",
            Action::Logout => "auth/logout",
            Action::CravingLogged { .. } => "cravings/logged",
            Action::CravingsCleared => "cravings/cleared",
            Action::TaskLogged { .. } => "tasks/logged",
            Action::TasksSuggested { .. } => "tasks/suggested",
            Action::SessionRecorded { .. } => "sessions/recorded",
            Action::EcoRecorded { .. } => "eco/recorded",
            Action::EcoBaselineSet { .. } => "eco/baselineSet",
            Action::Unrecognized => "unrecognized",
        }
    }

    /// The slice this action is addressed to, if any
    pub fn slice(&self) -> Option<SliceKey> {
        match self {
            Action::Login { .. } | Action::LoginFailed { .. } | Action::Logout => Some(SliceKey::Auth),
            Action::CravingLogged { .. } | Action::CravingsCleared => Some(SliceKey::Cravings),
            Action::TaskLogged { .. } | Action::TasksSuggested { .. } => Some(SliceKey::Tasks),
            Action::SessionRecorded { .. } => Some(SliceKey::Sessions),
            Action::EcoRecorded { .. } | Action::EcoBaselineSet { .. } => Some(SliceKey::Eco),
            Action::Unrecognized => None,
        }
    }
}
