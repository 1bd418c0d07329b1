//! Task content provider
//!
//! Generates prompts for the four task kinds and scores answers. The
//! generator is seedable so that tests and replays see the same prompts.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::types::{TaskKind, TaskLog};

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

const NBACK_LETTERS: &[u8] = b"ABCDEFGH";
const MOTOR_KEYS: &[u8] = b"asdfjkl;";

/// A generated task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPrompt {
    pub kind: TaskKind,
    pub difficulty: u8,
    pub instructions: String,
    pub question: String,
    pub answer: String,
}

pub struct TaskProvider {
    rng: StdRng,
}

impl Default for TaskProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a prompt of `kind` at `difficulty`
    ///
    /// # Errors
    ///
    /// `ServiceError::Validation` if `difficulty` is outside 1–10.
    pub fn generate(&mut self, kind: TaskKind, difficulty: u8) -> Result<TaskPrompt, ServiceError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ServiceError::Validation(format!(
                "difficulty must be between {} and {}, got {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY, difficulty
            )));
        }

        let prompt = match kind {
            TaskKind::Math => self.math(difficulty),
            TaskKind::NBack => self.nback(difficulty),
            TaskKind::Motor => self.motor(difficulty),
            TaskKind::Breath => breath(difficulty),
        };

        tracing::debug!(kind = %kind, difficulty, "generated task prompt");
        Ok(prompt)
    }

    fn math(&mut self, d: u8) -> TaskPrompt {
        let d = u32::from(d);
        let ops: &[char] = if d > 4 { &['+', '-', '*'] } else { &['+', '-'] };
        let op = *ops.choose(&mut self.rng).unwrap_or(&'+');

        let (a, b) = if op == '*' {
            let max = 2 + d;
            (self.rng.gen_range(2..=max), self.rng.gen_range(2..=max))
        } else {
            let max = 5 * d + 5;
            (self.rng.gen_range(1..=max), self.rng.gen_range(1..=max))
        };

        let answer = match op {
            '+' => i64::from(a) + i64::from(b),
            '-' => i64::from(a) - i64::from(b),
            _ => i64::from(a) * i64::from(b),
        };

        TaskPrompt {
            kind: TaskKind::Math,
            difficulty: d as u8,
            instructions: "Solve the problem and press Enter.".to_string(),
            question: format!("{} {} {} = ?", a, op, b),
            answer: answer.to_string(),
        }
    }

    fn nback(&mut self, d: u8) -> TaskPrompt {
        let n = 1 + usize::from(d - 1) / 4;
        let len = n + 4;

        let mut seq: Vec<u8> = (0..len)
            .map(|_| NBACK_LETTERS[self.rng.gen_range(0..NBACK_LETTERS.len())])
            .collect();

        let target = seq[len - 1 - n];
        let is_match = self.rng.gen_bool(0.5);
        if is_match {
            seq[len - 1] = target;
        } else {
            while seq[len - 1] == target {
                seq[len - 1] = NBACK_LETTERS[self.rng.gen_range(0..NBACK_LETTERS.len())];
            }
        }

        let shown: Vec<String> = seq.iter().map(|&b| char::from(b).to_string()).collect();

        TaskPrompt {
            kind: TaskKind::NBack,
            difficulty: d,
            instructions: format!(
                "Does the last letter match the one {} position{} before it? Answer y or n.",
                n,
                if n == 1 { "" } else { "s" }
            ),
            question: shown.join(" "),
            answer: if is_match { "y" } else { "n" }.to_string(),
        }
    }

    fn motor(&mut self, d: u8) -> TaskPrompt {
        let len = 3 + usize::from(d);
        let keys: String = (0..len)
            .map(|_| char::from(MOTOR_KEYS[self.rng.gen_range(0..MOTOR_KEYS.len())]))
            .collect();

        TaskPrompt {
            kind: TaskKind::Motor,
            difficulty: d,
            instructions: "Type the key sequence exactly, then press Enter.".to_string(),
            question: keys.clone(),
            answer: keys,
        }
    }

    /// Whether `given` answers `prompt`
    ///
    /// Comparison ignores case and surrounding whitespace; motor sequences
    /// also ignore interior whitespace.
    pub fn check(prompt: &TaskPrompt, given: &str) -> bool {
        let given = given.trim().to_lowercase();
        let expected = prompt.answer.to_lowercase();
        match prompt.kind {
            TaskKind::Motor => {
                let given: String = given.chars().filter(|c| !c.is_whitespace()).collect();
                given == expected
            }
            TaskKind::NBack => match given.as_str() {
                "y" | "yes" => expected == "y",
                "n" | "no" => expected == "n",
                _ => false,
            },
            _ => given == expected,
        }
    }

    /// Reward credited for a task outcome
    pub fn reward_for(difficulty: u8, success: bool) -> f64 {
        if success {
            0.05 + 0.015 * f64::from(difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY))
        } else {
            0.0
        }
    }

    /// Score `given` and build the log entry for the attempt
    pub fn complete(prompt: &TaskPrompt, given: &str, started_at: DateTime<Utc>) -> TaskLog {
        let success = Self::check(prompt, given);
        TaskLog {
            id: Uuid::new_v4().to_string(),
            kind: prompt.kind,
            difficulty: prompt.difficulty,
            success,
            reward_delta: Self::reward_for(prompt.difficulty, success),
            started_at,
            completed_at: Some(Utc::now()),
        }
    }
}

fn breath(d: u8) -> TaskPrompt {
    let cycles = 2 + d / 3;
    TaskPrompt {
        kind: TaskKind::Breath,
        difficulty: d,
        instructions: "Breathe in 4, hold 4, out 4, hold 4. Count the cycles.".to_string(),
        question: format!("Complete {} box-breathing cycles, then enter the count.", cycles),
        answer: cycles.to_string(),
    }
}
