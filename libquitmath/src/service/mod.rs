//! Collaborators of the state store
//!
//! The account service, task content, the numeric models and the eco
//! calculator. None of them hold the store; their results reach it as
//! actions sent through [`events::ActionSender`].

pub mod auth;
pub mod eco;
pub mod events;
pub mod markov;
pub mod ode;
pub mod scheduler;
pub mod sessions;
pub mod tasks;

use crate::config::Config;

pub use auth::{AccessToken, AccountInfo, AccountService, AuthConfig};
pub use eco::{EcoBreakdown, EcoCoefficients, EcoImpactService};
pub use events::{ActionReceiver, ActionSender};
pub use markov::{DailyMarkovModel, MarkovParams, TransitionProbabilities};
pub use ode::{CravingOdeEngine, OdeParams, OdePoint, SimulationRequest};
pub use scheduler::{SchedulerConfig, TaskScheduler};
pub use sessions::SessionSummarizer;
pub use tasks::{TaskPrompt, TaskProvider};

/// All collaborators, configured from one `Config`
pub struct QuitMathService {
    accounts: AccountService,
    tasks: TaskProvider,
    ode: CravingOdeEngine,
    markov: DailyMarkovModel,
    scheduler: TaskScheduler,
    eco: EcoImpactService,
    sessions: SessionSummarizer,
}

impl QuitMathService {
    pub fn from_config(config: &Config) -> Self {
        let markov = DailyMarkovModel::new(config.markov);
        Self {
            accounts: AccountService::new(config.auth),
            tasks: TaskProvider::new(),
            ode: CravingOdeEngine::new(config.ode),
            scheduler: TaskScheduler::new(config.ode, config.scheduler),
            eco: EcoImpactService::new(config.eco),
            sessions: SessionSummarizer::new(markov.clone()),
            markov,
        }
    }

    /// Replace the task generator, e.g. with a seeded one
    pub fn with_task_provider(mut self, tasks: TaskProvider) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut AccountService {
        &mut self.accounts
    }

    pub fn tasks_mut(&mut self) -> &mut TaskProvider {
        &mut self.tasks
    }

    pub fn ode(&self) -> &CravingOdeEngine {
        &self.ode
    }

    pub fn markov(&self) -> &DailyMarkovModel {
        &self.markov
    }

    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }

    pub fn eco(&self) -> &EcoImpactService {
        &self.eco
    }

    pub fn sessions(&self) -> &SessionSummarizer {
        &self.sessions
    }
}

impl Default for QuitMathService {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
