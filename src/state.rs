//! Application state: question store, evaluator, question generator and the
//! random source used for question picks.
//!
//! Everything here is built once before the listener starts. Only the RNG is
//! mutable, behind a mutex that is never held across an await.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::config::ServiceConfig;
use crate::domain::QuestionRecord;
use crate::logic::{Evaluator, QuestionGenerator};
use crate::model::ModelMode;
use crate::questions::{QuestionStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionStore>,
    pub evaluator: Evaluator,
    pub generator: QuestionGenerator,
    pub mode: ModelMode,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Build state from config: question bank, model mode, prompts, RNG.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        let questions = QuestionStore::with_bank(&cfg.file.questions);
        questions.log_inventory();

        let mode = ModelMode::from_settings(cfg.model.as_ref());
        info!(target: "airis_backend", live = mode.is_live(), mode = mode.label(), "Model connection state fixed for process lifetime");
        if let Some(seed) = cfg.question_seed {
            info!(target: "questions", seed, "Question selection seeded");
        }
        Self::new(questions, mode, cfg, cfg.question_seed)
    }

    pub fn new(questions: QuestionStore, mode: ModelMode, cfg: &ServiceConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            questions: Arc::new(questions),
            evaluator: Evaluator::new(mode.clone(), &cfg.file.prompts),
            generator: QuestionGenerator::new(mode.clone(), &cfg.file.prompts),
            mode,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn random_hr_question(&self) -> Result<QuestionRecord, StoreError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.questions.random_hr_question(&mut *rng)
    }

    pub fn random_technical_question(&self, technology: &str) -> Option<QuestionRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.questions.random_technical_question(technology, &mut *rng)
    }
}
