//! Read-only question store: HR questions plus technical questions keyed by technology.
//!
//! Built once at startup from the built-in seeds and optional TOML bank entries,
//! never mutated afterwards. Random picks take a caller-supplied `Rng` so tests
//! can seed the selection.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BankEntry;
use crate::domain::{InterviewType, QuestionRecord};
use crate::seeds::{seed_hr_questions, seed_technical_questions};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
  #[error("no questions available for category '{category}'")]
  Empty { category: String },
}

#[derive(Clone, Debug, Default)]
pub struct QuestionStore {
  hr: Vec<QuestionRecord>,
  // Vec keeps declaration order for listing.
  technical: Vec<(String, Vec<QuestionRecord>)>,
}

impl QuestionStore {
  pub fn new(hr: Vec<QuestionRecord>, technical: Vec<(String, Vec<QuestionRecord>)>) -> Self {
    Self { hr, technical }
  }

  /// Built-in dataset only.
  pub fn builtin() -> Self {
    Self::new(seed_hr_questions(), seed_technical_questions())
  }

  /// Built-in dataset followed by the configured bank entries.
  pub fn with_bank(entries: &[BankEntry]) -> Self {
    let mut store = Self::builtin();
    for entry in entries {
      store.add_entry(entry);
    }
    store
  }

  fn add_entry(&mut self, entry: &BankEntry) {
    let text = entry.text.trim();
    if text.is_empty() {
      warn!(target: "questions", category = %entry.category, "Skipping bank item: empty text.");
      return;
    }
    if entry.category == InterviewType::Hr.as_str() {
      self.hr.push(QuestionRecord::new(text, entry.category.clone()));
      return;
    }
    let Some(tech) = entry.technology.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
      warn!(target: "questions", category = %entry.category, "Skipping bank item: missing technology.");
      return;
    };
    if entry.category != tech {
      warn!(target: "questions", category = %entry.category, technology = %tech, "Bank item category differs from technology; using technology.");
    }
    let record = QuestionRecord::new(text, tech);
    match self.technical.iter_mut().find(|(name, _)| name == tech) {
      Some((_, list)) => list.push(record),
      None => self.technical.push((tech.to_string(), vec![record])),
    }
  }

  /// Top-level interview type names, in declaration order.
  pub fn list_types(&self) -> Vec<String> {
    InterviewType::ALL.iter().map(|t| t.as_str().to_string()).collect()
  }

  /// Technology names under the technical category, in declaration order.
  pub fn list_technologies(&self) -> Vec<String> {
    self.technical.iter().map(|(name, _)| name.clone()).collect()
  }

  /// Uniform pick from the HR list.
  pub fn random_hr_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<QuestionRecord, StoreError> {
    self.hr.choose(rng).cloned().ok_or_else(|| StoreError::Empty {
      category: InterviewType::Hr.as_str().to_string(),
    })
  }

  /// Uniform pick for `technology`. `None` when the technology is unknown or has no questions.
  pub fn random_technical_question<R: Rng + ?Sized>(&self, technology: &str, rng: &mut R) -> Option<QuestionRecord> {
    self
      .technical
      .iter()
      .find(|(name, _)| name == technology)
      .and_then(|(_, list)| list.choose(rng).cloned())
  }

  pub fn log_inventory(&self) {
    info!(target: "questions", category = "HR", count = self.hr.len(), "Startup question inventory");
    for (tech, list) in &self.technical {
      info!(target: "questions", category = "Technical", technology = %tech, count = list.len(), "Startup question inventory");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn lists_types_and_technologies_in_order() {
    let store = QuestionStore::builtin();
    assert_eq!(store.list_types(), vec!["HR", "Technical"]);
    assert_eq!(store.list_technologies(), vec!["Python", "FastAPI"]);
  }

  #[test]
  fn hr_pick_has_hr_category() {
    let store = QuestionStore::builtin();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      let q = store.random_hr_question(&mut rng).unwrap();
      assert_eq!(q.category, "HR");
      assert!(seed_hr_questions().contains(&q));
    }
  }

  #[test]
  fn technical_pick_matches_technology() {
    let store = QuestionStore::builtin();
    let mut rng = StdRng::seed_from_u64(1);
    for tech in store.list_technologies() {
      for _ in 0..10 {
        let q = store.random_technical_question(&tech, &mut rng).unwrap();
        assert_eq!(q.category, tech);
      }
    }
  }

  #[test]
  fn unknown_technology_is_absent() {
    let store = QuestionStore::builtin();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(store.random_technical_question("NotARealTech", &mut rng).is_none());
    assert!(store.random_technical_question("python", &mut rng).is_none());
    assert!(store.random_technical_question("", &mut rng).is_none());
  }

  #[test]
  fn empty_hr_list_is_an_error() {
    let store = QuestionStore::new(vec![], seed_technical_questions());
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
      store.random_hr_question(&mut rng),
      Err(StoreError::Empty { category: "HR".into() })
    );
  }

  #[test]
  fn same_seed_same_pick() {
    let store = QuestionStore::builtin();
    let a = store.random_hr_question(&mut StdRng::seed_from_u64(99)).unwrap();
    let b = store.random_hr_question(&mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn bank_entries_extend_store() {
    let entries = vec![
      BankEntry { text: "Describe a conflict you resolved".into(), category: "HR".into(), technology: None },
      BankEntry { text: "What is a closure?".into(), category: "JavaScript".into(), technology: Some("JavaScript".into()) },
      BankEntry { text: "Explain generators".into(), category: "Python".into(), technology: Some("Python".into()) },
      BankEntry { text: "orphan".into(), category: "Go".into(), technology: None },
      BankEntry { text: "   ".into(), category: "HR".into(), technology: None },
    ];
    let store = QuestionStore::with_bank(&entries);
    assert_eq!(store.list_technologies(), vec!["Python", "FastAPI", "JavaScript"]);
    assert_eq!(store.hr.len(), 4);
    assert_eq!(store.technical[0].1.len(), 4);
    let mut rng = StdRng::seed_from_u64(3);
    let js = store.random_technical_question("JavaScript", &mut rng).unwrap();
    assert_eq!(js, QuestionRecord::new("What is a closure?", "JavaScript"));
  }

  #[test]
  fn bank_entry_category_follows_technology() {
    let entries = vec![BankEntry {
      text: "What is the GIL?".into(),
      category: "Backend".into(),
      technology: Some("Python".into()),
    }];
    let store = QuestionStore::with_bank(&entries);
    assert_eq!(store.list_technologies(), vec!["Python", "FastAPI"]);
    assert!(store.technical[0].1.contains(&QuestionRecord::new("What is the GIL?", "Python")));
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
      let q = store.random_technical_question("Python", &mut rng).unwrap();
      assert_eq!(q.category, "Python");
    }
  }
}
