//! Domain models: question records, feedback sections and the feedback result.

use serde::{Deserialize, Serialize};

/// A single interview question as served to the candidate.
/// `category` is "HR" for behavioural questions, otherwise the technology name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
  #[serde(rename = "question")]
  pub text: String,
  pub category: String,
}

impl QuestionRecord {
  pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
    Self { text: text.into(), category: category.into() }
  }
}

/// Top-level interview categories, in the order they are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterviewType {
  Hr,
  Technical,
}

impl InterviewType {
  pub const ALL: [InterviewType; 2] = [InterviewType::Hr, InterviewType::Technical];

  pub fn as_str(&self) -> &'static str {
    match self {
      InterviewType::Hr => "HR",
      InterviewType::Technical => "Technical",
    }
  }

  /// Exact, case-sensitive match against the advertised names.
  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.as_str() == s)
  }
}

/// The three feedback buckets, in header-detection priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
  Strengths,
  Weaknesses,
  Suggestions,
}

impl Section {
  pub const PRIORITY: [Section; 3] = [Section::Strengths, Section::Weaknesses, Section::Suggestions];
}

/// Structured feedback for one answer. Every list is non-empty once it leaves the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
  pub strengths: Vec<String>,
  pub weaknesses: Vec<String>,
  pub suggestions: Vec<String>,
}

impl FeedbackResult {
  pub fn list_mut(&mut self, section: Section) -> &mut Vec<String> {
    match section {
      Section::Strengths => &mut self.strengths,
      Section::Weaknesses => &mut self.weaknesses,
      Section::Suggestions => &mut self.suggestions,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.strengths.is_empty() && self.weaknesses.is_empty() && self.suggestions.is_empty()
  }

  pub fn is_complete(&self) -> bool {
    !self.strengths.is_empty() && !self.weaknesses.is_empty() && !self.suggestions.is_empty()
  }
}
