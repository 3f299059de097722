//! Turns a model's free-form review into strengths / weaknesses / suggestions.
//!
//! Line-oriented heuristic:
//! 1) blank lines are skipped;
//! 2) a line containing a section marker (case-insensitive) switches the active section
//!    and contributes nothing itself;
//! 3) inside a section, lines starting with `*` or `-` are collected without the marker;
//! 4) any other line is dropped.
//!
//! If nothing was collected at all, the whole text becomes the single suggestion.
//! Otherwise each empty list gets its own placeholder, so no list is ever empty.

use tracing::{debug, warn};

use crate::domain::{FeedbackResult, Section};

pub const PARSE_FAILED_STRENGTH: &str = "AI evaluation completed";
pub const PARSE_FAILED_WEAKNESS: &str = "See suggestions for details";
pub const EMPTY_REPLY_SUGGESTION: &str = "No feedback text was returned; please try again";

pub const STRENGTHS_PLACEHOLDER: &str = "Answer shows basic understanding";
pub const WEAKNESSES_PLACEHOLDER: &str = "Could provide more technical details";
pub const SUGGESTIONS_PLACEHOLDER: &str = "Consider adding specific examples and technical depth";

const BULLETS: [char; 2] = ['*', '-'];

pub fn placeholder(section: Section) -> &'static str {
  match section {
    Section::Strengths => STRENGTHS_PLACEHOLDER,
    Section::Weaknesses => WEAKNESSES_PLACEHOLDER,
    Section::Suggestions => SUGGESTIONS_PLACEHOLDER,
  }
}

/// Section -> marker substrings. Markers are stored lowercase and checked in
/// `Section::PRIORITY` order, so a line matching two sections goes to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionMarkers {
  entries: Vec<(Section, Vec<String>)>,
}

impl Default for SectionMarkers {
  fn default() -> Self {
    Self::new([
      (Section::Strengths, vec!["strengths:", "what was good"]),
      (Section::Weaknesses, vec!["weaknesses:", "what could be improved", "areas for improvement"]),
      (Section::Suggestions, vec!["suggestions"]),
    ])
  }
}

impl SectionMarkers {
  pub fn new<I, S>(entries: I) -> Self
  where
    I: IntoIterator<Item = (Section, Vec<S>)>,
    S: AsRef<str>,
  {
    let mut entries: Vec<(Section, Vec<String>)> = entries
      .into_iter()
      .map(|(section, markers)| {
        let markers = markers
          .iter()
          .map(|m| m.as_ref().trim().to_lowercase())
          .filter(|m| !m.is_empty())
          .collect();
        (section, markers)
      })
      .collect();
    entries.sort_by_key(|(section, _)| Section::PRIORITY.iter().position(|s| s == section));
    Self { entries }
  }

  /// The section whose header this line is, if any.
  pub fn detect(&self, line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    self
      .entries
      .iter()
      .find(|(_, markers)| markers.iter().any(|m| lower.contains(m.as_str())))
      .map(|(section, _)| *section)
  }
}

#[derive(Clone, Debug, Default)]
pub struct FeedbackParser {
  markers: SectionMarkers,
}

impl FeedbackParser {
  pub fn new(markers: SectionMarkers) -> Self {
    Self { markers }
  }

  pub fn parse(&self, raw: &str) -> FeedbackResult {
    let text = raw.trim();
    let mut result = FeedbackResult::default();
    let mut current: Option<Section> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
      if let Some(section) = self.markers.detect(line) {
        current = Some(section);
        continue;
      }
      let Some(section) = current else { continue };
      if let Some(rest) = line.strip_prefix(&BULLETS[..]).map(str::trim) {
        if !rest.is_empty() {
          result.list_mut(section).push(rest.to_string());
        }
      }
    }

    if result.is_empty() {
      warn!(target: "evaluation", text_len = text.len(), "Failed to parse model feedback, using whole reply as suggestion");
      let suggestion = if text.is_empty() { EMPTY_REPLY_SUGGESTION.to_string() } else { text.to_string() };
      return FeedbackResult {
        strengths: vec![PARSE_FAILED_STRENGTH.into()],
        weaknesses: vec![PARSE_FAILED_WEAKNESS.into()],
        suggestions: vec![suggestion],
      };
    }

    for section in Section::PRIORITY {
      let list = result.list_mut(section);
      if list.is_empty() {
        debug!(target: "evaluation", ?section, "Section missing from model feedback, inserting placeholder");
        list.push(placeholder(section).to_string());
      }
    }
    result
  }
}
