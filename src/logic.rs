//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Evaluating answers (model reply piped through the feedback parser, or mock feedback)
//!   - Generating a question for a technology (model, or canned/templated fallback)
//!
//! Both operations are total: model failures are absorbed here and never reach the caller.

use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::FeedbackResult;
use crate::feedback::{FeedbackParser, SectionMarkers};
use crate::model::ModelMode;
use crate::seeds::{fallback_question, mock_feedback, mock_question};
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone, Debug)]
pub struct Evaluator {
  mode: ModelMode,
  template: String,
  parser: FeedbackParser,
}

impl Evaluator {
  pub fn new(mode: ModelMode, prompts: &Prompts) -> Self {
    Self::with_parser(mode, prompts, FeedbackParser::new(SectionMarkers::default()))
  }

  pub fn with_parser(mode: ModelMode, prompts: &Prompts, parser: FeedbackParser) -> Self {
    Self { mode, template: prompts.evaluation_template.clone(), parser }
  }

  pub fn prompt_for(&self, question: &str, answer: &str) -> String {
    fill_template(&self.template, &[("question", question), ("answer", answer)])
  }

  #[instrument(level = "info", skip(self, question, answer), fields(mode = self.mode.label(), question_len = question.len(), answer_len = answer.len()))]
  pub async fn evaluate(&self, question: &str, answer: &str) -> FeedbackResult {
    let ModelMode::Live(model) = &self.mode else {
      info!(target: "evaluation", "Using mock evaluation response");
      return mock_feedback();
    };

    let prompt = self.prompt_for(question, answer);
    match model.generate(&prompt).await {
      Ok(reply) => {
        info!(target: "evaluation", reply_len = reply.len(), preview = %trunc_for_log(&reply, 60), "Model evaluation received");
        let feedback = self.parser.parse(&reply);
        debug_assert!(feedback.is_complete());
        feedback
      }
      Err(e) => {
        error!(target: "evaluation", error = %e, "Model evaluation failed; returning error feedback");
        error_feedback(&e.to_string())
      }
    }
  }
}

/// Feedback that reports a failed model call instead of judging the answer.
pub fn error_feedback(detail: &str) -> FeedbackResult {
  FeedbackResult {
    strengths: vec!["Unable to evaluate due to error".into()],
    weaknesses: vec![format!("Error: {}", detail)],
    suggestions: vec!["Please try again".into()],
  }
}

#[derive(Clone, Debug)]
pub struct QuestionGenerator {
  mode: ModelMode,
  template: String,
}

impl QuestionGenerator {
  pub fn new(mode: ModelMode, prompts: &Prompts) -> Self {
    Self { mode, template: prompts.question_template.clone() }
  }

  pub fn prompt_for(&self, technology: &str) -> String {
    fill_template(&self.template, &[("technology", technology)])
  }

  #[instrument(level = "info", skip(self), fields(mode = self.mode.label()))]
  pub async fn generate_question(&self, technology: &str) -> String {
    let ModelMode::Live(model) = &self.mode else {
      return mock_question(technology)
        .map(str::to_string)
        .unwrap_or_else(|| fallback_question(technology));
    };

    match model.generate(&self.prompt_for(technology)).await {
      Ok(q) => {
        let q = q.trim();
        if q.is_empty() {
          fallback_question(technology)
        } else {
          q.to_string()
        }
      }
      Err(e) => {
        error!(target: "questions", %technology, error = %e, "Model question generation failed; using template");
        fallback_question(technology)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  use async_trait::async_trait;

  use crate::feedback::SUGGESTIONS_PLACEHOLDER;
  use crate::model::{ModelError, TextGenerator};

  /// Replies with a fixed result and records the prompts it was given.
  struct Scripted {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
  }

  impl Scripted {
    fn ok(reply: &str) -> Arc<Self> {
      Arc::new(Self { reply: Ok(reply.into()), prompts: Mutex::new(vec![]) })
    }
    fn failing(status: u16) -> Arc<Self> {
      Arc::new(Self { reply: Err(status), prompts: Mutex::new(vec![]) })
    }
  }

  #[async_trait]
  impl TextGenerator for Scripted {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
      self.prompts.lock().unwrap().push(prompt.to_string());
      match &self.reply {
        Ok(s) => Ok(s.clone()),
        Err(status) => Err(ModelError::Api { status: *status, message: "upstream unavailable".into() }),
      }
    }
  }

  #[tokio::test]
  async fn mock_evaluation_is_fixed() {
    let ev = Evaluator::new(ModelMode::Mock, &Prompts::default());
    for (q, a) in [("Tell me about yourself", "I am a developer"), ("", ""), ("?", "ünïcode")] {
      assert_eq!(ev.evaluate(q, a).await, mock_feedback());
    }
  }

  #[tokio::test]
  async fn live_evaluation_parses_reply_and_embeds_inputs() {
    let model = Scripted::ok("**Strengths:**\n- Clear\n**Weaknesses:**\n- Vague\n**Suggestions:**\n- Add examples");
    let ev = Evaluator::new(ModelMode::Live(model.clone()), &Prompts::default());
    let fb = ev.evaluate("Explain decorators", "They wrap functions").await;
    assert_eq!(fb.strengths, vec!["Clear"]);
    assert_eq!(fb.weaknesses, vec!["Vague"]);
    assert_eq!(fb.suggestions, vec!["Add examples"]);

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: Explain decorators"));
    assert!(prompts[0].contains("Candidate's Answer: They wrap functions"));
  }

  #[tokio::test]
  async fn live_evaluation_fills_missing_sections() {
    let model = Scripted::ok("Strengths:\n- Friendly tone");
    let ev = Evaluator::new(ModelMode::Live(model), &Prompts::default());
    let fb = ev.evaluate("q", "a").await;
    assert_eq!(fb.strengths, vec!["Friendly tone"]);
    assert_eq!(fb.suggestions, vec![SUGGESTIONS_PLACEHOLDER]);
    assert!(fb.is_complete());
  }

  #[tokio::test]
  async fn failed_evaluation_reports_error() {
    let ev = Evaluator::new(ModelMode::Live(Scripted::failing(503)), &Prompts::default());
    let fb = ev.evaluate("q", "a").await;
    assert_eq!(fb.strengths, vec!["Unable to evaluate due to error"]);
    assert_eq!(fb.weaknesses, vec!["Error: API error (status 503): upstream unavailable"]);
    assert_eq!(fb.suggestions, vec!["Please try again"]);
  }

  #[tokio::test]
  async fn mock_generation_uses_table_then_template() {
    let gen = QuestionGenerator::new(ModelMode::Mock, &Prompts::default());
    let py = gen.generate_question("Python").await;
    assert!(py.contains("Python"));
    assert_eq!(py, mock_question("Python").unwrap());

    let unknown = gen.generate_question("UnknownTech").await;
    assert_eq!(unknown, "What are the key concepts and best practices in UnknownTech?");
  }

  #[tokio::test]
  async fn live_generation_trims_reply() {
    let model = Scripted::ok("  What does the borrow checker prevent?\n");
    let gen = QuestionGenerator::new(ModelMode::Live(model.clone()), &Prompts::default());
    assert_eq!(gen.generate_question("Rust").await, "What does the borrow checker prevent?");
    assert!(model.prompts.lock().unwrap()[0].contains("technical interview question about Rust"));
  }

  #[tokio::test]
  async fn failed_generation_falls_back_silently() {
    let gen = QuestionGenerator::new(ModelMode::Live(Scripted::failing(500)), &Prompts::default());
    assert_eq!(gen.generate_question("Python").await, fallback_question("Python"));
  }

  #[test]
  fn custom_templates_are_used() {
    let prompts = Prompts {
      evaluation_template: "{question}|{answer}".into(),
      question_template: "Ask about {technology}".into(),
    };
    assert_eq!(Evaluator::new(ModelMode::Mock, &prompts).prompt_for("q", "a"), "q|a");
    assert_eq!(QuestionGenerator::new(ModelMode::Mock, &prompts).prompt_for("SQL"), "Ask about SQL");
  }
}
