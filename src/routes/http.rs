//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::domain::InterviewType;
use crate::error::ApiError;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info")]
pub async fn http_root() -> impl IntoResponse {
  Json(WelcomeOut { message: "Welcome to AIRIS - AI Interview Practice System" })
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, mode: state.mode.label() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_interview_types(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TypesOut { types: state.questions.list_types() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_technologies(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TechnologiesOut { technologies: state.questions.list_technologies() })
}

#[instrument(level = "info", skip(state, body), fields(kind = %body.kind))]
pub async fn http_select_type(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TypeSelectionIn>,
) -> Result<Json<TypeSelectionOut>, ApiError> {
  match InterviewType::parse(&body.kind) {
    Some(InterviewType::Hr) => {
      let q = state.random_hr_question()?;
      info!(target: "questions", question = %trunc_for_log(&q.text, 40), "HR question served");
      Ok(Json(TypeSelectionOut::Question {
        kind: InterviewType::Hr.as_str().into(),
        question: q.text,
        category: q.category,
      }))
    }
    Some(InterviewType::Technical) => Ok(Json(TypeSelectionOut::Technologies {
      kind: InterviewType::Technical.as_str().into(),
      technologies: state.questions.list_technologies(),
    })),
    None => Err(ApiError::InvalidInterviewType(body.kind)),
  }
}

#[instrument(level = "info", skip(state, body), fields(technology = %body.technology))]
pub async fn http_select_technology(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TechnologyIn>,
) -> Result<Json<TechnologyQuestionOut>, ApiError> {
  let Some(q) = state.random_technical_question(&body.technology) else {
    return Err(ApiError::InvalidTechnology(body.technology));
  };
  info!(target: "questions", technology = %body.technology, question = %trunc_for_log(&q.text, 40), "Technical question served");
  Ok(Json(TechnologyQuestionOut { technology: body.technology, question: q.text, category: q.category }))
}

#[instrument(level = "info", skip(state, body), fields(technology = %body.technology))]
pub async fn http_generate_question(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TechnologyIn>,
) -> impl IntoResponse {
  let question = state.generator.generate_question(&body.technology).await;
  Json(GeneratedQuestionOut { technology: body.technology, question })
}

#[instrument(level = "info", skip(state, body), fields(interview_type = ?body.interview_type, technology = ?body.technology, answer_len = body.answer.len()))]
pub async fn http_evaluate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EvaluationIn>,
) -> impl IntoResponse {
  let feedback = state.evaluator.evaluate(&body.question, &body.answer).await;
  info!(
    target: "evaluation",
    strengths = feedback.strengths.len(),
    weaknesses = feedback.weaknesses.len(),
    suggestions = feedback.suggestions.len(),
    "HTTP evaluate served"
  );
  Json(feedback)
}
