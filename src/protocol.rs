//! Public request/response structs for the HTTP endpoints (serde ready).
//! Field names match what the browser client sends and reads.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct WelcomeOut {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub mode: &'static str,
}

#[derive(Serialize)]
pub struct TypesOut {
    pub types: Vec<String>,
}

#[derive(Serialize)]
pub struct TechnologiesOut {
    pub technologies: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSelectionIn {
    #[serde(rename = "type")]
    pub kind: String,
}

/// HR selection returns a question straight away; Technical returns the technology list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TypeSelectionOut {
    Question {
        #[serde(rename = "type")]
        kind: String,
        question: String,
        category: String,
    },
    Technologies {
        #[serde(rename = "type")]
        kind: String,
        technologies: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct TechnologyIn {
    pub technology: String,
}

#[derive(Debug, Serialize)]
pub struct TechnologyQuestionOut {
    pub technology: String,
    pub question: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedQuestionOut {
    pub technology: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluationIn {
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    pub question: String,
    pub answer: String,
}
