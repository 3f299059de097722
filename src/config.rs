//! Service configuration: environment variables plus an optional TOML file
//! carrying prompt overrides and extra question bank entries.
//!
//! See `ServiceConfig`, `FileConfig` and `Prompts` for the expected schema.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";
pub const DEFAULT_MODEL: &str = "google/gemma-7b";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Contents of the file at INTERVIEW_CONFIG_PATH.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct FileConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub questions: Vec<BankEntry>,
}

/// Extra question accepted in TOML configuration.
/// `technology` is required unless `category` is "HR".
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BankEntry {
  pub text: String,
  pub category: String,
  #[serde(default)]
  pub technology: Option<String>,
}

/// Prompt templates sent to the model. `{question}`, `{answer}` and
/// `{technology}` are substituted before the call.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Prompts {
  pub evaluation_template: String,
  pub question_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      evaluation_template: "You are an expert interviewer evaluating a candidate's response to an interview question.\n\n\
Question: {question}\n\n\
Candidate's Answer: {answer}\n\n\
Provide constructive feedback on this interview answer using exactly these sections:\n\
**Strengths:** what was good about the answer\n\
**Weaknesses:** what could be improved\n\
**Suggestions:** specific suggestions for better responses\n\n\
List every point as a bullet starting with '-'. Keep your feedback concise but helpful.".into(),
      question_template: "You are an expert interviewer creating technical interview questions.\n\n\
Create one good technical interview question about {technology}.\n\n\
The question should be:\n\
- Relevant to {technology}\n\
- Appropriate for a mid-level developer\n\
- Test practical knowledge and understanding\n\
- Be clear and concise\n\n\
Return only the question text, nothing else.".into(),
    }
  }
}

/// Settings for the hosted text-generation endpoint. Only present when an API key is set.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSettings {
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
}

/// Everything read once at process start.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
  pub addr: SocketAddr,
  pub cors_origins: Vec<String>,
  pub question_seed: Option<u64>,
  pub model: Option<ModelSettings>,
  pub file: FileConfig,
}

impl ServiceConfig {
  /// Read configuration from the process environment (after `.env` has been loaded).
  pub fn from_env() -> Self {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  /// Build configuration from an arbitrary key lookup, so tests need not touch the real env.
  pub fn from_lookup<F>(get: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let host = get("HOST")
      .and_then(|h| h.parse::<IpAddr>().ok())
      .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = get("PORT")
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);

    let cors_origins = parse_origins(&get("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into()));

    let question_seed = get("QUESTION_SEED").and_then(|s| match s.trim().parse::<u64>() {
      Ok(seed) => Some(seed),
      Err(e) => {
        warn!(target: "airis_backend", value = %s, error = %e, "Ignoring invalid QUESTION_SEED");
        None
      }
    });

    let model = get("NVIDIA_API_KEY")
      .filter(|k| !k.trim().is_empty())
      .map(|api_key| ModelSettings {
        api_key,
        base_url: get("NVIDIA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        model: get("NVIDIA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
        temperature: get("MODEL_TEMPERATURE")
          .and_then(|t| t.parse::<f32>().ok())
          .unwrap_or(DEFAULT_TEMPERATURE),
      });

    let file = get("INTERVIEW_CONFIG_PATH")
      .and_then(|path| load_file_config(&path))
      .unwrap_or_default();

    Self {
      addr: SocketAddr::new(host, port),
      cors_origins,
      question_seed,
      model,
      file,
    }
  }
}

fn parse_origins(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

/// Attempt to load `FileConfig` from `path`. On any parsing/IO error, returns None.
pub fn load_file_config(path: &str) -> Option<FileConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<FileConfig>(&s) {
      Ok(cfg) => {
        info!(target: "airis_backend", %path, extra_questions = cfg.questions.len(), "Loaded interview config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "airis_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "airis_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k| map.get(k).cloned()
  }

  #[test]
  fn defaults_without_env() {
    let cfg = ServiceConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg.addr.port(), DEFAULT_PORT);
    assert!(cfg.model.is_none());
    assert_eq!(cfg.question_seed, None);
    assert_eq!(cfg.cors_origins, vec!["http://localhost:3000", "http://127.0.0.1:3000"]);
    assert_eq!(cfg.file.prompts, Prompts::default());
  }

  #[test]
  fn api_key_enables_model_settings() {
    let cfg = ServiceConfig::from_lookup(lookup(&[
      ("NVIDIA_API_KEY", "secret"),
      ("NVIDIA_MODEL", "meta/llama3-8b-instruct"),
      ("MODEL_TEMPERATURE", "0.2"),
      ("PORT", "9000"),
      ("QUESTION_SEED", "42"),
    ]));
    let model = cfg.model.expect("model settings");
    assert_eq!(model.api_key, "secret");
    assert_eq!(model.base_url, DEFAULT_BASE_URL);
    assert_eq!(model.model, "meta/llama3-8b-instruct");
    assert!((model.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(cfg.addr.port(), 9000);
    assert_eq!(cfg.question_seed, Some(42));
  }

  #[test]
  fn blank_api_key_means_mock_mode() {
    let cfg = ServiceConfig::from_lookup(lookup(&[("NVIDIA_API_KEY", "  ")]));
    assert!(cfg.model.is_none());
  }

  #[test]
  fn toml_overrides_prompts_and_adds_questions() {
    let src = r#"
      [prompts]
      question_template = "One question on {technology}, please."

      [[questions]]
      text = "Describe a conflict you resolved"
      category = "HR"

      [[questions]]
      text = "What is a closure?"
      category = "JavaScript"
      technology = "JavaScript"
    "#;
    let cfg: FileConfig = toml::from_str(src).unwrap();
    assert_eq!(cfg.prompts.question_template, "One question on {technology}, please.");
    assert_eq!(cfg.prompts.evaluation_template, Prompts::default().evaluation_template);
    assert_eq!(cfg.questions.len(), 2);
    assert_eq!(cfg.questions[1].technology.as_deref(), Some("JavaScript"));
  }

  #[test]
  fn missing_config_file_is_ignored() {
    assert!(load_file_config("/nonexistent/airis.toml").is_none());
  }
}
