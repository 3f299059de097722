//! Built-in content that keeps the service useful without a config file or a model:
//! the question dataset, the fixed mock feedback and the mock question table.

use crate::domain::{FeedbackResult, QuestionRecord};

/// Behavioural questions offered under the "HR" interview type.
pub fn seed_hr_questions() -> Vec<QuestionRecord> {
  vec![
    QuestionRecord::new("Tell me about yourself", "HR"),
    QuestionRecord::new("Why do you want to work for our company?", "HR"),
    QuestionRecord::new("What are your strengths and weaknesses?", "HR"),
  ]
}

/// Technical questions grouped by technology, in the order technologies are listed.
pub fn seed_technical_questions() -> Vec<(String, Vec<QuestionRecord>)> {
  vec![
    (
      "Python".into(),
      vec![
        QuestionRecord::new("What is the difference between a list and a tuple in Python?", "Python"),
        QuestionRecord::new("Explain Python decorators", "Python"),
        QuestionRecord::new("What are lambda functions in Python?", "Python"),
      ],
    ),
    (
      "FastAPI".into(),
      vec![
        QuestionRecord::new("What is FastAPI and why is it used?", "FastAPI"),
        QuestionRecord::new("How do you handle request validation in FastAPI?", "FastAPI"),
        QuestionRecord::new("Explain dependency injection in FastAPI", "FastAPI"),
      ],
    ),
  ]
}

/// Feedback returned verbatim in mock mode.
pub fn mock_feedback() -> FeedbackResult {
  FeedbackResult {
    strengths: vec![
      "Clear and concise response".into(),
      "Shows basic understanding of the topic".into(),
      "Good structure and organization".into(),
    ],
    weaknesses: vec![
      "Could provide more specific examples".into(),
      "Lacks technical depth in some areas".into(),
    ],
    suggestions: vec![
      "Add concrete examples from your experience".into(),
      "Include technical details and best practices".into(),
      "Consider the broader context and implications".into(),
    ],
  }
}

/// Canned generated questions used in mock mode.
pub fn mock_question(technology: &str) -> Option<&'static str> {
  let q = match technology {
    "Python" => "Explain the difference between lists and tuples in Python, and when would you use each?",
    "FastAPI" => "How do you handle authentication and authorization in a FastAPI application?",
    "JavaScript" => "What is the difference between var, let, and const in JavaScript?",
    "React" => "Explain the component lifecycle methods in React and their use cases.",
    "SQL" => "What are the different types of JOINs in SQL and when would you use each?",
    "Docker" => "How do you optimize a Docker image for production deployment?",
    _ => return None,
  };
  Some(q)
}

/// Generic question for technologies without a canned entry, also used when the model fails.
pub fn fallback_question(technology: &str) -> String {
  format!("What are the key concepts and best practices in {}?", technology)
}
