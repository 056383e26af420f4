//! Question bank data model and its wire (de)serialization.
//!
//! Field names follow the import file format: snake_case keys, with the
//! community-voting payload kept as an opaque string under `correct_answer`.

use serde::{Deserialize, Serialize};

/// One answer choice. `letter` values are unique within a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
  pub letter: String,
  pub content: String,
  #[serde(default)]
  pub is_correct: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub has_images: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMeta {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explain: Option<String>,
}

/// A question as loaded from the bank file. Immutable once loaded; session
/// generation works on snapshots, never on the bank entries themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  pub text: String,
  pub choices: Vec<Choice>,
  /// String-encoded JSON array of `{voted_answers, vote_count,
  /// is_most_voted}` community votes. Opaque to the engine.
  #[serde(default, rename = "correct_answer", skip_serializing_if = "Option::is_none")]
  pub correct_answer_raw: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub question_images: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta: Option<QuestionMeta>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exam_code: Option<String>,
}

/// Validated questions in insertion order from the source file.
pub type QuestionBank = Vec<Question>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_minimal_question() {
    let json = r#"{
      "text": "What is 2 + 2?",
      "choices": [
        { "letter": "A.", "content": "3", "is_correct": false },
        { "letter": "B.", "content": "4", "is_correct": true }
      ]
    }"#;

    let q: Question = serde_json::from_str(json).unwrap();
    assert_eq!(q.text, "What is 2 + 2?");
    assert_eq!(q.choices.len(), 2);
    assert!(q.choices[1].is_correct);
    assert!(q.url.is_none());
    assert!(q.correct_answer_raw.is_none());
  }

  #[test]
  fn test_deserialize_full_question() {
    let json = r#"{
      "url": "https://www.example.com/question-1",
      "text": "Sample?",
      "choices": [
        { "letter": "A.", "content": "Yes", "is_correct": true, "has_images": false, "images": [] }
      ],
      "correct_answer": "[{\"voted_answers\": \"A\", \"vote_count\": 10, \"is_most_voted\": true}]",
      "correct_content": "Because.",
      "question_images": ["https://example.com/img.png"],
      "meta": { "explain": "An explanation." },
      "exam_code": "SAMPLE-001"
    }"#;

    let q: Question = serde_json::from_str(json).unwrap();
    assert_eq!(q.url.as_deref(), Some("https://www.example.com/question-1"));
    assert!(q.correct_answer_raw.as_deref().unwrap().contains("voted_answers"));
    assert_eq!(q.meta.unwrap().explain.as_deref(), Some("An explanation."));
    assert_eq!(q.exam_code.as_deref(), Some("SAMPLE-001"));
  }

  #[test]
  fn test_missing_is_correct_defaults_false() {
    let json = r#"{ "letter": "A.", "content": "option" }"#;
    let c: Choice = serde_json::from_str(json).unwrap();
    assert!(!c.is_correct);
  }

  #[test]
  fn test_serialization_roundtrip_keeps_wire_names() {
    let q = Question {
      url: Some("u".into()),
      text: "t".into(),
      choices: vec![Choice {
        letter: "A.".into(),
        content: "c".into(),
        is_correct: true,
        has_images: None,
        images: None,
      }],
      correct_answer_raw: Some("[]".into()),
      correct_content: None,
      question_images: None,
      meta: None,
      exam_code: None,
    };

    let value = serde_json::to_value(&q).unwrap();
    assert!(value.get("correct_answer").is_some());
    assert!(value.get("correct_answer_raw").is_none());
    assert!(value.get("correct_content").is_none());
  }
}
