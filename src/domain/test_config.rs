//! Test configuration: mode, question subset, ordering, timing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
  Practice,
  Timed,
  Flashcard,
}

impl TestMode {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "practice" => Some(Self::Practice),
      "timed" => Some(Self::Timed),
      "flashcard" => Some(Self::Flashcard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Practice => "practice",
      Self::Timed => "timed",
      Self::Flashcard => "flashcard",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSelection {
  Random,
  Range,
}

/// `Oldest` and `Original` both keep insertion order; only `Newest` reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  #[default]
  Original,
  Newest,
  Oldest,
}

/// Configuration submitted when starting a test. Serialized into persisted
/// results with camelCase keys, matching the stored record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
  pub mode: TestMode,
  pub question_selection: QuestionSelection,
  /// Number of questions for random selection, 1..=bank size.
  #[serde(default = "default_num_questions")]
  pub num_questions: usize,
  /// 1-based inclusive bounds for range selection.
  #[serde(default = "one")]
  pub range_from: usize,
  #[serde(default = "one")]
  pub range_to: usize,
  #[serde(default)]
  pub sort_order: SortOrder,
  #[serde(default)]
  pub shuffle_choices: bool,
  /// Only meaningful in timed mode.
  #[serde(default = "default_time_minutes")]
  pub time_minutes: u32,
  /// Flashcard display option; does not affect session generation.
  #[serde(default)]
  pub show_only_correct: bool,
  /// Filled in by the session generator; `None` on submission.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seed: Option<u64>,
}

fn default_num_questions() -> usize {
  crate::config::DEFAULT_QUESTION_COUNT
}

fn one() -> usize {
  1
}

fn default_time_minutes() -> u32 {
  crate::config::DEFAULT_TIME_MINUTES
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mode_roundtrip() {
    for mode in [TestMode::Practice, TestMode::Timed, TestMode::Flashcard] {
      assert_eq!(TestMode::from_str(mode.as_str()), Some(mode));
    }
    assert_eq!(TestMode::from_str("exam"), None);
    assert_eq!(TestMode::from_str(""), None);
  }

  #[test]
  fn test_config_deserializes_camel_case() {
    let json = r#"{
      "mode": "timed",
      "questionSelection": "range",
      "rangeFrom": 3,
      "rangeTo": 5,
      "sortOrder": "newest",
      "shuffleChoices": true,
      "timeMinutes": 30
    }"#;

    let config: TestConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.mode, TestMode::Timed);
    assert_eq!(config.question_selection, QuestionSelection::Range);
    assert_eq!(config.range_from, 3);
    assert_eq!(config.range_to, 5);
    assert_eq!(config.sort_order, SortOrder::Newest);
    assert!(config.shuffle_choices);
    assert_eq!(config.time_minutes, 30);
    assert!(config.seed.is_none());
  }

  #[test]
  fn test_config_defaults() {
    let json = r#"{ "mode": "practice", "questionSelection": "random" }"#;
    let config: TestConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.num_questions, crate::config::DEFAULT_QUESTION_COUNT);
    assert_eq!(config.sort_order, SortOrder::Original);
    assert!(!config.shuffle_choices);
    assert!(!config.show_only_correct);
  }

  #[test]
  fn test_mode_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&TestMode::Flashcard).unwrap(), "\"flashcard\"");
    assert_eq!(serde_json::to_string(&SortOrder::Oldest).unwrap(), "\"oldest\"");
  }
}
