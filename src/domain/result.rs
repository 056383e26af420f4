//! Compiled test results and duration formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-question outcome, in session order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
  pub question_index: usize,
  pub question_text: String,
  /// Display form of the recorded answer, or `"Not answered"`.
  pub user_answer: String,
  /// Display form of the correct letter set, or `"Unknown"` when the
  /// question has no choice marked correct.
  pub correct_answer: String,
  pub is_correct: bool,
}

/// Produced once per completed session by the result compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
  pub score: usize,
  pub total: usize,
  /// score / total * 100, rounded to one decimal.
  pub percent: f64,
  /// `HH:MM:SS` form of `duration_seconds`.
  pub duration: String,
  pub duration_seconds: u64,
  pub date: DateTime<Utc>,
  pub details: Vec<AnswerDetail>,
}

impl TestResult {
  /// Pass verdict at the canonical threshold.
  pub fn passed(&self) -> bool {
    self.percent >= crate::config::PASS_THRESHOLD_PERCENT
  }

  /// One-decimal percent string, e.g. `"66.7"`.
  pub fn percent_display(&self) -> String {
    format!("{:.1}", self.percent)
  }
}

/// `HH:MM:SS`, hours zero-padded and unbounded.
pub fn format_hms(seconds: u64) -> String {
  let hrs = seconds / 3600;
  let mins = (seconds % 3600) / 60;
  let secs = seconds % 60;
  format!("{:02}:{:02}:{:02}", hrs, mins, secs)
}

/// Compact duration for history listings: `1h 2m 3s`, `2m 3s`, or `3s`.
pub fn format_compact(seconds: u64) -> String {
  let h = seconds / 3600;
  let m = (seconds % 3600) / 60;
  let s = seconds % 60;

  if h > 0 {
    format!("{}h {}m {}s", h, m, s)
  } else if m > 0 {
    format!("{}m {}s", m, s)
  } else {
    format!("{}s", s)
  }
}
