//! Result compilation.
//!
//! Pure given its inputs: walks every session question in order, grades the
//! recorded answer (absent = incorrect), and aggregates. Safe to call
//! speculatively for a preview as well as at final submission.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::domain::{AnswerDetail, TestResult, format_hms};
use crate::engine::generator::TestSession;
use crate::engine::scoring::{Answer, correct_letters, grade};

pub fn compile(
  session: &TestSession,
  answers: &BTreeMap<usize, Answer>,
  elapsed_seconds: u64,
) -> TestResult {
  let mut score = 0;

  let details: Vec<AnswerDetail> = session
    .questions
    .iter()
    .enumerate()
    .map(|(idx, q)| {
      let answer = answers.get(&idx);
      let is_correct = grade(q, answer);
      if is_correct {
        score += 1;
      }

      let user_answer = answer
        .map(|a| a.display())
        .unwrap_or_else(|| "Not answered".to_string());

      let correct = correct_letters(q);
      let correct_answer = if correct.is_empty() {
        "Unknown".to_string()
      } else {
        correct.into_iter().collect::<Vec<_>>().join(", ")
      };

      AnswerDetail {
        question_index: idx,
        question_text: q.text.clone(),
        user_answer,
        correct_answer,
        is_correct,
      }
    })
    .collect();

  let total = session.questions.len();
  let percent = if total == 0 {
    0.0
  } else {
    (score as f64 / total as f64 * 1000.0).round() / 10.0
  };

  TestResult {
    score,
    total,
    percent,
    duration: format_hms(elapsed_seconds),
    duration_seconds: elapsed_seconds,
    date: Utc::now(),
    details,
  }
}
