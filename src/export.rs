//! Markdown result export and the downloadable bank template.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use std::fmt::Write;

use crate::domain::{TestConfig, TestResult};

pub const TEMPLATE_FILE_NAME: &str = "quiz_template.json";

/// Render a completed result as a markdown report. The layout is stable;
/// saved reports are diffable across runs.
pub fn result_markdown(result: &TestResult, config: &TestConfig, file_name: &str) -> String {
  let config_json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());

  let mut md = String::from("# Quiz Result\n");
  let _ = writeln!(md, "- quizTitle: {}", file_name);
  let _ = writeln!(md, "- date: {}", result.date.to_rfc3339_opts(SecondsFormat::Millis, true));
  let _ = writeln!(md, "- mode: {}", config.mode.as_str());
  let _ = writeln!(md, "- duration: {}", result.duration);
  let _ = writeln!(md, "- questionsCount: {}", result.total);
  let _ = writeln!(md, "- score: {}/{}", result.score, result.total);
  let _ = writeln!(md, "- percent: {}%", result.percent_display());
  md.push('\n');

  md.push_str("## Answers\n");
  for (idx, d) in result.details.iter().enumerate() {
    let status = if d.is_correct { "✅" } else { "❌" };
    let verdict = if d.is_correct { "correct" } else { "incorrect" };
    let correct_info = if d.is_correct {
      String::new()
    } else {
      format!(" (correct: \"{}\")", d.correct_answer)
    };
    let _ = writeln!(
      md,
      "{}. Question {} — selected: \"{}\" — {} {}{}",
      idx + 1,
      idx + 1,
      d.user_answer,
      verdict,
      status,
      correct_info
    );
  }

  md.push_str("\n## Raw\n");
  let _ = writeln!(md, "- JSON source file: {}", file_name);
  let _ = writeln!(md, "- config: {}", config_json);
  md.push('\n');
  md.push_str("---\n");

  md
}

/// Download name for a markdown report, derived from the export moment.
pub fn export_file_name(at: DateTime<Utc>) -> String {
  at.format("quiz-result-%Y-%m-%d-%H-%M-%S.md").to_string()
}

/// Two-question sample bank showing every recognized field, including a
/// multiple-answer question with its voted-answers payload.
pub fn template_bank() -> Value {
  json!([
    {
      "url": "https://www.example.com/question-1",
      "text": "Sample question text here. What is the correct answer?",
      "choices": [
        {
          "letter": "A.",
          "content": "First answer option",
          "is_correct": true,
          "has_images": false,
          "images": []
        },
        {
          "letter": "B.",
          "content": "Second answer option",
          "is_correct": false,
          "has_images": false,
          "images": []
        },
        {
          "letter": "C.",
          "content": "Third answer option",
          "is_correct": false,
          "has_images": false,
          "images": []
        },
        {
          "letter": "D.",
          "content": "Fourth answer option",
          "is_correct": false,
          "has_images": false,
          "images": []
        }
      ],
      "correct_answer": "[{\"voted_answers\": \"A\", \"vote_count\": 10, \"is_most_voted\": true}]",
      "correct_content": "Detailed content explanation: This field can contain comprehensive information about the correct answer, including references, documentation links, or additional learning materials.",
      "question_images": [],
      "meta": {
        "explain": "This is an optional explanation for the correct answer. You can provide additional context, reasoning, or details to help learners understand why this is the correct choice."
      },
      "exam_code": "SAMPLE-001"
    },
    {
      "url": "https://www.example.com/question-2",
      "text": "Another sample question with multiple correct answers. Which options are correct? (Choose two.)",
      "choices": [
        {
          "letter": "A.",
          "content": "First correct option",
          "is_correct": true,
          "has_images": false,
          "images": []
        },
        {
          "letter": "B.",
          "content": "Incorrect option",
          "is_correct": false,
          "has_images": false,
          "images": []
        },
        {
          "letter": "C.",
          "content": "Second correct option",
          "is_correct": true,
          "has_images": false,
          "images": []
        },
        {
          "letter": "D.",
          "content": "Another incorrect option",
          "is_correct": false,
          "has_images": false,
          "images": []
        }
      ],
      "correct_answer": "[{\"voted_answers\": \"AC\", \"vote_count\": 15, \"is_most_voted\": true}, {\"voted_answers\": \"AB\", \"vote_count\": 3, \"is_most_voted\": false}]",
      "correct_content": "Both options A and C are correct because they complement each other in solving this problem. Option A provides the foundational approach while option C adds the necessary configuration.",
      "question_images": [],
      "meta": {
        "explain": "For multiple-answer questions, the explanation can describe why each correct option is valid and why the others are not."
      },
      "exam_code": "SAMPLE-001"
    }
  ])
}
