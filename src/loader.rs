//! Question bank loading and validation.
//!
//! The top-level value must be a non-empty array; anything else is a
//! `FormatError` and aborts the load. Individual malformed entries are
//! dropped with a diagnostic and loading continues, so a file can load with
//! zero surviving questions. Callers must treat an empty bank explicitly;
//! session generation fails fast on one.

use crate::domain::{Question, QuestionBank};
use crate::error::FormatError;

/// Diagnostics from one load: how many entries survived and which source
/// indices were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
  pub loaded: usize,
  pub dropped: Vec<usize>,
}

/// Parse and validate a raw question bank file.
pub fn load_bank(raw: &str) -> Result<(QuestionBank, LoadReport), FormatError> {
  let value: serde_json::Value =
    serde_json::from_str(raw).map_err(|e| FormatError(format!("Failed to parse JSON: {}", e)))?;

  load_bank_value(&value)
}

/// Validate an already-parsed JSON value.
pub fn load_bank_value(value: &serde_json::Value) -> Result<(QuestionBank, LoadReport), FormatError> {
  let entries = value
    .as_array()
    .ok_or_else(|| FormatError("JSON must be an array of questions".into()))?;

  if entries.is_empty() {
    return Err(FormatError("JSON file is empty".into()));
  }

  let mut questions = Vec::with_capacity(entries.len());
  let mut dropped = Vec::new();

  for (i, entry) in entries.iter().enumerate() {
    match serde_json::from_value::<Question>(entry.clone()) {
      Ok(q) if !q.text.is_empty() && !q.choices.is_empty() => {
        if !q.choices.iter().any(|c| c.is_correct) {
          // Loads anyway; such a question can never grade as correct.
          tracing::warn!("question at index {} has no choice marked correct", i);
        }
        questions.push(q);
      }
      Ok(_) => {
        tracing::debug!("dropping question at index {}: missing text or choices", i);
        dropped.push(i);
      }
      Err(e) => {
        tracing::debug!("dropping question at index {}: {}", i, e);
        dropped.push(i);
      }
    }
  }

  let report = LoadReport {
    loaded: questions.len(),
    dropped,
  };
  Ok((questions, report))
}
