//! Test session generation: sort, select, shuffle, freeze.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Question, QuestionSelection, SortOrder, TestConfig};
use crate::error::ConfigError;
use crate::shuffle::seeded_shuffle;

/// One concrete realization of a test. Immutable after creation; the
/// question snapshots already carry their (possibly shuffled) choice order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSession {
  pub questions: Vec<Question>,
  /// Resolved configuration, seed included.
  pub config: TestConfig,
  pub file_name: String,
  pub start_time: DateTime<Utc>,
}

/// Generate a session from a validated bank. The bank itself is never
/// mutated; selected questions are cloned snapshots.
pub fn generate(
  bank: &[Question],
  config: &TestConfig,
  file_name: &str,
) -> Result<TestSession, ConfigError> {
  validate(bank, config)?;

  let seed = config.seed.unwrap_or_else(|| rand::random::<u32>() as u64);

  // Sort order first: only "newest" changes anything. "oldest" and
  // "original" both keep insertion order.
  let mut sorted: Vec<Question> = bank.to_vec();
  if config.sort_order == SortOrder::Newest {
    sorted.reverse();
  }

  let mut selected = match config.question_selection {
    QuestionSelection::Range => {
      sorted[config.range_from - 1..config.range_to].to_vec()
    }
    QuestionSelection::Random => {
      // Shuffle only when there is something to truncate. A request for the
      // whole bank (or more) keeps the sorted order untouched.
      if sorted.len() > config.num_questions {
        let mut shuffled = seeded_shuffle(&sorted, seed);
        shuffled.truncate(config.num_questions);
        shuffled
      } else {
        sorted
      }
    }
  };

  if config.shuffle_choices {
    for (idx, q) in selected.iter_mut().enumerate() {
      // Decorrelate per-question permutations from the session seed. The
      // source URL length is the stable per-question offset; questions
      // without one fall back to their position in the selection.
      let offset = q.url.as_ref().map(|u| u.len()).unwrap_or(idx) as u64;
      q.choices = seeded_shuffle(&q.choices, seed + offset);
    }
  }

  let mut resolved = config.clone();
  resolved.seed = Some(seed);

  Ok(TestSession {
    questions: selected,
    config: resolved,
    file_name: file_name.to_string(),
    start_time: Utc::now(),
  })
}

fn validate(bank: &[Question], config: &TestConfig) -> Result<(), ConfigError> {
  if bank.is_empty() {
    return Err(ConfigError("Question bank is empty".into()));
  }

  match config.question_selection {
    QuestionSelection::Range => {
      if config.range_from < 1 || config.range_from > bank.len() {
        return Err(ConfigError(format!(
          "\"From\" must be between 1 and {}",
          bank.len()
        )));
      }
      if config.range_to < 1 || config.range_to > bank.len() {
        return Err(ConfigError(format!(
          "\"To\" must be between 1 and {}",
          bank.len()
        )));
      }
      if config.range_from > config.range_to {
        return Err(ConfigError(
          "\"From\" must be less than or equal to \"To\"".into(),
        ));
      }
    }
    QuestionSelection::Random => {
      if config.num_questions < 1 || config.num_questions > bank.len() {
        return Err(ConfigError(format!(
          "Number of questions must be between 1 and {}",
          bank.len()
        )));
      }
    }
  }

  if config.mode == crate::domain::TestMode::Timed
    && !(1..=crate::config::MAX_TIME_MINUTES).contains(&config.time_minutes)
  {
    return Err(ConfigError(format!(
      "Time limit must be between 1 and {} minutes",
      crate::config::MAX_TIME_MINUTES
    )));
  }

  Ok(())
}
