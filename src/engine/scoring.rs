//! Answer grading for single- and multi-answer questions.

use crate::domain::Question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A recorded answer: one letter for single-answer questions, a sorted
/// letter set for multi-answer questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
  Single(String),
  Multiple(BTreeSet<String>),
}

impl Answer {
  pub fn letters(&self) -> BTreeSet<String> {
    match self {
      Self::Single(letter) => BTreeSet::from([letter.clone()]),
      Self::Multiple(set) => set.clone(),
    }
  }

  /// Display form: the letter itself, or the sorted set joined with ", ".
  pub fn display(&self) -> String {
    match self {
      Self::Single(letter) => letter.clone(),
      Self::Multiple(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
    }
  }
}

/// All choice letters marked correct, sorted.
pub fn correct_letters(question: &Question) -> BTreeSet<String> {
  question
    .choices
    .iter()
    .filter(|c| c.is_correct)
    .map(|c| c.letter.clone())
    .collect()
}

/// A question with more than one correct choice requires exact-set matching.
pub fn is_multi_answer(question: &Question) -> bool {
  correct_letters(question).len() > 1
}

/// Grade a candidate answer. An absent or empty candidate is always
/// incorrect; a question with no correct choice can never grade correct.
pub fn grade(question: &Question, candidate: Option<&Answer>) -> bool {
  let Some(candidate) = candidate else {
    return false;
  };

  let given = candidate.letters();
  if given.is_empty() {
    return false;
  }

  given == correct_letters(question)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Choice;

  fn question(correct: &[&str], wrong: &[&str]) -> Question {
    let mut choices = Vec::new();
    for letter in correct {
      choices.push(Choice {
        letter: letter.to_string(),
        content: format!("correct {}", letter),
        is_correct: true,
        has_images: None,
        images: None,
      });
    }
    for letter in wrong {
      choices.push(Choice {
        letter: letter.to_string(),
        content: format!("wrong {}", letter),
        is_correct: false,
        has_images: None,
        images: None,
      });
    }
    Question {
      url: None,
      text: "test question".into(),
      choices,
      correct_answer_raw: None,
      correct_content: None,
      question_images: None,
      meta: None,
      exam_code: None,
    }
  }

  fn multiple(letters: &[&str]) -> Answer {
    Answer::Multiple(letters.iter().map(|s| s.to_string()).collect())
  }

  #[test]
  fn test_correct_letters_sorted() {
    let q = question(&["C.", "A."], &["B."]);
    let letters: Vec<String> = correct_letters(&q).into_iter().collect();
    assert_eq!(letters, vec!["A.", "C."]);
  }

  #[test]
  fn test_is_multi_answer() {
    assert!(!is_multi_answer(&question(&["A."], &["B."])));
    assert!(is_multi_answer(&question(&["A.", "C."], &["B."])));
    assert!(!is_multi_answer(&question(&[], &["A.", "B."])));
  }

  #[test]
  fn test_single_answer_grading() {
    let q = question(&["B."], &["A.", "C."]);
    assert!(grade(&q, Some(&Answer::Single("B.".into()))));
    assert!(!grade(&q, Some(&Answer::Single("A.".into()))));
    assert!(!grade(&q, None));
  }

  #[test]
  fn test_grading_correct_letters_is_always_true() {
    for q in [question(&["A."], &["B."]), question(&["A.", "C."], &["B.", "D."])] {
      let answer = Answer::Multiple(correct_letters(&q));
      assert!(grade(&q, Some(&answer)));
    }
  }

  #[test]
  fn test_multi_answer_requires_exact_set() {
    let q = question(&["A.", "C."], &["B.", "D."]);
    assert!(grade(&q, Some(&multiple(&["A.", "C."]))));
    assert!(grade(&q, Some(&multiple(&["C.", "A."]))), "order must not matter");
    assert!(!grade(&q, Some(&multiple(&["A."]))), "subset is incorrect");
    assert!(!grade(&q, Some(&multiple(&["A.", "B.", "C."]))), "superset is incorrect");
    assert!(!grade(&q, Some(&multiple(&["B.", "D."]))));
  }

  #[test]
  fn test_empty_set_is_incorrect() {
    let q = question(&["A.", "C."], &["B."]);
    assert!(!grade(&q, Some(&multiple(&[]))));
  }

  #[test]
  fn test_zero_correct_question_never_grades_correct() {
    let q = question(&[], &["A.", "B."]);
    assert!(!grade(&q, Some(&Answer::Single("A.".into()))));
    assert!(!grade(&q, None));
  }

  #[test]
  fn test_single_letter_set_matches_single_answer() {
    // A one-element set and a bare letter grade identically.
    let q = question(&["B."], &["A."]);
    assert!(grade(&q, Some(&multiple(&["B."]))));
  }

  #[test]
  fn test_answer_display() {
    assert_eq!(Answer::Single("A.".into()).display(), "A.");
    assert_eq!(multiple(&["C.", "A."]).display(), "A., C.");
  }
}
