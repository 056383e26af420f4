//! Interaction state machine for the active test.
//!
//! One `UserSession` owns the whole lifecycle of a visitor's test:
//! `Idle -> ConfigPending -> Active -> Completed`. Mode-specific behavior
//! lives in a single `ModeState` variant carried by the runner, so practice
//! locking, the timed countdown, and flashcard flipping each have one home
//! instead of scattered mode checks.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::{Question, QuestionBank, TestConfig, TestMode, TestResult};
use crate::engine::compiler::compile;
use crate::engine::generator::{self, TestSession};
use crate::engine::scoring::{Answer, grade, is_multi_answer};
use crate::error::{ConfigError, StateError};

/// Per-mode runtime state.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeState {
  /// Immediate feedback; a graded entry locks its question against edits.
  Practice { graded: BTreeMap<usize, bool> },
  /// Countdown in seconds; hitting zero force-submits the whole test.
  Timed { remaining_secs: u32 },
  /// Non-graded review with flip-to-reveal.
  Flashcard { flipped: bool },
}

/// Drives one active test session: position, recorded answers, timer or
/// grading state depending on mode.
#[derive(Debug, Clone)]
pub struct TestRunner {
  session: TestSession,
  current: usize,
  answers: BTreeMap<usize, Answer>,
  started_at: DateTime<Utc>,
  mode: ModeState,
}

impl TestRunner {
  pub fn new(session: TestSession) -> Self {
    let mode = match session.config.mode {
      TestMode::Practice => ModeState::Practice { graded: BTreeMap::new() },
      TestMode::Timed => ModeState::Timed {
        remaining_secs: session.config.time_minutes * 60,
      },
      TestMode::Flashcard => ModeState::Flashcard { flipped: false },
    };

    Self {
      session,
      current: 0,
      answers: BTreeMap::new(),
      started_at: Utc::now(),
      mode,
    }
  }

  pub fn session(&self) -> &TestSession {
    &self.session
  }

  pub fn into_session(self) -> TestSession {
    self.session
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn current_question(&self) -> &Question {
    &self.session.questions[self.current]
  }

  pub fn answers(&self) -> &BTreeMap<usize, Answer> {
    &self.answers
  }

  pub fn answer_for(&self, index: usize) -> Option<&Answer> {
    self.answers.get(&index)
  }

  pub fn answered_count(&self) -> usize {
    self.answers.len()
  }

  /// Practice-mode grading outcome for a question, if it was submitted.
  pub fn graded_result(&self, index: usize) -> Option<bool> {
    match &self.mode {
      ModeState::Practice { graded } => graded.get(&index).copied(),
      _ => None,
    }
  }

  /// A practice question is locked once graded; its choices are
  /// display-only from then on.
  pub fn is_locked(&self, index: usize) -> bool {
    self.graded_result(index).is_some()
  }

  pub fn remaining_secs(&self) -> Option<u32> {
    match self.mode {
      ModeState::Timed { remaining_secs } => Some(remaining_secs),
      _ => None,
    }
  }

  pub fn flipped(&self) -> bool {
    matches!(self.mode, ModeState::Flashcard { flipped: true })
  }

  pub fn mode(&self) -> TestMode {
    self.session.config.mode
  }

  pub fn elapsed_seconds(&self) -> u64 {
    (Utc::now() - self.started_at).num_seconds().max(0) as u64
  }

  /// Record a choice for the current question. Multi-answer questions
  /// toggle set membership; single-answer questions replace wholesale.
  /// Locked practice questions and flashcard sessions ignore selection.
  pub fn select_answer(&mut self, letter: &str) {
    match &self.mode {
      ModeState::Flashcard { .. } => return,
      ModeState::Practice { graded } if graded.contains_key(&self.current) => return,
      _ => {}
    }

    if is_multi_answer(&self.session.questions[self.current]) {
      let mut set = self
        .answers
        .get(&self.current)
        .map(Answer::letters)
        .unwrap_or_default();

      if !set.remove(letter) {
        set.insert(letter.to_string());
      }

      // An emptied set means "no answer", not an empty answer.
      if set.is_empty() {
        self.answers.remove(&self.current);
      } else {
        self.answers.insert(self.current, Answer::Multiple(set));
      }
    } else {
      self.answers.insert(self.current, Answer::Single(letter.to_string()));
    }
  }

  /// Grade the current question's answer (practice mode only). No-op when
  /// there is no answer yet or the question was already graded. Returns the
  /// grading outcome when one was recorded.
  pub fn submit_current_answer(&mut self) -> Option<bool> {
    let ModeState::Practice { graded } = &mut self.mode else {
      return None;
    };
    if graded.contains_key(&self.current) {
      return None;
    }

    let answer = self.answers.get(&self.current)?;
    let is_correct = grade(&self.session.questions[self.current], Some(answer));
    graded.insert(self.current, is_correct);
    Some(is_correct)
  }

  /// Move by one question in either direction. Out-of-range targets are
  /// ignored. Practice mode auto-submits an unsubmitted answer first so
  /// grading state stays consistent with position changes.
  pub fn navigate(&mut self, delta: i32) {
    if matches!(self.mode, ModeState::Practice { .. }) {
      self.submit_current_answer();
    }

    let target = self.current as i64 + delta as i64;
    if target >= 0 && (target as usize) < self.session.questions.len() {
      self.move_to(target as usize);
    }
  }

  /// Direct jump from the question grid. Bounds-checked; practice mode
  /// auto-submits like `navigate`.
  pub fn jump_to(&mut self, index: usize) {
    if index >= self.session.questions.len() {
      return;
    }
    if matches!(self.mode, ModeState::Practice { .. }) {
      self.submit_current_answer();
    }
    self.move_to(index);
  }

  fn move_to(&mut self, index: usize) {
    self.current = index;
    // A newly shown flashcard starts face down.
    if let ModeState::Flashcard { flipped } = &mut self.mode {
      *flipped = false;
    }
  }

  /// One second of timed countdown. Returns the compiled result when time
  /// runs out; any other mode ignores ticks.
  pub fn tick(&mut self) -> Option<TestResult> {
    let ModeState::Timed { remaining_secs } = &mut self.mode else {
      return None;
    };

    *remaining_secs = remaining_secs.saturating_sub(1);
    if *remaining_secs == 0 {
      return Some(compile(&self.session, &self.answers, self.elapsed_seconds()));
    }
    None
  }

  /// Toggle the flashcard face. Returns the new state; non-flashcard modes
  /// stay face down.
  pub fn flip(&mut self) -> bool {
    if let ModeState::Flashcard { flipped } = &mut self.mode {
      *flipped = !*flipped;
      *flipped
    } else {
      false
    }
  }

  /// Compile the final result. Flashcard sessions have no grading concept
  /// and yield `None` (abandonment).
  pub fn submit(&self) -> Option<TestResult> {
    match self.mode {
      ModeState::Flashcard { .. } => None,
      _ => Some(compile(&self.session, &self.answers, self.elapsed_seconds())),
    }
  }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Default)]
pub enum Phase {
  #[default]
  Idle,
  ConfigPending {
    bank: QuestionBank,
    file_name: String,
  },
  Active(TestRunner),
  Completed {
    session: TestSession,
    result: TestResult,
  },
}

/// Failure starting a test: wrong phase, or a configuration that violates
/// the bank's bounds. An invalid configuration leaves the phase untouched.
#[derive(Debug)]
pub enum StartError {
  State(StateError),
  Config(ConfigError),
}

/// The explicit session owner. Every operation on a visitor's test flows
/// through this object; there is no ambient engine state.
#[derive(Debug, Clone, Default)]
pub struct UserSession {
  phase: Phase,
}

impl UserSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn phase(&self) -> &Phase {
    &self.phase
  }

  pub fn phase_name(&self) -> &'static str {
    match self.phase {
      Phase::Idle => "idle",
      Phase::ConfigPending { .. } => "config_pending",
      Phase::Active(_) => "active",
      Phase::Completed { .. } => "completed",
    }
  }

  /// Install a freshly loaded bank, tearing down whatever was active.
  pub fn load_bank(&mut self, bank: QuestionBank, file_name: String) {
    self.phase = Phase::ConfigPending { bank, file_name };
  }

  /// The pending bank awaiting configuration.
  pub fn pending_bank(&self) -> Result<(&[Question], &str), StateError> {
    match &self.phase {
      Phase::ConfigPending { bank, file_name } => Ok((bank, file_name)),
      _ => Err(StateError("no question bank loaded")),
    }
  }

  /// Start a test from the pending bank. On `ConfigError` the session
  /// remains in `ConfigPending` so the caller can correct and retry.
  pub fn start_test(&mut self, config: &TestConfig) -> Result<(), StartError> {
    let Phase::ConfigPending { bank, file_name } = &self.phase else {
      return Err(StartError::State(StateError("no question bank loaded")));
    };

    let session = generator::generate(bank, config, file_name).map_err(StartError::Config)?;
    self.phase = Phase::Active(TestRunner::new(session));
    Ok(())
  }

  pub fn runner(&mut self) -> Result<&mut TestRunner, StateError> {
    match &mut self.phase {
      Phase::Active(runner) => Ok(runner),
      _ => Err(StateError("no active test session")),
    }
  }

  pub fn runner_ref(&self) -> Result<&TestRunner, StateError> {
    match &self.phase {
      Phase::Active(runner) => Ok(runner),
      _ => Err(StateError("no active test session")),
    }
  }

  /// One timer tick. When the countdown expires the test is force-submitted
  /// (unanswered questions count as incorrect) and the session completes.
  pub fn tick(&mut self) -> Result<Option<TestResult>, StateError> {
    let expired = self.runner()?.tick();

    match expired {
      Some(result) => {
        if let Phase::Active(runner) = std::mem::take(&mut self.phase) {
          self.phase = Phase::Completed {
            session: runner.into_session(),
            result: result.clone(),
          };
        }
        Ok(Some(result))
      }
      None => Ok(None),
    }
  }

  /// Submit the active test. Practice and timed sessions complete with a
  /// result; a flashcard session is abandoned back to `Idle` without one.
  pub fn submit(&mut self) -> Result<Option<TestResult>, StateError> {
    match std::mem::take(&mut self.phase) {
      Phase::Active(runner) => match runner.submit() {
        Some(result) => {
          let session = runner.into_session();
          self.phase = Phase::Completed {
            session,
            result: result.clone(),
          };
          Ok(Some(result))
        }
        None => {
          self.phase = Phase::Idle;
          Ok(None)
        }
      },
      other => {
        self.phase = other;
        Err(StateError("no active test session"))
      }
    }
  }

  pub fn completed(&self) -> Result<(&TestSession, &TestResult), StateError> {
    match &self.phase {
      Phase::Completed { session, result } => Ok((session, result)),
      _ => Err(StateError("no completed test")),
    }
  }

  /// Unconditional teardown: exit, cancel, or "new test".
  pub fn reset(&mut self) {
    self.phase = Phase::Idle;
  }
}
