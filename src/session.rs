//! In-memory storage for engine sessions.
//!
//! Stores `UserSession` state keyed by session ID (from cookie).
//! Sessions auto-expire after a configurable duration of inactivity.
//! The store is owned by `AppState`; there is no ambient global.

use crate::config;
use crate::engine::UserSession;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Session entry with last access time for expiration
struct SessionEntry {
  session: UserSession,
  last_access: DateTime<Utc>,
}

#[derive(Default)]
pub struct Sessions {
  entries: Mutex<HashMap<String, SessionEntry>>,
}

impl Sessions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Get or create the session for the given ID. Returns a working copy;
  /// callers write back with `update` after mutating.
  pub fn get(&self, session_id: &str) -> UserSession {
    let mut entries = self.entries.lock().expect("Session store lock poisoned");

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut entries);
    }

    if let Some(entry) = entries.get_mut(session_id) {
      entry.last_access = Utc::now();
      entry.session.clone()
    } else {
      let session = UserSession::new();
      entries.insert(
        session_id.to_string(),
        SessionEntry {
          session: session.clone(),
          last_access: Utc::now(),
        },
      );
      session
    }
  }

  pub fn update(&self, session_id: &str, session: UserSession) {
    let mut entries = self.entries.lock().expect("Session store lock poisoned");
    entries.insert(
      session_id.to_string(),
      SessionEntry {
        session,
        last_access: Utc::now(),
      },
    );
  }

  pub fn remove(&self, session_id: &str) {
    let mut entries = self.entries.lock().expect("Session store lock poisoned");
    entries.remove(session_id);
  }
}

/// Clean up expired sessions
fn cleanup_expired(entries: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  entries.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Choice, Question};

  #[test]
  fn test_get_creates_then_returns_same_session() {
    let sessions = Sessions::new();
    let fresh = sessions.get("abc");
    assert_eq!(fresh.phase_name(), "idle");

    let mut working = sessions.get("abc");
    working.load_bank(
      vec![Question {
        url: None,
        text: "q".into(),
        choices: vec![Choice {
          letter: "A.".into(),
          content: "x".into(),
          is_correct: true,
          has_images: None,
          images: None,
        }],
        correct_answer_raw: None,
        correct_content: None,
        question_images: None,
        meta: None,
        exam_code: None,
      }],
      "f.json".into(),
    );
    sessions.update("abc", working);

    assert_eq!(sessions.get("abc").phase_name(), "config_pending");
    assert_eq!(sessions.get("other").phase_name(), "idle");
  }

  #[test]
  fn test_remove_discards_state() {
    let sessions = Sessions::new();
    let mut working = sessions.get("abc");
    working.load_bank(vec![], "f.json".into());
    sessions.update("abc", working);

    sessions.remove("abc");
    assert_eq!(sessions.get("abc").phase_name(), "idle");
  }

  #[test]
  fn test_generated_ids_are_distinct_alphanumeric() {
    let a = generate_session_id();
    let b = generate_session_id();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);
    assert!(a.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }
}
