//! Error taxonomy for the engine and its HTTP surface.
//!
//! Per-entry validation failures during bank loading are diagnostics, not
//! errors; they are logged and loading continues (see `loader`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Malformed question bank input: unparseable JSON, not an array, or an
/// empty array. Surfaced to the user; the previous bank stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError(pub String);

impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for FormatError {}

/// Test configuration violates range/count bounds. Blocks session start;
/// the caller remains in the configuration state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for ConfigError {}

/// Operation invoked without the session phase it requires. Should not be
/// reachable through a well-behaved client; treated as a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateError(pub &'static str);

impl fmt::Display for StateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for StateError {}

/// Handler-level error, mapped onto HTTP responses.
#[derive(Debug)]
pub enum AppError {
  Format(FormatError),
  Config(ConfigError),
  State(StateError),
  NotFound(&'static str),
  Storage(String),
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Format(e) => write!(f, "{}", e),
      Self::Config(e) => write!(f, "{}", e),
      Self::State(e) => write!(f, "{}", e),
      Self::NotFound(what) => write!(f, "{} not found", what),
      Self::Storage(msg) => write!(f, "{}", msg),
    }
  }
}

impl std::error::Error for AppError {}

impl From<FormatError> for AppError {
  fn from(e: FormatError) -> Self {
    Self::Format(e)
  }
}

impl From<ConfigError> for AppError {
  fn from(e: ConfigError) -> Self {
    Self::Config(e)
  }
}

impl From<StateError> for AppError {
  fn from(e: StateError) -> Self {
    Self::State(e)
  }
}

impl From<crate::engine::runner::StartError> for AppError {
  fn from(e: crate::engine::runner::StartError) -> Self {
    match e {
      crate::engine::runner::StartError::State(e) => Self::State(e),
      crate::engine::runner::StartError::Config(e) => Self::Config(e),
    }
  }
}

impl From<rusqlite::Error> for AppError {
  fn from(e: rusqlite::Error) -> Self {
    Self::Storage(e.to_string())
  }
}

impl From<crate::db::DbLockError> for AppError {
  fn from(e: crate::db::DbLockError) -> Self {
    Self::Storage(e.to_string())
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = match &self {
      Self::Format(_) | Self::Config(_) => StatusCode::BAD_REQUEST,
      Self::State(e) => {
        tracing::warn!("state guard tripped: {}", e);
        StatusCode::CONFLICT
      }
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Storage(msg) => {
        tracing::error!("storage failure: {}", msg);
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
