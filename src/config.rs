//! Application configuration constants.
//!
//! Centralizes tunables and resolves the database path from config.toml,
//! the environment, or a default.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/quiz-trainer.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Session Configuration ====================

/// Name of the cookie carrying the engine session id
pub const SESSION_COOKIE: &str = "qt_session";

/// Engine session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 4;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Test Configuration ====================

/// Default question count offered at configuration time (capped to bank size)
pub const DEFAULT_QUESTION_COUNT: usize = 65;

/// Default time limit for timed mode, in minutes
pub const DEFAULT_TIME_MINUTES: u32 = 60;

/// Upper bound for the timed-mode limit, in minutes. Keeps the countdown
/// (limit * 60 seconds) comfortably inside u32.
pub const MAX_TIME_MINUTES: u32 = 600;

/// Canonical passing threshold, in percent. Applies to both the in-session
/// verdict and the persisted pass flag.
pub const PASS_THRESHOLD_PERCENT: f64 = 72.0;

// ==================== History Configuration ====================

/// Window during which a deleted result can be restored, in seconds
pub const UNDO_WINDOW_SECS: i64 = 5;
