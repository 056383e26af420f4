//! Test utilities for database setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

use crate::db::DbPool;

/// Test environment with a migrated database in a temporary directory,
/// ensuring automatic cleanup when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Direct connection with the full schema applied
    pub conn: Connection,
}

impl TestEnv {
    /// Create a test environment with a migrated database. Panics on setup
    /// failure; this is test-only scaffolding.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let db_path = temp.path().join("quiz-trainer.db");
        let conn = Connection::open(&db_path).expect("open test database");
        crate::db::schema::run_migrations(&conn).expect("run migrations");

        Self { temp, conn }
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Open the same database as a handler-style pool.
    pub fn pool(&self) -> DbPool {
        crate::db::init_db(&self.temp.path().join("quiz-trainer.db")).expect("open pool")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
