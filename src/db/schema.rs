use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS quizzes (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      file_name TEXT NOT NULL,
      question_count INTEGER NOT NULL,
      created_at TEXT NOT NULL,
      updated_at TEXT NOT NULL,
      payload TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS results (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      quiz_name TEXT NOT NULL,
      file_name TEXT NOT NULL DEFAULT '',
      mode TEXT NOT NULL,
      score INTEGER NOT NULL,
      total INTEGER NOT NULL,
      percent REAL NOT NULL,
      passed INTEGER NOT NULL,
      duration_seconds INTEGER NOT NULL,
      taken_at TEXT NOT NULL,
      config TEXT NOT NULL,
      details TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_results_taken_at ON results(taken_at);
    CREATE INDEX IF NOT EXISTS idx_results_quiz_name ON results(quiz_name);
    CREATE INDEX IF NOT EXISTS idx_results_mode ON results(mode);
    CREATE INDEX IF NOT EXISTS idx_quizzes_name ON quizzes(name);
    CREATE INDEX IF NOT EXISTS idx_quizzes_updated_at ON quizzes(updated_at);
    "#,
  )?;

  // ============================================================
  // MIGRATIONS FOR EXISTING DATABASES
  // These are no-ops for new databases (columns already exist)
  // ============================================================

  // Migration: results used to record only the quiz name
  add_column_if_missing(conn, "results", "file_name", "TEXT NOT NULL DEFAULT ''")?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}
