//! Result history: append-only records with filtered listing, delete, and
//! restore (undo support).

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};
use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use super::quizzes::parse_date;
use crate::domain::{AnswerDetail, TestConfig, TestMode, TestResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: i64,
    pub quiz_name: String,
    pub file_name: String,
    pub mode: TestMode,
    pub score: usize,
    pub total: usize,
    pub percent: f64,
    pub passed: bool,
    pub duration_seconds: u64,
    pub taken_at: DateTime<Utc>,
    pub config: TestConfig,
    pub details: Vec<AnswerDetail>,
}

/// History listing filter. All fields optional and conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFilter {
    pub quiz_name: Option<String>,
    pub passed: Option<bool>,
    pub mode: Option<TestMode>,
}

const RESULT_COLUMNS: &str = "id, quiz_name, file_name, mode, score, total, percent, passed, \
     duration_seconds, taken_at, config, details";

pub fn save_result(
    conn: &Connection,
    quiz_name: &str,
    file_name: &str,
    config: &TestConfig,
    result: &TestResult,
) -> Result<i64> {
    let config_json = serde_json::to_string(config)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let details_json = serde_json::to_string(&result.details)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        r#"
    INSERT INTO results (quiz_name, file_name, mode, score, total, percent, passed,
                         duration_seconds, taken_at, config, details)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    "#,
        params![
            quiz_name,
            file_name,
            config.mode.as_str(),
            result.score as i64,
            result.total as i64,
            result.percent,
            result.passed(),
            result.duration_seconds as i64,
            result.date.to_rfc3339(),
            config_json,
            details_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest first; ties broken by insertion order.
pub fn list_results(conn: &Connection, filter: &ResultFilter) -> Result<Vec<StoredResult>> {
    let mut sql = format!("SELECT {} FROM results", RESULT_COLUMNS);
    let mut clauses: Vec<String> = Vec::new();
    let mut bound: Vec<String> = Vec::new();

    if let Some(name) = &filter.quiz_name {
        bound.push(name.clone());
        clauses.push(format!("quiz_name = ?{}", bound.len()));
    }
    // passed and mode render to fixed literals, no binding needed
    if let Some(passed) = filter.passed {
        clauses.push(format!("passed = {}", passed as i64));
    }
    if let Some(mode) = filter.mode {
        clauses.push(format!("mode = '{}'", mode.as_str()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY taken_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let results = stmt
        .query_map(params_from_iter(bound.iter()), row_to_result)?
        .collect::<Result<Vec<_>>>()?;
    Ok(results)
}

pub fn get_result(conn: &Connection, id: i64) -> Result<Option<StoredResult>> {
    conn.query_row(
        &format!("SELECT {} FROM results WHERE id = ?1", RESULT_COLUMNS),
        params![id],
        row_to_result,
    )
    .optional()
}

/// Delete a record, returning it so the caller can offer undo.
pub fn delete_result(conn: &Connection, id: i64) -> Result<Option<StoredResult>> {
    let Some(record) = get_result(conn, id)? else {
        return Ok(None);
    };
    conn.execute("DELETE FROM results WHERE id = ?1", params![id])?;
    Ok(Some(record))
}

/// Reinsert a deleted record under its original id.
pub fn restore_result(conn: &Connection, record: &StoredResult) -> Result<()> {
    let config_json = serde_json::to_string(&record.config)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let details_json = serde_json::to_string(&record.details)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        r#"
    INSERT INTO results (id, quiz_name, file_name, mode, score, total, percent, passed,
                         duration_seconds, taken_at, config, details)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    "#,
        params![
            record.id,
            record.quiz_name,
            record.file_name,
            record.mode.as_str(),
            record.score as i64,
            record.total as i64,
            record.percent,
            record.passed,
            record.duration_seconds as i64,
            record.taken_at.to_rfc3339(),
            config_json,
            details_json,
        ],
    )?;
    Ok(())
}

/// Distinct quiz names appearing in history, for filter dropdowns.
pub fn quiz_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT quiz_name FROM results ORDER BY quiz_name ASC")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(names)
}

fn row_to_result(row: &Row<'_>) -> Result<StoredResult> {
    let mode_raw: String = row.get(3)?;
    let mode = TestMode::from_str(&mode_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown test mode: {}", mode_raw).into(),
        )
    })?;

    let config_raw: String = row.get(10)?;
    let config: TestConfig = serde_json::from_str(&config_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?;

    let details_raw: String = row.get(11)?;
    let details: Vec<AnswerDetail> = serde_json::from_str(&details_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;

    Ok(StoredResult {
        id: row.get(0)?,
        quiz_name: row.get(1)?,
        file_name: row.get(2)?,
        mode,
        score: row.get::<_, i64>(4)? as usize,
        total: row.get::<_, i64>(5)? as usize,
        percent: row.get(6)?,
        passed: row.get(7)?,
        duration_seconds: row.get::<_, i64>(8)? as u64,
        taken_at: parse_date(row.get::<_, String>(9)?, 9)?,
        config,
        details,
    })
}
