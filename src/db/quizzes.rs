//! Saved quiz banks: whole-bank persistence plus a metadata projection
//! for listings. Quizzes are keyed by id; names are not unique, so saving
//! under an existing name creates a second quiz.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, params};
use serde::{Deserialize, Serialize};

use crate::domain::{Question, QuestionBank};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuiz {
    pub id: i64,
    pub name: String,
    pub file_name: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub questions: QuestionBank,
}

/// Listing projection; the question payload stays in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub name: String,
    pub file_name: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persist a new saved quiz, returning its id.
pub fn save_quiz(
    conn: &Connection,
    name: &str,
    file_name: &str,
    questions: &[Question],
) -> Result<i64> {
    let payload = serde_json::to_string(questions)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let now = Utc::now().to_rfc3339();

    conn.execute(
        r#"
    INSERT INTO quizzes (name, file_name, question_count, created_at, updated_at, payload)
    VALUES (?1, ?2, ?3, ?4, ?4, ?5)
    "#,
        params![name, file_name, questions.len() as i64, now, payload],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_quizzes(conn: &Connection) -> Result<Vec<QuizSummary>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, name, file_name, question_count, created_at, updated_at
    FROM quizzes
    ORDER BY updated_at DESC, id DESC
    "#,
    )?;

    let quizzes = stmt
        .query_map([], |row| {
            Ok(QuizSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                file_name: row.get(2)?,
                question_count: row.get::<_, i64>(3)? as usize,
                created_at: parse_date(row.get::<_, String>(4)?, 4)?,
                updated_at: parse_date(row.get::<_, String>(5)?, 5)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(quizzes)
}

pub fn get_quiz(conn: &Connection, id: i64) -> Result<Option<StoredQuiz>> {
    conn.query_row(
        r#"
    SELECT id, name, file_name, question_count, created_at, updated_at, payload
    FROM quizzes WHERE id = ?1
    "#,
        params![id],
        |row| {
            let payload: String = row.get(6)?;
            let questions: QuestionBank = serde_json::from_str(&payload)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
            Ok(StoredQuiz {
                id: row.get(0)?,
                name: row.get(1)?,
                file_name: row.get(2)?,
                question_count: row.get::<_, i64>(3)? as usize,
                created_at: parse_date(row.get::<_, String>(4)?, 4)?,
                updated_at: parse_date(row.get::<_, String>(5)?, 5)?,
                questions,
            })
        },
    )
    .optional()
}

pub fn delete_quiz(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM quizzes WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Rename a quiz. History records keep the name they were recorded under.
pub fn rename_quiz(conn: &Connection, id: i64, new_name: &str) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE quizzes SET name = ?1, updated_at = ?2 WHERE id = ?3",
        params![new_name, Utc::now().to_rfc3339(), id],
    )?;
    Ok(affected > 0)
}

pub(crate) fn parse_date(raw: String, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
