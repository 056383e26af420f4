//! Bank upload, the downloadable template, and the saved-quiz store.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ensure_session;
use crate::db;
use crate::error::{AppError, ConfigError};
use crate::export;
use crate::loader;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBankPayload {
  pub file_name: String,
  pub questions: Value,
}

/// POST /bank - parse a raw bank and install it for this session.
/// A malformed file leaves the session untouched.
pub async fn upload_bank(
  State(state): State<AppState>,
  jar: CookieJar,
  Json(payload): Json<UploadBankPayload>,
) -> Result<impl IntoResponse, AppError> {
  let (jar, sid) = ensure_session(jar);
  let (questions, report) = loader::load_bank_value(&payload.questions)?;

  tracing::info!(
    "loaded {} questions from {} ({} dropped)",
    report.loaded,
    payload.file_name,
    report.dropped.len()
  );

  let mut session = state.sessions.get(&sid);
  session.load_bank(questions, payload.file_name.clone());
  state.sessions.update(&sid, session);

  Ok((
    jar,
    Json(json!({
      "fileName": payload.file_name,
      "loaded": report.loaded,
      "dropped": report.dropped,
    })),
  ))
}

/// GET /bank/template - sample bank showing every recognized field.
pub async fn download_template() -> impl IntoResponse {
  let body = serde_json::to_string_pretty(&export::template_bank()).unwrap_or_default();
  (
    [
      (header::CONTENT_TYPE, "application/json".to_string()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", export::TEMPLATE_FILE_NAME),
      ),
    ],
    body,
  )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizPayload {
  /// Defaults to the source file name with its extension stripped.
  #[serde(default)]
  pub name: Option<String>,
}

/// POST /quizzes - persist the session's pending bank under a name.
pub async fn save_quiz(
  State(state): State<AppState>,
  jar: CookieJar,
  Json(payload): Json<SaveQuizPayload>,
) -> Result<impl IntoResponse, AppError> {
  let (jar, sid) = ensure_session(jar);
  let session = state.sessions.get(&sid);
  let (questions, file_name) = session.pending_bank()?;

  let name = match payload.name.as_deref().map(str::trim) {
    Some("") => return Err(ConfigError("Quiz name cannot be empty".into()).into()),
    Some(name) => name.to_string(),
    None => default_quiz_name(file_name),
  };

  let conn = db::try_lock(&state.pool)?;
  let id = db::save_quiz(&conn, &name, file_name, questions)?;

  Ok((
    jar,
    Json(json!({ "id": id, "name": name, "questionCount": questions.len() })),
  ))
}

fn default_quiz_name(file_name: &str) -> String {
  match file_name.rsplit_once('.') {
    Some((stem, _)) if !stem.is_empty() => stem.to_string(),
    _ => file_name.to_string(),
  }
}

/// GET /quizzes - metadata listing, newest update first.
pub async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.pool)?;
  let quizzes = db::list_quizzes(&conn)?;
  Ok(Json(json!({ "quizzes": quizzes })))
}

/// POST /quizzes/{id}/load - install a saved quiz as this session's
/// pending bank. The quiz name becomes the session's bank title.
pub async fn load_quiz(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
  let (jar, sid) = ensure_session(jar);

  let quiz = {
    let conn = db::try_lock(&state.pool)?;
    db::get_quiz(&conn, id)?.ok_or(AppError::NotFound("quiz"))?
  };

  let mut session = state.sessions.get(&sid);
  session.load_bank(quiz.questions, quiz.name.clone());
  state.sessions.update(&sid, session);

  Ok((
    jar,
    Json(json!({ "id": quiz.id, "name": quiz.name, "questionCount": quiz.question_count })),
  ))
}

/// DELETE /quizzes/{id}
pub async fn delete_quiz(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.pool)?;
  if !db::delete_quiz(&conn, id)? {
    return Err(AppError::NotFound("quiz"));
  }
  Ok(Json(json!({ "deleted": id })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameQuizPayload {
  pub new_name: String,
}

/// POST /quizzes/{id}/rename - history records keep the name they were
/// recorded under.
pub async fn rename_quiz(
  State(state): State<AppState>,
  Path(id): Path<i64>,
  Json(payload): Json<RenameQuizPayload>,
) -> Result<Json<Value>, AppError> {
  let new_name = payload.new_name.trim().to_string();
  if new_name.is_empty() {
    return Err(ConfigError("Quiz name cannot be empty".into()).into());
  }

  let conn = db::try_lock(&state.pool)?;
  if !db::rename_quiz(&conn, id, &new_name)? {
    return Err(AppError::NotFound("quiz"));
  }

  Ok(Json(json!({ "id": id, "name": new_name })))
}
