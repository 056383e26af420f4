//! Result history: filtered listing, detail view, and delete with a
//! short single-shot undo window.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};

use crate::db::{self, ResultFilter};
use crate::domain::format_compact;
use crate::error::AppError;
use crate::state::{AppState, PendingUndo};

/// GET /results - newest first; quizName, passed, and mode filters are
/// conjunctive. Each record carries its duration in the compact listing
/// form ("2m 5s").
pub async fn list_results(
  State(state): State<AppState>,
  Query(filter): Query<ResultFilter>,
) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.pool)?;
  let records = db::list_results(&conn, &filter)?;

  let mut results = Vec::with_capacity(records.len());
  for record in records {
    let duration = format_compact(record.duration_seconds);
    let mut value =
      serde_json::to_value(&record).map_err(|e| AppError::Storage(e.to_string()))?;
    if let Value::Object(map) = &mut value {
      map.insert("duration".into(), Value::String(duration));
    }
    results.push(value);
  }

  Ok(Json(json!({ "results": results })))
}

/// GET /results/quiz-names - distinct names for filter dropdowns.
pub async fn quiz_names(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.pool)?;
  let names = db::quiz_names(&conn)?;
  Ok(Json(json!({ "quizNames": names })))
}

/// GET /results/{id}
pub async fn get_result(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.pool)?;
  let result = db::get_result(&conn, id)?.ok_or(AppError::NotFound("result"))?;
  Ok(Json(json!({ "result": result })))
}

/// DELETE /results/{id} - removes the record and arms the undo slot.
/// Deleting another record replaces the slot; only the latest deletion
/// can be restored.
pub async fn delete_result(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
  let record = {
    let conn = db::try_lock(&state.pool)?;
    db::delete_result(&conn, id)?.ok_or(AppError::NotFound("result"))?
  };

  let pending = PendingUndo::new(record);
  let expires_at = pending.expires_at;

  let mut slot = state
    .pending_undo
    .lock()
    .map_err(|_| AppError::Storage("undo state unavailable".into()))?;
  *slot = Some(pending);

  Ok(Json(json!({ "deleted": id, "undoExpiresAt": expires_at })))
}

/// POST /results/undo - restore the most recently deleted record if the
/// window has not elapsed. The slot is cleared either way.
pub async fn undo_delete(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
  let pending = {
    let mut slot = state
      .pending_undo
      .lock()
      .map_err(|_| AppError::Storage("undo state unavailable".into()))?;
    slot.take()
  };

  let Some(pending) = pending else {
    return Err(AppError::NotFound("deleted result"));
  };
  if pending.expired() {
    return Err(AppError::NotFound("deleted result"));
  }

  let conn = db::try_lock(&state.pool)?;
  db::restore_result(&conn, &pending.record)?;

  Ok(Json(json!({ "restored": pending.record.id })))
}
