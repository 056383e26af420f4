//! HTTP surface: a JSON API over the engine, the quiz store, and the
//! result history. Every handler resolves the caller's engine session
//! from the session cookie, minting one when absent.

pub mod bank;
pub mod history;

use axum::Router;
use axum::routing::{delete, get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tower_http::trace::TraceLayer;

use crate::config;
use crate::session::generate_session_id;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
  Router::new()
    .route("/bank", post(bank::upload_bank))
    .route("/bank/template", get(bank::download_template))
    .route("/quizzes", get(bank::list_quizzes).post(bank::save_quiz))
    .route("/quizzes/{id}", delete(bank::delete_quiz))
    .route("/quizzes/{id}/load", post(bank::load_quiz))
    .route("/quizzes/{id}/rename", post(bank::rename_quiz))
    .route("/test", get(test::view))
    .route("/test/start", post(test::start_test))
    .route("/test/answer", post(test::select_answer))
    .route("/test/submit-answer", post(test::submit_answer))
    .route("/test/navigate", post(test::navigate))
    .route("/test/jump", post(test::jump))
    .route("/test/flip", post(test::flip))
    .route("/test/tick", post(test::tick))
    .route("/test/submit", post(test::submit))
    .route("/test/exit", post(test::exit))
    .route("/test/export", get(test::export_markdown))
    .route("/results", get(history::list_results))
    .route("/results/quiz-names", get(history::quiz_names))
    .route("/results/undo", post(history::undo_delete))
    .route("/results/{id}", get(history::get_result).delete(history::delete_result))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Resolve the engine session id from the cookie jar, setting a fresh
/// cookie when the caller does not have one yet.
pub(crate) fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
  if let Some(cookie) = jar.get(config::SESSION_COOKIE) {
    let id = cookie.value().to_string();
    (jar, id)
  } else {
    let id = generate_session_id();
    let cookie = Cookie::build((config::SESSION_COOKIE, id.clone()))
      .path("/")
      .http_only(true)
      .secure(false)
      .build();
    (jar.add(cookie), id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use axum_test::TestServer;
  use serde_json::{Value, json};

  fn server() -> (TestEnv, TestServer) {
    let env = TestEnv::new();
    let state = AppState::new(env.pool());
    let server = TestServer::builder()
      .save_cookies()
      .build(app(state))
      .expect("build test server");
    (env, server)
  }

  fn sample_bank() -> Value {
    json!([
      {
        "text": "First?",
        "choices": [
          { "letter": "A.", "content": "yes", "is_correct": true },
          { "letter": "B.", "content": "no", "is_correct": false }
        ]
      },
      {
        "text": "Second?",
        "choices": [
          { "letter": "A.", "content": "yes", "is_correct": true },
          { "letter": "B.", "content": "no", "is_correct": false }
        ]
      }
    ])
  }

  async fn upload(server: &TestServer) {
    server
      .post("/bank")
      .json(&json!({ "fileName": "sample.json", "questions": sample_bank() }))
      .await
      .assert_status_ok();
  }

  async fn start(server: &TestServer, mode: &str) {
    server
      .post("/test/start")
      .json(&json!({
        "mode": mode,
        "questionSelection": "range",
        "rangeFrom": 1,
        "rangeTo": 2,
        "seed": 1
      }))
      .await
      .assert_status_ok();
  }

  #[tokio::test]
  async fn test_full_practice_round_trip_persists_result() {
    let (_env, server) = server();
    upload(&server).await;
    start(&server, "practice").await;

    for _ in 0..2 {
      server.post("/test/answer").json(&json!({ "letter": "A." })).await.assert_status_ok();
      server.post("/test/submit-answer").json(&json!({})).await.assert_status_ok();
      server.post("/test/navigate").json(&json!({ "delta": 1 })).await.assert_status_ok();
    }

    let response = server.post("/test/submit").json(&json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["result"]["score"], 2);
    assert_eq!(body["result"]["percent"], 100.0);

    let history: Value = server.get("/results").await.json();
    let records = history["results"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["quizName"], "sample.json");
    assert_eq!(records[0]["passed"], true);
    // Listings carry the compact duration form alongside the raw seconds.
    assert!(records[0]["duration"].as_str().unwrap().ends_with('s'));
  }

  #[tokio::test]
  async fn test_view_follows_phase() {
    let (_env, server) = server();

    let idle: Value = server.get("/test").await.json();
    assert_eq!(idle["phase"], "idle");

    upload(&server).await;
    let pending: Value = server.get("/test").await.json();
    assert_eq!(pending["phase"], "configPending");
    assert_eq!(pending["questionCount"], 2);

    start(&server, "timed").await;
    let active: Value = server.get("/test").await.json();
    assert_eq!(active["phase"], "active");
    assert_eq!(active["currentIndex"], 0);
    assert_eq!(active["remainingSecs"], 3600);
  }

  #[tokio::test]
  async fn test_operations_without_session_conflict() {
    let (_env, server) = server();
    let response = server.post("/test/tick").json(&json!({})).await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn test_bad_bank_is_rejected() {
    let (_env, server) = server();
    let response = server
      .post("/bank")
      .json(&json!({ "fileName": "bad.json", "questions": {} }))
      .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "JSON must be an array of questions");
  }

  #[tokio::test]
  async fn test_template_download_loads_back() {
    let (_env, server) = server();
    let response = server.get("/bank/template").await;
    response.assert_status_ok();
    let template: Value = response.json();
    assert_eq!(template.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_quiz_save_load_cycle() {
    let (_env, server) = server();
    upload(&server).await;

    let saved: Value = server
      .post("/quizzes")
      .json(&json!({ "name": "aws-saa" }))
      .await
      .json();
    let id = saved["id"].as_i64().unwrap();

    let listing: Value = server.get("/quizzes").await.json();
    assert_eq!(listing["quizzes"][0]["id"].as_i64().unwrap(), id);
    assert_eq!(listing["quizzes"][0]["name"], "aws-saa");
    assert_eq!(listing["quizzes"][0]["questionCount"], 2);

    server.post("/test/exit").json(&json!({})).await.assert_status_ok();
    server
      .post(&format!("/quizzes/{}/load", id))
      .json(&json!({}))
      .await
      .assert_status_ok();

    let pending: Value = server.get("/test").await.json();
    assert_eq!(pending["phase"], "configPending");
    assert_eq!(pending["fileName"], "aws-saa");
  }

  #[tokio::test]
  async fn test_saving_an_existing_name_keeps_both_quizzes() {
    let (_env, server) = server();
    upload(&server).await;

    let first: Value = server.post("/quizzes").json(&json!({ "name": "dup" })).await.json();
    let second: Value = server.post("/quizzes").json(&json!({ "name": "dup" })).await.json();
    assert_ne!(first["id"].as_i64().unwrap(), second["id"].as_i64().unwrap());

    let listing: Value = server.get("/quizzes").await.json();
    assert_eq!(listing["quizzes"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_quiz_rename_by_id() {
    let (_env, server) = server();
    upload(&server).await;

    let saved: Value = server.post("/quizzes").json(&json!({})).await.json();
    let id = saved["id"].as_i64().unwrap();
    // No explicit name: the file name with its extension stripped.
    assert_eq!(saved["name"], "sample");

    server
      .post(&format!("/quizzes/{}/rename", id))
      .json(&json!({ "newName": "renamed" }))
      .await
      .assert_status_ok();

    let listing: Value = server.get("/quizzes").await.json();
    assert_eq!(listing["quizzes"][0]["name"], "renamed");

    let missing = server
      .post("/quizzes/999/rename")
      .json(&json!({ "newName": "x" }))
      .await;
    missing.assert_status(axum::http::StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_delete_then_undo_restores_record() {
    let (_env, server) = server();
    upload(&server).await;
    start(&server, "practice").await;
    server.post("/test/answer").json(&json!({ "letter": "A." })).await.assert_status_ok();
    server.post("/test/submit").json(&json!({})).await.assert_status_ok();

    let history: Value = server.get("/results").await.json();
    let id = history["results"][0]["id"].as_i64().unwrap();

    server.delete(&format!("/results/{}", id)).await.assert_status_ok();
    let emptied: Value = server.get("/results").await.json();
    assert!(emptied["results"].as_array().unwrap().is_empty());

    server.post("/results/undo").json(&json!({})).await.assert_status_ok();
    let restored: Value = server.get("/results").await.json();
    assert_eq!(restored["results"][0]["id"].as_i64().unwrap(), id);

    // The undo slot is single-shot.
    let again = server.post("/results/undo").json(&json!({})).await;
    again.assert_status(axum::http::StatusCode::NOT_FOUND);
  }
}
