//! Practice session endpoints.
//!
//! Sessions live in memory and are discarded on delete or restart;
//! there is no persistence across reloads. Every handler polls the
//! session's auto-advance deadline first so a timed advance observed
//! late behaves exactly like a manual one.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use kana_core::data::kana;
use kana_core::session::Session;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::{AppState, PracticeEntry};

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionView>> {
    let pool = kana::pool(payload.script)
        .map_err(|err| ApiError::Internal(format!("kana table invalid: {err}")))?;
    let session = Session::new(pool, payload.mode);
    let id = Uuid::new_v4();
    let view = SessionView::snapshot(id, payload.script, &session);

    state.sessions.write().await.insert(
        id,
        PracticeEntry {
            script: payload.script,
            session,
        },
    );
    tracing::info!(%id, script = payload.script.as_str(), "session created");
    Ok(Json(view))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |_| {}).await
}

/// POST /api/sessions/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SessionView>> {
    if payload.answer.trim().is_empty() {
        return Err(ApiError::BadRequest("answer must not be empty".to_string()));
    }
    with_session(&state, id, |entry| {
        entry.session.submit(&payload.answer, Utc::now());
    })
    .await
}

/// POST /api/sessions/{id}/skip
pub async fn skip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |entry| entry.session.skip()).await
}

/// POST /api/sessions/{id}/next
pub async fn next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |entry| entry.session.next()).await
}

/// PUT /api/sessions/{id}/script
pub async fn change_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeScriptRequest>,
) -> Result<Json<SessionView>> {
    let pool = kana::pool(payload.script)
        .map_err(|err| ApiError::Internal(format!("kana table invalid: {err}")))?;
    with_session(&state, id, |entry| {
        entry.script = payload.script;
        entry.session.set_pool(pool);
    })
    .await
}

/// POST /api/sessions/{id}/selection
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleSelectionRequest>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |entry| {
        entry.session.toggle_selection(&payload.id);
    })
    .await
}

/// POST /api/sessions/{id}/curated
pub async fn start_curated(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    if !entry.session.can_start_curated() {
        return Err(ApiError::BadRequest(
            "cannot start curated practice with an empty selection".to_string(),
        ));
    }
    entry.session.start_curated();
    Ok(Json(SessionView::snapshot(id, entry.script, &entry.session)))
}

/// POST /api/sessions/{id}/back
pub async fn back_to_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |entry| entry.session.back_to_selection()).await
}

/// POST /api/sessions/{id}/start-over
pub async fn start_over(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    with_session(&state, id, |entry| entry.session.start_over()).await
}

/// POST /api/sessions/{id}/practice-mistakes
pub async fn practice_mistakes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    if entry.session.mistake_ids().is_empty() {
        return Err(ApiError::BadRequest("no mistakes to practice".to_string()));
    }
    entry.session.practice_mistakes();
    Ok(Json(SessionView::snapshot(id, entry.script, &entry.session)))
}

/// DELETE /api/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    tracing::info!(%id, "session deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Poll the auto-advance timer, apply an action, snapshot the result.
async fn with_session<F>(state: &AppState, id: Uuid, action: F) -> Result<Json<SessionView>>
where
    F: FnOnce(&mut PracticeEntry),
{
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    entry.session.poll_auto_advance(Utc::now());
    action(entry);
    Ok(Json(SessionView::snapshot(id, entry.script, &entry.session)))
}
