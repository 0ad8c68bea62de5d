//! Numeral quiz endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use kana_core::quiz::ChoiceQuiz;

use crate::error::{ApiError, Result};
use crate::models::{QuizAnswerRequest, QuizView};
use crate::AppState;

fn view(id: Uuid, quiz: &ChoiceQuiz) -> QuizView {
    QuizView {
        id,
        question: quiz.question().clone(),
        feedback: quiz.feedback().clone(),
        score: quiz.score().into(),
    }
}

/// POST /api/quiz
pub async fn create(State(state): State<AppState>) -> Result<Json<QuizView>> {
    let quiz = ChoiceQuiz::new();
    let id = Uuid::new_v4();
    let body = view(id, &quiz);
    state.quizzes.write().await.insert(id, quiz);
    tracing::info!(%id, "quiz created");
    Ok(Json(body))
}

/// GET /api/quiz/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let quizzes = state.quizzes.read().await;
    let quiz = quizzes
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id}")))?;
    Ok(Json(view(id, quiz)))
}

/// POST /api/quiz/{id}/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuizAnswerRequest>,
) -> Result<Json<QuizView>> {
    let mut quizzes = state.quizzes.write().await;
    let quiz = quizzes
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id}")))?;
    if !quiz
        .question()
        .options
        .iter()
        .any(|option| option.digit == payload.digit)
    {
        return Err(ApiError::BadRequest(format!(
            "{} is not one of the options",
            payload.digit
        )));
    }
    quiz.answer(payload.digit);
    Ok(Json(view(id, quiz)))
}

/// POST /api/quiz/{id}/next
pub async fn next(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let mut quizzes = state.quizzes.write().await;
    let quiz = quizzes
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id}")))?;
    quiz.next_question();
    Ok(Json(view(id, quiz)))
}

/// DELETE /api/quiz/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state
        .quizzes
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id}")))?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
