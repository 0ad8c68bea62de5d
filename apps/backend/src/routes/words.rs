//! Word lookup endpoint.

use axum::extract::{Query, State};
use axum::Json;

use crate::error::Result;
use crate::models::WordQuery;
use crate::services::jisho::WordEntry;
use crate::AppState;

/// GET /api/words?type=hiragana|katakana|mix
///
/// Fetch failures surface as an error response the client can retry;
/// no session state is touched.
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<WordQuery>,
) -> Result<Json<WordEntry>> {
    let word = state.jisho.fetch_word(query.script).await?;
    Ok(Json(word))
}
