//! Request and response types for the backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kana_core::quiz::ChoiceQuestion;
use kana_core::session::{Phase, PracticeMode, Session};
use kana_core::types::{Feedback, ItemId, Score, ScriptFilter};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub script: ScriptFilter,
    pub mode: PracticeMode,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeScriptRequest {
    pub script: ScriptFilter,
}

#[derive(Debug, Deserialize)]
pub struct ToggleSelectionRequest {
    pub id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswerRequest {
    pub digit: u8,
}

#[derive(Debug, Deserialize)]
pub struct WordQuery {
    #[serde(rename = "type", default)]
    pub script: ScriptFilter,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub script: ScriptFilter,
}

/// Score with the derived percentage, for display.
#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
}

impl From<Score> for ScoreView {
    fn from(score: Score) -> Self {
        Self {
            correct: score.correct,
            total: score.total,
            percent: score.percent(),
        }
    }
}

/// Snapshot of a practice session returned by every session endpoint.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub script: ScriptFilter,
    pub mode: PracticeMode,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub feedback: Feedback,
    pub score: ScoreView,
    pub pool_size: usize,
    pub mastered: usize,
    pub mistakes: usize,
    pub selection: Vec<ItemId>,
    pub can_start_curated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_advance_at: Option<DateTime<Utc>>,
}

impl SessionView {
    pub fn snapshot(id: Uuid, script: ScriptFilter, session: &Session) -> Self {
        let mut selection: Vec<ItemId> = session.selection().iter().cloned().collect();
        selection.sort();
        Self {
            id,
            script,
            mode: session.mode(),
            phase: session.phase(),
            prompt: session.current_item().map(|item| item.prompt.clone()),
            feedback: session.feedback().clone(),
            score: session.score().into(),
            pool_size: session.pool().len(),
            mastered: session.mastered_count(),
            mistakes: session.mistake_ids().len(),
            selection,
            can_start_curated: session.can_start_curated(),
            auto_advance_at: session.auto_advance_deadline(),
        }
    }
}

/// Snapshot of a numeral quiz.
#[derive(Debug, Serialize)]
pub struct QuizView {
    pub id: Uuid,
    pub question: ChoiceQuestion,
    pub feedback: Feedback,
    pub score: ScoreView,
}
