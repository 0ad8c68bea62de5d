//! Core types for the practice engine.

use serde::{Deserialize, Serialize};

/// Stable identity of a practice item.
///
/// Distinct from the displayed prompt: two items may share a canonical
/// answer (hiragana じ and ぢ both read "ji") but never an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kana script a glyph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Hiragana,
    Katakana,
}

/// Pool filter selected by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFilter {
    Hiragana,
    Katakana,
    Mix,
}

impl ScriptFilter {
    /// Scripts included by this filter.
    pub fn scripts(self) -> &'static [Script] {
        match self {
            Self::Hiragana => &[Script::Hiragana],
            Self::Katakana => &[Script::Katakana],
            Self::Mix => &[Script::Hiragana, Script::Katakana],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
            Self::Mix => "mix",
        }
    }
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self::Hiragana
    }
}

/// One unit of practice: a prompt plus its acceptable answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Displayed stimulus (glyph, word, or numeral representation).
    pub prompt: String,
    /// Canonical answers, ordered, at least one, all non-empty.
    pub answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
}

impl Item {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            id: ItemId::new(id),
            prompt: prompt.into(),
            answers,
            script: None,
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    /// First canonical answer, used in feedback messages.
    pub fn primary_answer(&self) -> &str {
        &self.answers[0]
    }

    /// Whether the prompt itself is written in kana.
    pub fn is_kana_prompt(&self) -> bool {
        self.script.is_some()
    }
}

/// Feedback shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "message")]
pub enum Feedback {
    Unanswered,
    Correct(String),
    Incorrect(String),
}

impl Feedback {
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Unanswered)
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::Unanswered
    }
}

/// Running session score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Percentage of correct answers, rounded; 0 when nothing answered yet.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.correct as f64 / self.total as f64 * 100.0).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_record_and_percent() {
        let mut score = Score::default();
        score.record(true);
        score.record(false);
        score.record(true);
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 3);
        assert_eq!(score.percent(), 67);
        assert!(score.correct <= score.total);
    }

    #[test]
    fn score_reset_clears_both_counters() {
        let mut score = Score::default();
        score.record(true);
        score.reset();
        assert_eq!(score, Score::default());
        assert_eq!(score.percent(), 0);
    }

    #[test]
    fn filter_scripts() {
        assert_eq!(ScriptFilter::Hiragana.scripts(), &[Script::Hiragana]);
        assert_eq!(ScriptFilter::Mix.scripts().len(), 2);
    }
}
