//! Jisho dictionary lookup.
//!
//! The practice engine has no word list of its own; this service picks
//! a seed English word, asks the Jisho API for entries, and keeps
//! retrying (bounded) until an entry matches the requested script.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use kana_core::romaji::{self, ScriptKind};
use kana_core::ScriptFilter;

use crate::error::{ApiError, Result};

const JISHO_BASE_URL: &str = "https://jisho.org/api/v1/search/words";

/// Bounded retry budget for rejecting wrong-script results.
const LOOKUP_RETRIES: usize = 10;

/// Common everyday words usually written in hiragana.
const HIRAGANA_SEEDS: &[&str] = &[
    "cat", "dog", "water", "fire", "person", "hand", "eye", "foot",
    "eat", "drink", "book", "school", "house", "car", "tree", "flower",
    "rain", "snow", "sun", "moon", "day", "night", "morning", "evening",
    "mother", "father", "child", "friend", "teacher", "student",
    "big", "small", "good", "bad", "hot", "cold", "new", "old",
    "red", "blue", "white", "black", "color", "music", "love", "time",
];

/// Loanwords, usually written in katakana.
const KATAKANA_SEEDS: &[&str] = &[
    "coffee", "tea", "beer", "wine", "cake", "ice cream", "chocolate",
    "computer", "internet", "email", "camera", "video", "game", "smartphone",
    "bus", "taxi", "truck", "hotel", "restaurant", "cafe", "menu",
    "pen", "notebook", "desk", "table", "chair", "door", "window",
    "shirt", "pants", "dress", "shoes", "bag", "hat", "watch",
    "America", "France", "Italy", "Canada", "Australia", "India",
    "television", "radio", "news", "sports", "tennis", "soccer", "baseball",
];

/// A dictionary word ready for practice.
#[derive(Debug, Clone, Serialize)]
pub struct WordEntry {
    pub kana: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    pub meanings: String,
    pub romaji: String,
    pub script: ScriptKind,
}

#[derive(Debug, Deserialize)]
struct JishoResponse {
    #[serde(default)]
    data: Vec<JishoEntry>,
}

#[derive(Debug, Deserialize)]
struct JishoEntry {
    #[serde(default)]
    japanese: Vec<JishoJapanese>,
    #[serde(default)]
    senses: Vec<JishoSense>,
}

#[derive(Debug, Deserialize)]
struct JishoJapanese {
    word: Option<String>,
    reading: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JishoSense {
    #[serde(default)]
    english_definitions: Vec<String>,
}

/// Client for the Jisho word search API.
#[derive(Debug, Clone)]
pub struct JishoClient {
    http: reqwest::Client,
    base_url: String,
}

impl JishoClient {
    pub fn new() -> Self {
        Self::with_base_url(JISHO_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch one random word matching the requested script. Entries
    /// in the wrong script are rejected and retried up to the budget;
    /// after that the last candidate is returned rather than failing.
    pub async fn fetch_word(&self, filter: ScriptFilter) -> Result<WordEntry> {
        let mut last_candidate = None;

        for attempt in 0..LOOKUP_RETRIES {
            let entry = match self.fetch_candidate(filter).await {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "jisho lookup failed");
                    return Err(err);
                }
            };

            if script_matches(filter, entry.script) {
                return Ok(entry);
            }
            tracing::debug!(
                attempt,
                kana = %entry.kana,
                wanted = filter.as_str(),
                "rejecting wrong-script word"
            );
            last_candidate = Some(entry);
        }

        last_candidate.ok_or_else(|| {
            ApiError::NoWord(format!("no {} word found", filter.as_str()))
        })
    }

    async fn fetch_candidate(&self, filter: ScriptFilter) -> Result<Option<WordEntry>> {
        let seed = pick_seed(filter);
        let response: JishoResponse = self
            .http
            .get(&self.base_url)
            .query(&[("keyword", seed)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidates: Vec<&JishoEntry> = response
            .data
            .iter()
            .filter(|entry| entry.japanese.iter().any(|j| j.reading.is_some()))
            .take(10)
            .collect();

        let picked = {
            let mut rng = rand::thread_rng();
            candidates.choose(&mut rng).copied()
        };
        Ok(picked.map(to_word_entry))
    }
}

impl Default for JishoClient {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_seed(filter: ScriptFilter) -> &'static str {
    let mut rng = rand::thread_rng();
    match filter {
        ScriptFilter::Hiragana => HIRAGANA_SEEDS.choose(&mut rng).copied().unwrap_or("cat"),
        ScriptFilter::Katakana => KATAKANA_SEEDS.choose(&mut rng).copied().unwrap_or("coffee"),
        ScriptFilter::Mix => {
            if rng.gen_bool(0.5) {
                HIRAGANA_SEEDS.choose(&mut rng).copied().unwrap_or("cat")
            } else {
                KATAKANA_SEEDS.choose(&mut rng).copied().unwrap_or("coffee")
            }
        }
    }
}

/// A mix request accepts anything kana; single-script requests reject
/// words written purely in the other script.
fn script_matches(filter: ScriptFilter, script: ScriptKind) -> bool {
    match filter {
        ScriptFilter::Hiragana => script != ScriptKind::Katakana,
        ScriptFilter::Katakana => script != ScriptKind::Hiragana,
        ScriptFilter::Mix => true,
    }
}

fn to_word_entry(entry: &JishoEntry) -> WordEntry {
    let japanese = entry
        .japanese
        .iter()
        .find(|j| j.reading.is_some())
        .or_else(|| entry.japanese.first());
    let kana = japanese
        .and_then(|j| j.reading.clone().or_else(|| j.word.clone()))
        .unwrap_or_default();
    let kanji = japanese
        .and_then(|j| j.word.clone())
        .filter(|word| word != &kana);

    let meanings = entry
        .senses
        .iter()
        .take(2)
        .map(|sense| sense.english_definitions.join(", "))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    let meanings = if meanings.is_empty() {
        "No definition available".to_string()
    } else {
        meanings
    };

    WordEntry {
        romaji: romaji::to_romaji(&kana),
        script: romaji::classify(&kana),
        kana,
        kanji,
        meanings,
    }
}
