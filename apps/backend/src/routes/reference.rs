//! Reference chart endpoints (kana tables, numeral table).

use axum::extract::Query;
use axum::Json;
use serde::Serialize;

use kana_core::data::kana::{self, ChartRow};
use kana_core::data::numbers::{self, NumberCategory};
use kana_core::types::Script;

use crate::models::ChartQuery;

#[derive(Debug, Serialize)]
pub struct KanaChart {
    pub script: &'static str,
    pub rows: Vec<ChartRow>,
}

/// GET /api/kana?script=hiragana|katakana|mix
pub async fn kana_chart(Query(query): Query<ChartQuery>) -> Json<Vec<KanaChart>> {
    let charts = query
        .script
        .scripts()
        .iter()
        .map(|&script| KanaChart {
            script: match script {
                Script::Hiragana => "hiragana",
                Script::Katakana => "katakana",
            },
            rows: kana::chart_rows(script),
        })
        .collect();
    Json(charts)
}

#[derive(Debug, Serialize)]
pub struct NumberRow {
    pub digit: u8,
    pub kanji: String,
    pub reading: String,
    pub romaji: String,
}

/// GET /api/numbers
pub async fn number_chart() -> Json<Vec<NumberRow>> {
    let rows = numbers::NUMBERS
        .iter()
        .map(|entry| NumberRow {
            digit: entry.digit,
            kanji: entry.kanji.to_string(),
            reading: numbers::display_text(entry, NumberCategory::Reading),
            romaji: numbers::display_text(entry, NumberCategory::Romaji),
        })
        .collect();
    Json(rows)
}
