//! Shared helpers for API tests.

use axum_test::TestServer;

use kana_trainer_backend::services::jisho::JishoClient;
use kana_trainer_backend::{app_router, AppState};

/// In-process server over fresh state. No network is needed unless a
/// test actually hits the word-lookup endpoint.
pub fn server() -> TestServer {
    let state = AppState::new(JishoClient::new());
    TestServer::new(app_router(state)).unwrap()
}

/// Canonical romaji for a kana glyph, straight from the static table.
pub fn romaji_for(glyph: &str) -> String {
    let pool = kana_core::data::kana::pool(kana_core::ScriptFilter::Mix).unwrap();
    pool.get(&kana_core::ItemId::from(glyph))
        .unwrap_or_else(|| panic!("unknown glyph {glyph}"))
        .primary_answer()
        .to_string()
}
