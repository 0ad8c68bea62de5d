//! Answer matching for typed practice.

use serde::{Deserialize, Serialize};

use crate::romaji;
use crate::types::Item;

/// Which rule accepted the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Trimmed, case-folded equality against a canonical answer.
    Exact,
    /// Equality after romanization normalization of both sides.
    Normalized,
    /// Input converted to kana equals the prompt, or the prompt was
    /// typed verbatim. Only applies to kana prompts.
    Script,
}

/// Result of comparing a typed answer to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// First rule that accepted, `None` on a miss.
    pub rule: Option<MatchRule>,
}

impl MatchResult {
    fn miss() -> Self {
        Self {
            is_correct: false,
            rule: None,
        }
    }

    fn hit(rule: MatchRule) -> Self {
        Self {
            is_correct: true,
            rule: Some(rule),
        }
    }
}

/// Compare typed input against an item's canonical answers.
///
/// Rules apply in order and the first hit wins; no rule matching is a
/// plain incorrect answer, never an error.
pub fn match_answer(input: &str, item: &Item) -> MatchResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return MatchResult::miss();
    }

    let folded = trimmed.to_lowercase();
    if item
        .answers
        .iter()
        .any(|answer| answer.trim().to_lowercase() == folded)
    {
        return MatchResult::hit(MatchRule::Exact);
    }

    let normalized = romaji::normalize(trimmed);
    if item
        .answers
        .iter()
        .any(|answer| romaji::normalize(answer) == normalized)
    {
        return MatchResult::hit(MatchRule::Normalized);
    }

    if item.is_kana_prompt() {
        if trimmed == item.prompt {
            return MatchResult::hit(MatchRule::Script);
        }
        let prompt_hiragana = romaji::katakana_to_hiragana(&item.prompt);
        let input_hiragana = romaji::to_hiragana(trimmed);
        if input_hiragana == prompt_hiragana {
            return MatchResult::hit(MatchRule::Script);
        }
    }

    MatchResult::miss()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Script;

    fn shichi() -> Item {
        Item::new("7", "七", vec!["shichi".to_string(), "nana".to_string()])
    }

    fn shi_glyph() -> Item {
        Item::new("し", "し", vec!["shi".to_string()]).with_script(Script::Hiragana)
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(match_answer("shichi", &shichi()).is_correct);
        let result = match_answer("SHICHI", &shichi());
        assert!(result.is_correct);
        assert_eq!(result.rule, Some(MatchRule::Exact));
    }

    #[test]
    fn normalization_absorbs_separators() {
        for input in ["shi-chi", "shi'chi", "shi chi"] {
            let result = match_answer(input, &shichi());
            assert!(result.is_correct, "{input} should match");
            assert_eq!(result.rule, Some(MatchRule::Normalized));
        }
    }

    #[test]
    fn alternate_canonical_answer_matches() {
        assert!(match_answer("nana", &shichi()).is_correct);
    }

    #[test]
    fn uncovered_spelling_stays_incorrect() {
        // No rule folds sh to s for a non-kana prompt.
        let result = match_answer("sichi", &shichi());
        assert!(!result.is_correct);
        assert_eq!(result.rule, None);
    }

    #[test]
    fn macron_and_doubled_vowel_are_equivalent() {
        let ten = Item::new("10", "十", vec!["juu".to_string()]);
        assert!(match_answer("jū", &ten).is_correct);
        assert!(match_answer("ju", &ten).is_correct);
    }

    #[test]
    fn kana_prompt_accepts_script_equivalents() {
        // Nihon-shiki spelling converts to the same glyph.
        let result = match_answer("si", &shi_glyph());
        assert!(result.is_correct);
        assert_eq!(result.rule, Some(MatchRule::Script));

        // Typing the glyph itself is accepted too.
        assert!(match_answer("し", &shi_glyph()).is_correct);
    }

    #[test]
    fn katakana_prompt_accepts_romaji_via_folding() {
        let katakana_shi =
            Item::new("シ", "シ", vec!["shi".to_string()]).with_script(Script::Katakana);
        let result = match_answer("si", &katakana_shi);
        assert!(result.is_correct);
        assert_eq!(result.rule, Some(MatchRule::Script));
    }

    #[test]
    fn script_rule_never_fires_for_plain_prompts() {
        // "7" typed back at a numeral is not an answer.
        assert!(!match_answer("七", &shichi()).is_correct);
    }

    #[test]
    fn empty_and_whitespace_input_never_match() {
        assert!(!match_answer("", &shichi()).is_correct);
        assert!(!match_answer("   ", &shichi()).is_correct);
    }

    #[test]
    fn matching_is_stable_under_normalization() {
        // Canonical inputs give the same verdict before and after
        // being normalized themselves.
        for input in ["shichi", "nana", "sichi"] {
            let direct = match_answer(input, &shichi()).is_correct;
            let renormalized = match_answer(&romaji::normalize(input), &shichi()).is_correct;
            assert_eq!(direct, renormalized, "verdict changed for {input}");
        }
    }
}
