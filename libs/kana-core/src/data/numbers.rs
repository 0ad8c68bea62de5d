//! Numeral reference table (1 through 10).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One numeral with its kanji and alternate readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberEntry {
    pub digit: u8,
    pub kanji: &'static str,
    pub readings: &'static [&'static str],
    pub romaji: &'static [&'static str],
}

/// Facet of a numeral shown in a question or answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCategory {
    Digit,
    Kanji,
    Reading,
    Romaji,
}

/// Categories used by the matching quiz. Romaji stays chart-only.
pub const QUIZ_CATEGORIES: &[NumberCategory] = &[
    NumberCategory::Digit,
    NumberCategory::Kanji,
    NumberCategory::Reading,
];

pub const NUMBERS: &[NumberEntry] = &[
    NumberEntry { digit: 1, kanji: "一", readings: &["いち"], romaji: &["ichi"] },
    NumberEntry { digit: 2, kanji: "二", readings: &["に"], romaji: &["ni"] },
    NumberEntry { digit: 3, kanji: "三", readings: &["さん"], romaji: &["san"] },
    NumberEntry { digit: 4, kanji: "四", readings: &["よん", "し"], romaji: &["yon", "shi"] },
    NumberEntry { digit: 5, kanji: "五", readings: &["ご"], romaji: &["go"] },
    NumberEntry { digit: 6, kanji: "六", readings: &["ろく"], romaji: &["roku"] },
    NumberEntry { digit: 7, kanji: "七", readings: &["なな", "しち"], romaji: &["nana", "shichi"] },
    NumberEntry { digit: 8, kanji: "八", readings: &["はち"], romaji: &["hachi"] },
    NumberEntry { digit: 9, kanji: "九", readings: &["きゅう", "く"], romaji: &["kyuu", "ku"] },
    NumberEntry { digit: 10, kanji: "十", readings: &["じゅう"], romaji: &["juu"] },
];

pub fn entry(digit: u8) -> Option<&'static NumberEntry> {
    NUMBERS.iter().find(|n| n.digit == digit)
}

/// Full display text for a category, all readings joined. Chart view.
pub fn display_text(entry: &NumberEntry, category: NumberCategory) -> String {
    match category {
        NumberCategory::Digit => entry.digit.to_string(),
        NumberCategory::Kanji => entry.kanji.to_string(),
        NumberCategory::Reading => entry.readings.join(" / "),
        NumberCategory::Romaji => entry.romaji.join(" / "),
    }
}

/// One randomly chosen reading for a category. Quiz view shows a
/// single reading at a time.
pub fn random_display_text<R: Rng>(
    entry: &NumberEntry,
    category: NumberCategory,
    rng: &mut R,
) -> String {
    match category {
        NumberCategory::Digit => entry.digit.to_string(),
        NumberCategory::Kanji => entry.kanji.to_string(),
        NumberCategory::Reading => entry
            .readings
            .choose(rng)
            .copied()
            .unwrap_or(entry.readings[0])
            .to_string(),
        NumberCategory::Romaji => entry
            .romaji
            .choose(rng)
            .copied()
            .unwrap_or(entry.romaji[0])
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn table_covers_one_through_ten() {
        assert_eq!(NUMBERS.len(), 10);
        for (idx, entry) in NUMBERS.iter().enumerate() {
            assert_eq!(entry.digit as usize, idx + 1);
            assert!(!entry.readings.is_empty());
            assert_eq!(entry.readings.len(), entry.romaji.len());
        }
    }

    #[test]
    fn display_text_joins_alternates() {
        let seven = entry(7).unwrap();
        assert_eq!(display_text(seven, NumberCategory::Reading), "なな / しち");
        assert_eq!(display_text(seven, NumberCategory::Romaji), "nana / shichi");
        assert_eq!(display_text(seven, NumberCategory::Digit), "7");
    }

    #[test]
    fn random_display_text_picks_a_known_alternate() {
        let mut rng = StdRng::seed_from_u64(7);
        let four = entry(4).unwrap();
        for _ in 0..20 {
            let text = random_display_text(four, NumberCategory::Reading, &mut rng);
            assert!(four.readings.contains(&text.as_str()));
        }
    }
}
