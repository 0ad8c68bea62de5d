//! Romanization normalization and kana/romaji conversion.
//!
//! Learners make systematic spelling choices (shi/si, tsu/tu, macron
//! vs doubled vowel), so the matcher never compares raw strings. The
//! leniency set here is a fixed policy: long-vowel variants collapse
//! to their short form, nothing else is folded.

use serde::{Deserialize, Serialize};

/// Script composition of a string, used to filter word-lookup results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    Hiragana,
    Katakana,
    Mixed,
    Other,
}

fn is_hiragana_char(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

fn is_katakana_char(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Classify a string by the kana scripts it contains.
pub fn classify(s: &str) -> ScriptKind {
    let has_hiragana = s.chars().any(is_hiragana_char);
    let has_katakana = s.chars().any(is_katakana_char);
    match (has_hiragana, has_katakana) {
        (true, false) => ScriptKind::Hiragana,
        (false, true) => ScriptKind::Katakana,
        (true, true) => ScriptKind::Mixed,
        (false, false) => ScriptKind::Other,
    }
}

/// Normalize a romanization for lenient comparison.
///
/// Lowercases, strips apostrophes/hyphens/whitespace, folds macron
/// vowels, then collapses long-vowel digraphs (ou/oo -> o, uu -> u,
/// ei -> e) until stable so the result is idempotent.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().to_lowercase().chars() {
        match c {
            '\'' | '\u{2019}' | '-' => {}
            c if c.is_whitespace() => {}
            'ā' => out.push('a'),
            'ē' => out.push('e'),
            'ī' => out.push('i'),
            'ō' => out.push('o'),
            'ū' => out.push('u'),
            c => out.push(c),
        }
    }

    loop {
        let collapsed = collapse_long_vowels(&out);
        if collapsed == out {
            return out;
        }
        out = collapsed;
    }
}

fn collapse_long_vowels(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let pair = (chars[i], chars.get(i + 1).copied());
        match pair {
            ('o', Some('u')) | ('o', Some('o')) => {
                out.push('o');
                i += 2;
            }
            ('u', Some('u')) => {
                out.push('u');
                i += 2;
            }
            ('e', Some('i')) => {
                out.push('e');
                i += 2;
            }
            (c, _) => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

struct Syllable {
    kana: &'static str,
    romaji: &'static str,
    alternates: &'static [&'static str],
}

const fn syl(
    kana: &'static str,
    romaji: &'static str,
    alternates: &'static [&'static str],
) -> Syllable {
    Syllable {
        kana,
        romaji,
        alternates,
    }
}

/// Hiragana syllabary with primary Hepburn spellings and the
/// nihon-shiki alternates learners commonly type.
const SYLLABLES: &[Syllable] = &[
    // Yoon digraphs first; lookups prefer the longest spelling anyway,
    // but to_romaji scans in order.
    syl("きゃ", "kya", &[]),
    syl("きゅ", "kyu", &[]),
    syl("きょ", "kyo", &[]),
    syl("しゃ", "sha", &["sya"]),
    syl("しゅ", "shu", &["syu"]),
    syl("しょ", "sho", &["syo"]),
    syl("ちゃ", "cha", &["tya"]),
    syl("ちゅ", "chu", &["tyu"]),
    syl("ちょ", "cho", &["tyo"]),
    syl("にゃ", "nya", &[]),
    syl("にゅ", "nyu", &[]),
    syl("にょ", "nyo", &[]),
    syl("ひゃ", "hya", &[]),
    syl("ひゅ", "hyu", &[]),
    syl("ひょ", "hyo", &[]),
    syl("みゃ", "mya", &[]),
    syl("みゅ", "myu", &[]),
    syl("みょ", "myo", &[]),
    syl("りゃ", "rya", &[]),
    syl("りゅ", "ryu", &[]),
    syl("りょ", "ryo", &[]),
    syl("ぎゃ", "gya", &[]),
    syl("ぎゅ", "gyu", &[]),
    syl("ぎょ", "gyo", &[]),
    syl("じゃ", "ja", &["jya", "zya"]),
    syl("じゅ", "ju", &["jyu", "zyu"]),
    syl("じょ", "jo", &["jyo", "zyo"]),
    syl("びゃ", "bya", &[]),
    syl("びゅ", "byu", &[]),
    syl("びょ", "byo", &[]),
    syl("ぴゃ", "pya", &[]),
    syl("ぴゅ", "pyu", &[]),
    syl("ぴょ", "pyo", &[]),
    // Vowels
    syl("あ", "a", &[]),
    syl("い", "i", &[]),
    syl("う", "u", &[]),
    syl("え", "e", &[]),
    syl("お", "o", &[]),
    // K
    syl("か", "ka", &[]),
    syl("き", "ki", &[]),
    syl("く", "ku", &[]),
    syl("け", "ke", &[]),
    syl("こ", "ko", &[]),
    // S
    syl("さ", "sa", &[]),
    syl("し", "shi", &["si"]),
    syl("す", "su", &[]),
    syl("せ", "se", &[]),
    syl("そ", "so", &[]),
    // T
    syl("た", "ta", &[]),
    syl("ち", "chi", &["ti"]),
    syl("つ", "tsu", &["tu"]),
    syl("て", "te", &[]),
    syl("と", "to", &[]),
    // N
    syl("な", "na", &[]),
    syl("に", "ni", &[]),
    syl("ぬ", "nu", &[]),
    syl("ね", "ne", &[]),
    syl("の", "no", &[]),
    // H
    syl("は", "ha", &[]),
    syl("ひ", "hi", &[]),
    syl("ふ", "fu", &["hu"]),
    syl("へ", "he", &[]),
    syl("ほ", "ho", &[]),
    // M
    syl("ま", "ma", &[]),
    syl("み", "mi", &[]),
    syl("む", "mu", &[]),
    syl("め", "me", &[]),
    syl("も", "mo", &[]),
    // Y
    syl("や", "ya", &[]),
    syl("ゆ", "yu", &[]),
    syl("よ", "yo", &[]),
    // R
    syl("ら", "ra", &[]),
    syl("り", "ri", &[]),
    syl("る", "ru", &[]),
    syl("れ", "re", &[]),
    syl("ろ", "ro", &[]),
    // W
    syl("わ", "wa", &[]),
    syl("を", "wo", &[]),
    // Syllabic n
    syl("ん", "n", &["nn", "n'"]),
    // G
    syl("が", "ga", &[]),
    syl("ぎ", "gi", &[]),
    syl("ぐ", "gu", &[]),
    syl("げ", "ge", &[]),
    syl("ご", "go", &[]),
    // Z
    syl("ざ", "za", &[]),
    syl("じ", "ji", &["zi"]),
    syl("ず", "zu", &[]),
    syl("ぜ", "ze", &[]),
    syl("ぞ", "zo", &[]),
    // D (di/du map to the rarer ぢ/づ)
    syl("だ", "da", &[]),
    syl("ぢ", "di", &[]),
    syl("づ", "du", &[]),
    syl("で", "de", &[]),
    syl("ど", "do", &[]),
    // B
    syl("ば", "ba", &[]),
    syl("び", "bi", &[]),
    syl("ぶ", "bu", &[]),
    syl("べ", "be", &[]),
    syl("ぼ", "bo", &[]),
    // P
    syl("ぱ", "pa", &[]),
    syl("ぴ", "pi", &[]),
    syl("ぷ", "pu", &[]),
    syl("ぺ", "pe", &[]),
    syl("ぽ", "po", &[]),
];

/// Longest syllable spelling that prefixes `rest`, with its kana.
fn match_spelling(rest: &str) -> Option<(&'static str, usize)> {
    let mut best: Option<(&'static str, usize)> = None;
    for s in SYLLABLES {
        for &spelling in std::iter::once(&s.romaji).chain(s.alternates.iter()) {
            if rest.starts_with(spelling) {
                match best {
                    Some((_, len)) if len >= spelling.len() => {}
                    _ => best = Some((s.kana, spelling.len())),
                }
            }
        }
    }
    best
}

/// Convert romaji to hiragana with greedy longest-match. A doubled
/// consonant becomes sokuon; characters no rule covers pass through
/// unchanged so a partially-kana input still compares sensibly.
pub fn to_hiragana(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut rest = lower.as_str();

    while let Some(c) = rest.chars().next() {
        // Sokuon: doubled consonant other than n.
        let mut chars = rest.chars();
        let first = chars.next();
        let second = chars.next();
        if let (Some(a), Some(b)) = (first, second) {
            if a == b && a.is_ascii_alphabetic() && !"aeioun".contains(a) {
                out.push('っ');
                rest = &rest[a.len_utf8()..];
                continue;
            }
        }

        if let Some((kana, len)) = match_spelling(rest) {
            out.push_str(kana);
            rest = &rest[len..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

/// Fold katakana code points onto their hiragana equivalents. The
/// prolonged sound mark and anything outside the katakana block are
/// left alone.
pub fn katakana_to_hiragana(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            }
            c => c,
        })
        .collect()
}

/// Convert kana to its primary Hepburn romanization. Katakana is
/// folded to hiragana first; the prolonged sound mark repeats the
/// previous vowel; unknown characters pass through.
pub fn to_romaji(input: &str) -> String {
    let hira = katakana_to_hiragana(input);
    let chars: Vec<char> = hira.chars().collect();
    let mut out = String::with_capacity(input.len() * 2);
    let mut sokuon = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == 'っ' {
            sokuon = true;
            i += 1;
            continue;
        }
        if c == 'ー' {
            if let Some(v) = out.chars().last().filter(|v| "aeiou".contains(*v)) {
                out.push(v);
            }
            i += 1;
            continue;
        }

        // Two-char unit when followed by a small ya/yu/yo.
        let unit: String = match chars.get(i + 1) {
            Some(&small) if matches!(small, 'ゃ' | 'ゅ' | 'ょ') => {
                i += 2;
                [c, small].iter().collect()
            }
            _ => {
                i += 1;
                c.to_string()
            }
        };

        match SYLLABLES.iter().find(|s| s.kana == unit) {
            Some(s) => {
                if sokuon {
                    // Geminate: double the leading consonant (tch for ch).
                    if let Some(lead) = s.romaji.chars().next() {
                        if s.romaji.starts_with("ch") {
                            out.push('t');
                        } else {
                            out.push(lead);
                        }
                    }
                    sokuon = false;
                }
                out.push_str(s.romaji);
            }
            None => {
                sokuon = false;
                out.push_str(&unit);
            }
        }
    }

    out
}
