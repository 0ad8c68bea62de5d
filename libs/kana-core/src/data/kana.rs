//! Basic kana reference tables.
//!
//! Table order follows the gojuon chart (vowels through w-row and n,
//! then dakuten/handakuten rows); the chart layout helpers below slice
//! by that order.

use crate::error::Result;
use crate::pool::Pool;
use crate::types::{Item, Script, ScriptFilter};

const HIRAGANA: &[(&str, &str)] = &[
    // Vowels
    ("あ", "a"),
    ("い", "i"),
    ("う", "u"),
    ("え", "e"),
    ("お", "o"),
    // K-row
    ("か", "ka"),
    ("き", "ki"),
    ("く", "ku"),
    ("け", "ke"),
    ("こ", "ko"),
    // S-row
    ("さ", "sa"),
    ("し", "shi"),
    ("す", "su"),
    ("せ", "se"),
    ("そ", "so"),
    // T-row
    ("た", "ta"),
    ("ち", "chi"),
    ("つ", "tsu"),
    ("て", "te"),
    ("と", "to"),
    // N-row
    ("な", "na"),
    ("に", "ni"),
    ("ぬ", "nu"),
    ("ね", "ne"),
    ("の", "no"),
    // H-row
    ("は", "ha"),
    ("ひ", "hi"),
    ("ふ", "fu"),
    ("へ", "he"),
    ("ほ", "ho"),
    // M-row
    ("ま", "ma"),
    ("み", "mi"),
    ("む", "mu"),
    ("め", "me"),
    ("も", "mo"),
    // Y-row
    ("や", "ya"),
    ("ゆ", "yu"),
    ("よ", "yo"),
    // R-row
    ("ら", "ra"),
    ("り", "ri"),
    ("る", "ru"),
    ("れ", "re"),
    ("ろ", "ro"),
    // W-row
    ("わ", "wa"),
    ("を", "wo"),
    // N
    ("ん", "n"),
    // G-row
    ("が", "ga"),
    ("ぎ", "gi"),
    ("ぐ", "gu"),
    ("げ", "ge"),
    ("ご", "go"),
    // Z-row
    ("ざ", "za"),
    ("じ", "ji"),
    ("ず", "zu"),
    ("ぜ", "ze"),
    ("ぞ", "zo"),
    // D-row
    ("だ", "da"),
    ("ぢ", "ji"),
    ("づ", "zu"),
    ("で", "de"),
    ("ど", "do"),
    // B-row
    ("ば", "ba"),
    ("び", "bi"),
    ("ぶ", "bu"),
    ("べ", "be"),
    ("ぼ", "bo"),
    // P-row
    ("ぱ", "pa"),
    ("ぴ", "pi"),
    ("ぷ", "pu"),
    ("ぺ", "pe"),
    ("ぽ", "po"),
];

const KATAKANA: &[(&str, &str)] = &[
    // Vowels
    ("ア", "a"),
    ("イ", "i"),
    ("ウ", "u"),
    ("エ", "e"),
    ("オ", "o"),
    // K-row
    ("カ", "ka"),
    ("キ", "ki"),
    ("ク", "ku"),
    ("ケ", "ke"),
    ("コ", "ko"),
    // S-row
    ("サ", "sa"),
    ("シ", "shi"),
    ("ス", "su"),
    ("セ", "se"),
    ("ソ", "so"),
    // T-row
    ("タ", "ta"),
    ("チ", "chi"),
    ("ツ", "tsu"),
    ("テ", "te"),
    ("ト", "to"),
    // N-row
    ("ナ", "na"),
    ("ニ", "ni"),
    ("ヌ", "nu"),
    ("ネ", "ne"),
    ("ノ", "no"),
    // H-row
    ("ハ", "ha"),
    ("ヒ", "hi"),
    ("フ", "fu"),
    ("ヘ", "he"),
    ("ホ", "ho"),
    // M-row
    ("マ", "ma"),
    ("ミ", "mi"),
    ("ム", "mu"),
    ("メ", "me"),
    ("モ", "mo"),
    // Y-row
    ("ヤ", "ya"),
    ("ユ", "yu"),
    ("ヨ", "yo"),
    // R-row
    ("ラ", "ra"),
    ("リ", "ri"),
    ("ル", "ru"),
    ("レ", "re"),
    ("ロ", "ro"),
    // W-row
    ("ワ", "wa"),
    ("ヲ", "wo"),
    // N
    ("ン", "n"),
    // G-row
    ("ガ", "ga"),
    ("ギ", "gi"),
    ("グ", "gu"),
    ("ゲ", "ge"),
    ("ゴ", "go"),
    // Z-row
    ("ザ", "za"),
    ("ジ", "ji"),
    ("ズ", "zu"),
    ("ゼ", "ze"),
    ("ゾ", "zo"),
    // D-row
    ("ダ", "da"),
    ("ヂ", "ji"),
    ("ヅ", "zu"),
    ("デ", "de"),
    ("ド", "do"),
    // B-row
    ("バ", "ba"),
    ("ビ", "bi"),
    ("ブ", "bu"),
    ("ベ", "be"),
    ("ボ", "bo"),
    // P-row
    ("パ", "pa"),
    ("ピ", "pi"),
    ("プ", "pu"),
    ("ペ", "pe"),
    ("ポ", "po"),
];

fn table(script: Script) -> &'static [(&'static str, &'static str)] {
    match script {
        Script::Hiragana => HIRAGANA,
        Script::Katakana => KATAKANA,
    }
}

fn items(script: Script) -> Vec<Item> {
    table(script)
        .iter()
        .map(|&(glyph, romaji)| {
            Item::new(glyph, glyph, vec![romaji.to_string()]).with_script(script)
        })
        .collect()
}

/// Pool for one script.
pub fn script_pool(script: Script) -> Result<Pool> {
    Pool::new(items(script))
}

/// Pool for a learner-selected filter; Mix unions both scripts.
pub fn pool(filter: ScriptFilter) -> Result<Pool> {
    let mut all = Vec::new();
    for &script in filter.scripts() {
        all.extend(items(script));
    }
    Pool::new(all)
}

/// One cell of the reference chart; gaps keep column alignment in
/// the y/w rows.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChartCell {
    pub glyph: String,
    pub romaji: String,
}

/// One labeled row of the reference chart.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChartRow {
    pub label: &'static str,
    pub cells: Vec<Option<ChartCell>>,
}

/// Organize a script's table into gojuon chart rows of five columns.
pub fn chart_rows(script: Script) -> Vec<ChartRow> {
    let data = table(script);
    let cell = |idx: usize| -> Option<ChartCell> {
        data.get(idx).map(|&(glyph, romaji)| ChartCell {
            glyph: glyph.to_string(),
            romaji: romaji.to_string(),
        })
    };
    let run = |label, start: usize| ChartRow {
        label,
        cells: (start..start + 5).map(cell).collect(),
    };

    vec![
        run("vowels", 0),
        run("k-row", 5),
        run("s-row", 10),
        run("t-row", 15),
        run("n-row", 20),
        run("h-row", 25),
        run("m-row", 30),
        ChartRow {
            label: "y-row",
            cells: vec![cell(35), None, cell(36), None, cell(37)],
        },
        run("r-row", 38),
        ChartRow {
            label: "w-row",
            cells: vec![cell(43), None, None, None, cell(44)],
        },
        ChartRow {
            label: "n",
            cells: vec![None, None, cell(45), None, None],
        },
        run("g-row", 46),
        run("z-row", 51),
        run("d-row", 56),
        run("b-row", 61),
        run("p-row", 66),
    ]
}
