//! Static reference data: kana tables and the numeral table.

pub mod kana;
pub mod numbers;
