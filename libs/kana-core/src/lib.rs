//! Core practice engine for Japanese kana, vocabulary, and numerals.
//!
//! Provides:
//! - Static reference data (kana tables, numeral table)
//! - Exclusion-based random sampling over immutable item pools
//! - Lenient answer matching (romanization normalization, script
//!   equivalence)
//! - The practice session state machine and the multiple-choice
//!   numeral quiz
//!
//! The engine is fully synchronous and does no I/O; hosting surfaces
//! own timers and network fetches and drive sessions through explicit
//! calls.

pub mod data;
pub mod error;
pub mod matching;
pub mod pool;
pub mod quiz;
pub mod romaji;
pub mod sampler;
pub mod session;
pub mod types;

pub use error::{DataError, Result};
pub use matching::{match_answer, MatchResult, MatchRule};
pub use pool::Pool;
pub use quiz::{ChoiceOption, ChoiceQuestion, ChoiceQuiz, OPTION_COUNT};
pub use sampler::{sample, sample_distractors};
pub use session::{Phase, PracticeMode, Session, AUTO_ADVANCE_SECS, MASTERY_THRESHOLD};
pub use types::{Feedback, Item, ItemId, Score, Script, ScriptFilter};
