//! Multiple-choice numeral quiz.
//!
//! Instead of typed input, each question shows one numeral in a random
//! category and eight options in a different category; correctness is
//! identity equality with the question item, never text comparison.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::numbers::{
    display_text, random_display_text, NumberCategory, NumberEntry, NUMBERS, QUIZ_CATEGORIES,
};
use crate::types::{Feedback, Score};

/// Options per question: one correct plus seven distractors.
pub const OPTION_COUNT: usize = 8;

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub digit: u8,
    pub text: String,
}

/// A generated question with its display texts fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub digit: u8,
    pub question_category: NumberCategory,
    pub answer_category: NumberCategory,
    pub question_text: String,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceQuestion {
    fn generate<R: Rng>(rng: &mut R) -> Self {
        let entry = NUMBERS.choose(rng).expect("numeral table is non-empty");
        let question_category = *QUIZ_CATEGORIES
            .choose(rng)
            .expect("quiz categories are non-empty");
        let remaining: Vec<NumberCategory> = QUIZ_CATEGORIES
            .iter()
            .copied()
            .filter(|c| *c != question_category)
            .collect();
        let answer_category = *remaining.choose(rng).expect("at least two categories");

        let distractors: Vec<&NumberEntry> = NUMBERS
            .iter()
            .filter(|n| n.digit != entry.digit)
            .collect::<Vec<_>>()
            .choose_multiple(rng, OPTION_COUNT - 1)
            .copied()
            .collect();

        // A numeral with several readings shows one at a time here;
        // the reference chart is where all of them appear together.
        let mut options: Vec<ChoiceOption> = std::iter::once(entry)
            .chain(distractors)
            .map(|n| ChoiceOption {
                digit: n.digit,
                text: random_display_text(n, answer_category, rng),
            })
            .collect();
        options.shuffle(rng);
        let question_text = random_display_text(entry, question_category, rng);

        Self {
            digit: entry.digit,
            question_category,
            answer_category,
            question_text,
            options,
        }
    }
}

/// Quiz state: current question, feedback, running score.
#[derive(Debug)]
pub struct ChoiceQuiz {
    question: ChoiceQuestion,
    feedback: Feedback,
    score: Score,
    rng: StdRng,
}

impl ChoiceQuiz {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let question = ChoiceQuestion::generate(&mut rng);
        Self {
            question,
            feedback: Feedback::Unanswered,
            score: Score::default(),
            rng,
        }
    }

    pub fn question(&self) -> &ChoiceQuestion {
        &self.question
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Select one option by digit. A second selection on the same
    /// question is ignored.
    pub fn answer(&mut self, digit: u8) -> &Feedback {
        if self.feedback.is_answered() {
            return &self.feedback;
        }
        let is_correct = digit == self.question.digit;
        self.score.record(is_correct);
        self.feedback = if is_correct {
            Feedback::Correct("Correct!".to_string())
        } else {
            let entry = NUMBERS
                .iter()
                .find(|n| n.digit == self.question.digit)
                .expect("question digit comes from the table");
            Feedback::Incorrect(format!(
                "Incorrect. The answer is {}",
                display_text(entry, self.question.answer_category)
            ))
        };
        &self.feedback
    }

    /// Advance to a fresh question, clearing feedback.
    pub fn next_question(&mut self) {
        self.question = ChoiceQuestion::generate(&mut self.rng);
        self.feedback = Feedback::Unanswered;
    }

    /// Fresh score and question, used when re-entering the quiz.
    pub fn reset(&mut self) {
        self.score.reset();
        self.next_question();
    }
}

impl Default for ChoiceQuiz {
    fn default() -> Self {
        Self::new()
    }
}
