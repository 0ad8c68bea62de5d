//! Practice session state machine.
//!
//! Drives the sampler and the answer matcher in response to learner
//! actions. All state is owned by the session instance; there are no
//! process-wide collections, and the auto-advance timer is an explicit
//! deadline the owner polls, not an ambient callback.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::matching::match_answer;
use crate::pool::Pool;
use crate::sampler;
use crate::types::{Feedback, Item, ItemId, Score};

/// Correct answers required in quiz mode before an item is mastered
/// and excluded from further sampling.
pub const MASTERY_THRESHOLD: u32 = 3;

/// Seconds between feedback being shown and the automatic advance.
pub const AUTO_ADVANCE_SECS: i64 = 10;

/// Practice flavor of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    /// Drill toward mastery; mastered items stop being sampled.
    Quiz,
    /// Unlimited cycling over the whole pool.
    Free,
    /// Drill only a learner-selected subset.
    Curated,
}

/// Sub-state of the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Curated mode only: picking items before practice starts.
    Selecting,
    /// An item is shown, no answer yet.
    Unanswered,
    /// Feedback is shown; next item pending (manual or timed).
    Answered,
    /// Quiz mode only: every item mastered, nothing left to sample.
    Completed,
}

/// One learner's practice session over an immutable pool.
#[derive(Debug)]
pub struct Session {
    pool: Pool,
    mode: PracticeMode,
    phase: Phase,
    current: Option<ItemId>,
    feedback: Feedback,
    score: Score,
    mastery_counts: HashMap<ItemId, u32>,
    mastered: HashSet<ItemId>,
    mistake_counts: HashMap<ItemId, u32>,
    selection: HashSet<ItemId>,
    /// At most one pending auto-advance; replacing or clearing this
    /// is the cancellation.
    auto_advance: Option<DateTime<Utc>>,
    rng: StdRng,
}

impl Session {
    /// Enter a practice mode over a pool. Quiz and free sessions show
    /// their first item immediately; curated sessions start in the
    /// selection phase.
    pub fn new(pool: Pool, mode: PracticeMode) -> Self {
        Self::with_rng(pool, mode, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(pool: Pool, mode: PracticeMode, seed: u64) -> Self {
        Self::with_rng(pool, mode, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pool: Pool, mode: PracticeMode, rng: StdRng) -> Self {
        let mut session = Self {
            pool,
            mode,
            phase: Phase::Selecting,
            current: None,
            feedback: Feedback::Unanswered,
            score: Score::default(),
            mastery_counts: HashMap::new(),
            mastered: HashSet::new(),
            mistake_counts: HashMap::new(),
            selection: HashSet::new(),
            auto_advance: None,
            rng,
        };
        if mode != PracticeMode::Curated {
            session.phase = Phase::Unanswered;
            session.draw_item();
        }
        session
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current.as_ref().and_then(|id| self.pool.get(id))
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn mastered_count(&self) -> usize {
        self.mastered.len()
    }

    pub fn is_mastered(&self, id: &ItemId) -> bool {
        self.mastered.contains(id)
    }

    /// Identities answered incorrectly at least once, available for a
    /// curated retry after completion.
    pub fn mistake_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.mistake_counts.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn selection(&self) -> &HashSet<ItemId> {
        &self.selection
    }

    pub fn auto_advance_deadline(&self) -> Option<DateTime<Utc>> {
        self.auto_advance
    }

    /// Identities excluded from sampling in the current mode. Quiz
    /// excludes mastered items; curated practice is expressed as
    /// excluding everything outside the selection; free practice
    /// excludes nothing.
    fn exclusions(&self) -> HashSet<ItemId> {
        match self.mode {
            PracticeMode::Quiz => self.mastered.clone(),
            PracticeMode::Free => HashSet::new(),
            PracticeMode::Curated => self
                .pool
                .ids()
                .into_iter()
                .filter(|id| !self.selection.contains(id))
                .collect(),
        }
    }

    fn draw_item(&mut self) {
        let exclude = self.exclusions();
        self.current = sampler::sample(&self.pool, &exclude, &mut self.rng)
            .map(|item| item.id.clone());
        if self.current.is_none() {
            self.phase = Phase::Completed;
        }
    }

    /// Submit a typed answer. No-op outside the unanswered phase, on
    /// blank input, or with no current item; those are prevented at
    /// the interaction boundary, not raised as errors.
    pub fn submit(&mut self, input: &str, now: DateTime<Utc>) -> &Feedback {
        if self.phase != Phase::Unanswered || input.trim().is_empty() {
            return &self.feedback;
        }
        let item = match self.current_item() {
            Some(item) => item.clone(),
            None => return &self.feedback,
        };

        let result = match_answer(input, &item);
        self.score.record(result.is_correct);

        if result.is_correct {
            let mut mastered_now = false;
            if self.mode == PracticeMode::Quiz {
                // Mistakes do not reset this counter; occasional
                // misses never erase progress toward mastery.
                let count = self.mastery_counts.entry(item.id.clone()).or_insert(0);
                *count += 1;
                if *count >= MASTERY_THRESHOLD && self.mastered.insert(item.id.clone()) {
                    mastered_now = true;
                }
            }
            self.feedback = if mastered_now {
                Feedback::Correct(format!("Mastered! \"{}\" is done.", item.prompt))
            } else {
                Feedback::Correct(format!(
                    "Correct! \"{}\" = \"{}\"",
                    item.prompt,
                    item.primary_answer()
                ))
            };
        } else {
            if self.mode == PracticeMode::Quiz {
                *self.mistake_counts.entry(item.id.clone()).or_insert(0) += 1;
            }
            self.feedback = Feedback::Incorrect(format!(
                "Incorrect. The correct answer is \"{}\"",
                item.primary_answer()
            ));
        }

        self.phase = Phase::Answered;
        // Starting a new timer implicitly cancels any previous one.
        self.auto_advance = Some(now + Duration::seconds(AUTO_ADVANCE_SECS));
        &self.feedback
    }

    /// Discard the current item without scoring and show another one.
    pub fn skip(&mut self) {
        if self.phase != Phase::Unanswered {
            return;
        }
        self.draw_item();
    }

    /// Leave the answered phase: clear feedback, cancel the pending
    /// auto-advance, sample the next item. In quiz mode an exhausted
    /// pool moves the session to `Completed`.
    pub fn next(&mut self) {
        if self.phase != Phase::Answered {
            return;
        }
        self.auto_advance = None;
        self.feedback = Feedback::Unanswered;
        self.phase = Phase::Unanswered;
        self.draw_item();
    }

    /// Fire the auto-advance if its deadline has passed. Returns true
    /// when an advance happened. A manual action that already left the
    /// answered phase cleared the deadline, so the pending advance
    /// cannot run twice.
    pub fn poll_auto_advance(&mut self, now: DateTime<Utc>) -> bool {
        match self.auto_advance {
            Some(deadline) if now >= deadline && self.phase == Phase::Answered => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Switch to a different pool (category/type change): full reset
    /// of score, mastery, mistakes, and selection, then an immediate
    /// resample under the new pool.
    pub fn set_pool(&mut self, pool: Pool) {
        self.pool = pool;
        self.selection.clear();
        self.reset_progress();
    }

    /// Restart the session over the same pool.
    pub fn start_over(&mut self) {
        self.reset_progress();
    }

    fn reset_progress(&mut self) {
        self.score.reset();
        self.mastery_counts.clear();
        self.mastered.clear();
        self.mistake_counts.clear();
        self.feedback = Feedback::Unanswered;
        self.auto_advance = None;
        if self.mode == PracticeMode::Curated && self.selection.is_empty() {
            self.phase = Phase::Selecting;
            self.current = None;
        } else {
            self.phase = Phase::Unanswered;
            self.draw_item();
        }
    }

    /// Toggle one identity in the curated selection. Unknown
    /// identities are ignored; nothing else changes.
    pub fn toggle_selection(&mut self, id: &ItemId) {
        if !self.pool.contains(id) {
            return;
        }
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
    }

    /// Whether curated practice may start.
    pub fn can_start_curated(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Begin drilling the curated selection. No-op while the
    /// selection is empty.
    pub fn start_curated(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mode = PracticeMode::Curated;
        self.score.reset();
        self.feedback = Feedback::Unanswered;
        self.auto_advance = None;
        self.phase = Phase::Unanswered;
        self.draw_item();
    }

    /// Seed curated practice from the accumulated mistakes and clear
    /// them. Offered on the completion screen; no-op without mistakes.
    pub fn practice_mistakes(&mut self) {
        if self.mistake_counts.is_empty() {
            return;
        }
        self.selection = self.mistake_counts.keys().cloned().collect();
        self.mistake_counts.clear();
        self.mastery_counts.clear();
        self.mastered.clear();
        self.start_curated();
    }

    /// Back out of an active drill to the curated selection screen,
    /// keeping the selection but discarding transient drill state.
    pub fn back_to_selection(&mut self) {
        self.auto_advance = None;
        self.current = None;
        self.feedback = Feedback::Unanswered;
        self.score.reset();
        self.phase = Phase::Selecting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn pool(entries: &[(&str, &str)]) -> Pool {
        let items = entries
            .iter()
            .map(|&(id, answer)| Item::new(id, id, vec![answer.to_string()]))
            .collect();
        Pool::new(items).unwrap()
    }

    fn small_pool() -> Pool {
        pool(&[("one", "ichi"), ("two", "ni"), ("three", "san")])
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Answer the current item, right or wrong, and advance.
    fn answer_current(session: &mut Session, correct: bool) {
        let item = session.current_item().expect("item present").clone();
        let input = if correct {
            item.primary_answer().to_string()
        } else {
            "xxxxx".to_string()
        };
        session.submit(&input, now());
        session.next();
    }

    #[test]
    fn new_session_shows_an_item() {
        let session = Session::with_seed(small_pool(), PracticeMode::Quiz, 1);
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.current_item().is_some());
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn submit_scores_and_moves_to_answered() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 2);
        let answer = session.current_item().unwrap().primary_answer().to_string();
        let feedback = session.submit(&answer, now()).clone();
        assert!(matches!(feedback, Feedback::Correct(_)));
        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.score().correct, 1);
        assert_eq!(session.score().total, 1);
        assert!(session.auto_advance_deadline().is_some());
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 3);
        session.submit("   ", now());
        assert_eq!(session.phase(), Phase::Unanswered);
        assert_eq!(session.score().total, 0);
    }

    #[test]
    fn double_submit_is_a_no_op() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 4);
        session.submit("wrong", now());
        session.submit("wrong", now());
        assert_eq!(session.score().total, 1);
    }

    #[test]
    fn skip_keeps_score_untouched() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Free, 5);
        session.skip();
        assert!(session.current_item().is_some());
        assert_eq!(session.score().total, 0);
        assert_eq!(session.phase(), Phase::Unanswered);
    }

    #[test]
    fn incorrect_answer_records_a_mistake() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 6);
        let id = session.current_item().unwrap().id.clone();
        session.submit("wrong", now());
        assert!(session.mistake_ids().contains(&id));
    }

    #[test]
    fn mastery_progress_survives_a_mistake() {
        // Non-resetting policy: correct, correct, incorrect, correct
        // masters the item on the third correct answer.
        let mut session = Session::with_seed(pool(&[("one", "ichi")]), PracticeMode::Quiz, 7);
        let id = session.current_item().unwrap().id.clone();

        answer_current(&mut session, true);
        answer_current(&mut session, true);
        assert!(!session.is_mastered(&id));
        answer_current(&mut session, false);
        assert!(!session.is_mastered(&id));
        answer_current(&mut session, true);
        assert!(session.is_mastered(&id));
    }

    #[test]
    fn mastered_items_leave_the_sampling_pool() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 8);
        let first = session.current_item().unwrap().id.clone();
        for _ in 0..MASTERY_THRESHOLD {
            // The sampler may repeat items; keep answering whatever
            // shows until the first item is mastered.
            if session.is_mastered(&first) {
                break;
            }
            while session.current_item().map(|i| i.id.clone()) != Some(first.clone()) {
                session.skip();
            }
            answer_current(&mut session, true);
        }
        assert!(session.is_mastered(&first));
        for _ in 0..100 {
            session.skip();
            assert_ne!(session.current_item().unwrap().id, first);
        }
    }

    #[test]
    fn quiz_completes_when_every_item_is_mastered() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 9);
        for _ in 0..small_pool().len() * MASTERY_THRESHOLD as usize {
            if session.phase() == Phase::Completed {
                break;
            }
            answer_current(&mut session, true);
        }
        assert_eq!(session.phase(), Phase::Completed);
        assert!(session.current_item().is_none());
        assert_eq!(session.mastered_count(), 3);
        assert!(session.mistake_ids().is_empty());
    }

    #[test]
    fn free_mode_never_completes() {
        let mut session = Session::with_seed(pool(&[("one", "ichi")]), PracticeMode::Free, 10);
        for _ in 0..10 {
            answer_current(&mut session, true);
        }
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.current_item().is_some());
        assert_eq!(session.mastered_count(), 0);
    }

    #[test]
    fn auto_advance_fires_after_the_deadline() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Free, 11);
        let t0 = now();
        session.submit("wrong", t0);

        // Too early: nothing happens.
        assert!(!session.poll_auto_advance(t0 + Duration::seconds(AUTO_ADVANCE_SECS - 1)));
        assert_eq!(session.phase(), Phase::Answered);

        assert!(session.poll_auto_advance(t0 + Duration::seconds(AUTO_ADVANCE_SECS)));
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.auto_advance_deadline().is_none());
    }

    #[test]
    fn manual_next_cancels_the_pending_auto_advance() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Free, 12);
        let t0 = now();
        session.submit("wrong", t0);
        session.next();
        let total_before = session.score().total;

        // The old deadline must not advance a second time.
        assert!(!session.poll_auto_advance(t0 + Duration::seconds(AUTO_ADVANCE_SECS + 5)));
        assert_eq!(session.phase(), Phase::Unanswered);
        assert_eq!(session.score().total, total_before);
    }

    #[test]
    fn resubmission_replaces_the_previous_timer() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Free, 13);
        let t0 = now();
        session.submit("wrong", t0);
        session.next();
        let t1 = t0 + Duration::seconds(5);
        session.submit("wrong", t1);
        assert_eq!(
            session.auto_advance_deadline(),
            Some(t1 + Duration::seconds(AUTO_ADVANCE_SECS))
        );
    }

    #[test]
    fn pool_change_resets_everything() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 14);
        answer_current(&mut session, false);
        answer_current(&mut session, true);
        assert!(session.score().total > 0);

        session.set_pool(pool(&[("four", "yon"), ("five", "go")]));
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.mastered_count(), 0);
        assert!(session.mistake_ids().is_empty());
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.current_item().is_some());
    }

    #[test]
    fn curated_selection_round_trip() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Curated, 15);
        assert_eq!(session.phase(), Phase::Selecting);
        assert!(!session.can_start_curated());

        let id = ItemId::from("one");
        session.toggle_selection(&id);
        assert!(session.can_start_curated());
        session.toggle_selection(&id);
        assert!(!session.can_start_curated());
        assert!(session.selection().is_empty());

        // Unknown identities are ignored.
        session.toggle_selection(&ItemId::from("missing"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn curated_practice_only_samples_the_selection() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Curated, 16);
        session.toggle_selection(&ItemId::from("one"));
        session.toggle_selection(&ItemId::from("three"));
        session.start_curated();
        assert_eq!(session.phase(), Phase::Unanswered);

        for _ in 0..100 {
            let id = session.current_item().unwrap().id.clone();
            assert!(id == "one".into() || id == "three".into());
            session.skip();
        }
    }

    #[test]
    fn start_curated_with_empty_selection_is_a_no_op() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Curated, 17);
        session.start_curated();
        assert_eq!(session.phase(), Phase::Selecting);
        assert!(session.current_item().is_none());
    }

    #[test]
    fn back_to_selection_preserves_the_selection() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Curated, 18);
        session.toggle_selection(&ItemId::from("two"));
        session.start_curated();
        session.submit("wrong", now());

        session.back_to_selection();
        assert_eq!(session.phase(), Phase::Selecting);
        assert!(session.current_item().is_none());
        assert_eq!(session.feedback(), &Feedback::Unanswered);
        assert_eq!(session.score(), Score::default());
        assert!(session.auto_advance_deadline().is_none());
        assert!(session.selection().contains(&ItemId::from("two")));
    }

    #[test]
    fn practice_mistakes_seeds_curated_and_clears_them() {
        let mut session = Session::with_seed(small_pool(), PracticeMode::Quiz, 19);
        let missed = session.current_item().unwrap().id.clone();
        answer_current(&mut session, false);

        session.practice_mistakes();
        assert_eq!(session.mode(), PracticeMode::Curated);
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.mistake_ids().is_empty());
        assert_eq!(session.selection().len(), 1);
        assert_eq!(session.current_item().unwrap().id, missed);
    }

    #[test]
    fn start_over_resets_a_completed_quiz() {
        let mut session = Session::with_seed(pool(&[("one", "ichi")]), PracticeMode::Quiz, 20);
        for _ in 0..MASTERY_THRESHOLD {
            answer_current(&mut session, true);
        }
        assert_eq!(session.phase(), Phase::Completed);

        session.start_over();
        assert_eq!(session.phase(), Phase::Unanswered);
        assert!(session.current_item().is_some());
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.mastered_count(), 0);
    }
}
