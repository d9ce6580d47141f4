//! Mutable session state owned by the quiz loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::model::{Question, QuestionSet};

/// Deadline offset used when `started_at + time_limit` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Cursor, score, and the single session-wide deadline.
///
/// `cursor` ranges over `0..=total`; `cursor == total` means every question
/// has been answered. The deadline is fixed in [`SessionState::begin`] and
/// never moves afterwards.
#[derive(Debug, Clone)]
pub struct SessionState {
    cursor: usize,
    correct: usize,
    total: usize,
    deadline: Instant,
}

impl SessionState {
    /// Enter the timed phase for a set of `total` questions.
    ///
    /// A budget too large for the clock saturates to a deadline decades
    /// away.
    pub fn begin(total: usize, started_at: Instant, time_limit: Duration) -> Self {
        let deadline = started_at
            .checked_add(time_limit)
            .unwrap_or_else(|| started_at + FAR_FUTURE);
        Self {
            cursor: 0,
            correct: 0,
            total,
            deadline,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.total
    }

    /// The question awaiting an answer, or `None` once all are answered.
    pub fn current<'a>(&self, set: &'a QuestionSet) -> Option<&'a Question> {
        if self.is_complete() {
            return None;
        }
        set.get(self.cursor)
    }

    /// Score `given` against the current question and advance the cursor.
    ///
    /// Returns `None` without touching the state when the session is
    /// already complete.
    pub fn apply_answer(&mut self, set: &QuestionSet, given: &str) -> Option<AnswerRecord> {
        let question = self.current(set)?;
        let correct = question.is_correct(given);

        let record = AnswerRecord {
            index: self.cursor,
            prompt: question.prompt.clone(),
            expected: question.answer.clone(),
            given: given.to_string(),
            correct,
        };

        if correct {
            self.correct += 1;
        }
        self.cursor += 1;

        Some(record)
    }
}

/// Outcome of a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Zero-based question index.
    pub index: usize,
    pub prompt: String,
    pub expected: String,
    /// The normalized line the user typed.
    pub given: String,
    pub correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> QuestionSet {
        QuestionSet::from(vec![
            Question::new("2+2?", "4"),
            Question::new("capital of France?", "Paris"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_fixed_at_begin() {
        let start = Instant::now();
        let state = SessionState::begin(2, start, Duration::from_secs(30));
        assert_eq!(state.deadline(), start + Duration::from_secs(30));
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.total(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_budget_saturates_deadline() {
        let start = Instant::now();
        let state = SessionState::begin(2, start, Duration::MAX);
        assert!(state.deadline() >= start + FAR_FUTURE);

        let state = SessionState::begin(2, start, Duration::from_secs(u64::MAX));
        assert!(state.deadline() > start + Duration::from_secs(86_400 * 365));
    }

    #[tokio::test(start_paused = true)]
    async fn scoring_advances_cursor_regardless_of_correctness() {
        let set = sample_set();
        let mut state = SessionState::begin(set.len(), Instant::now(), Duration::from_secs(5));
        let deadline = state.deadline();

        let first = state.apply_answer(&set, "5").unwrap();
        assert!(!first.correct);
        assert_eq!(first.index, 0);
        assert_eq!(state.correct(), 0);
        assert_eq!(state.cursor(), 1);

        let second = state.apply_answer(&set, "Paris").unwrap();
        assert!(second.correct);
        assert_eq!(second.expected, "Paris");
        assert_eq!(state.correct(), 1);
        assert_eq!(state.cursor(), 2);
        assert!(state.is_complete());

        // Answering never moves the deadline.
        assert_eq!(state.deadline(), deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_case_is_not_correct() {
        let set = sample_set();
        let mut state = SessionState::begin(set.len(), Instant::now(), Duration::from_secs(5));
        state.apply_answer(&set, "4");
        let record = state.apply_answer(&set, "paris").unwrap();
        assert!(!record.correct);
        assert_eq!(state.correct(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn complete_session_ignores_answers() {
        let set = sample_set();
        let mut state = SessionState::begin(set.len(), Instant::now(), Duration::from_secs(5));
        state.apply_answer(&set, "4");
        state.apply_answer(&set, "Paris");

        assert!(state.current(&set).is_none());
        assert!(state.apply_answer(&set, "extra").is_none());
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.correct(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_set_starts_complete() {
        let set = QuestionSet::default();
        let mut state = SessionState::begin(0, Instant::now(), Duration::from_secs(5));
        assert!(state.is_complete());
        assert!(state.current(&set).is_none());
        assert!(state.apply_answer(&set, "anything").is_none());
    }
}
