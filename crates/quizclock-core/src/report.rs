//! Session report produced when the quiz loop finishes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::FinishReason;
use crate::session::{AnswerRecord, SessionState};

/// Final state of a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// How the session ended.
    pub reason: FinishReason,
    /// Number of correct answers.
    pub correct: usize,
    /// Number of questions in the set.
    pub total: usize,
    /// Number of questions that received an answer.
    pub answered: usize,
    /// Wall-clock time of the timed phase in milliseconds.
    pub elapsed_ms: u64,
    /// Per-question outcomes, in the order they were answered.
    pub answers: Vec<AnswerRecord>,
}

impl QuizReport {
    /// Build a report from the final session state.
    pub fn from_session(
        state: &SessionState,
        reason: FinishReason,
        answers: Vec<AnswerRecord>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            reason,
            correct: state.correct(),
            total: state.total(),
            answered: state.cursor(),
            elapsed_ms,
            answers,
        }
    }

    /// `"{correct} out of {total}"`.
    pub fn summary_line(&self) -> String {
        format!("{} out of {}", self.correct, self.total)
    }

    /// Fraction of all questions answered correctly (0.0 for an empty set).
    pub fn score_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize quiz report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(correct: usize, total: usize) -> QuizReport {
        QuizReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            reason: FinishReason::Completed,
            correct,
            total,
            answered: total,
            elapsed_ms: 1200,
            answers: vec![],
        }
    }

    #[test]
    fn summary_line_reports_both_counts() {
        assert_eq!(report(1, 2).summary_line(), "1 out of 2");
        assert_eq!(report(0, 0).summary_line(), "0 out of 0");
    }

    #[test]
    fn score_ratio_handles_empty_set() {
        assert_eq!(report(0, 0).score_ratio(), 0.0);
        assert!((report(3, 4).score_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn json_contains_reason_and_counts() {
        let json = report(2, 2).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["reason"], "completed");
        assert_eq!(value["correct"], 2);
        assert_eq!(value["total"], 2);
    }
}
