//! The quiz loop.
//!
//! Races each incoming answer against one session-wide deadline and stops
//! when every question is answered or the deadline passes, whichever comes
//! first.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::model::{FinishReason, Question, QuestionSet};
use crate::report::QuizReport;
use crate::session::{AnswerRecord, SessionState};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Budget for the whole session, not per question.
    pub time_limit: Duration,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
        }
    }
}

/// Observer of the quiz loop; the console front end implements this.
pub trait QuizReporter: Send + Sync {
    fn on_start(&self, total: usize, time_limit: Duration);
    fn on_question(&self, index: usize, question: &Question);
    fn on_answer(&self, record: &AnswerRecord);
    /// Called exactly once per session.
    fn on_finish(&self, report: &QuizReport);
}

/// No-op reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_start(&self, _: usize, _: Duration) {}
    fn on_question(&self, _: usize, _: &Question) {}
    fn on_answer(&self, _: &AnswerRecord) {}
    fn on_finish(&self, _: &QuizReport) {}
}

/// The timed answer-collection engine.
pub struct QuizEngine {
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(config: QuizEngineConfig) -> Self {
        Self { config }
    }

    /// Run the timed phase of a session.
    ///
    /// The start gate must already have resolved: the deadline is computed
    /// here. `answers` is the receiving end of the listener's handoff
    /// channel; the listener is never joined.
    pub async fn run(
        &self,
        questions: &QuestionSet,
        mut answers: mpsc::Receiver<String>,
        reporter: &dyn QuizReporter,
    ) -> QuizReport {
        let started = Instant::now();
        let mut state = SessionState::begin(questions.len(), started, self.config.time_limit);
        tracing::debug!(
            "quiz running: {} question(s), {:?} budget",
            state.total(),
            self.config.time_limit
        );
        reporter.on_start(state.total(), self.config.time_limit);

        let mut records = Vec::with_capacity(questions.len());
        let reason = drive(questions, &mut state, &mut answers, reporter, &mut records).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let report = QuizReport::from_session(&state, reason, records, elapsed_ms);
        tracing::info!(
            "quiz {}: {} in {}ms",
            report.reason,
            report.summary_line(),
            report.elapsed_ms
        );
        reporter.on_finish(&report);
        report
    }
}

/// The Running state: one race per iteration, exactly one branch fires.
async fn drive(
    questions: &QuestionSet,
    state: &mut SessionState,
    answers: &mut mpsc::Receiver<String>,
    reporter: &dyn QuizReporter,
    records: &mut Vec<AnswerRecord>,
) -> FinishReason {
    let Some(first) = state.current(questions) else {
        return FinishReason::Completed;
    };
    reporter.on_question(state.cursor(), first);

    let deadline = state.deadline();
    let mut input_open = true;

    loop {
        if Instant::now() >= deadline {
            return FinishReason::TimedOut;
        }

        tokio::select! {
            // Deadline first: once it has passed, no queued answer is scored.
            biased;

            () = sleep_until(deadline) => {
                return FinishReason::TimedOut;
            }

            line = answers.recv(), if input_open => {
                let Some(line) = line else {
                    tracing::debug!("answer channel closed, waiting for the deadline");
                    input_open = false;
                    continue;
                };

                if let Some(record) = state.apply_answer(questions, &line) {
                    reporter.on_answer(&record);
                    records.push(record);
                }

                match state.current(questions) {
                    Some(next) => reporter.on_question(state.cursor(), next),
                    None => return FinishReason::Completed,
                }
            }
        }
    }
}
