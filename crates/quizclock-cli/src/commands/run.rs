//! The `quizclock run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use quizclock_core::config::load_config_from;
use quizclock_core::engine::{QuizEngine, QuizEngineConfig, QuizReporter};
use quizclock_core::input;
use quizclock_core::model::{FinishReason, Question};
use quizclock_core::parser;
use quizclock_core::report::QuizReport;
use quizclock_core::session::AnswerRecord;

const RULE: &str = "------------------------------------------------";

/// Prints prompts and the final banner to stdout.
struct ConsoleReporter;

impl QuizReporter for ConsoleReporter {
    fn on_start(&self, total: usize, _time_limit: Duration) {
        println!("---------  START !!! -----------");
        if total == 0 {
            println!("There are no questions in this quiz.");
        }
    }

    fn on_question(&self, _index: usize, question: &Question) {
        println!("{}", question.prompt);
    }

    fn on_answer(&self, record: &AnswerRecord) {
        tracing::debug!(
            "question {} answered {:?} (correct: {})",
            record.index,
            record.given,
            record.correct
        );
    }

    fn on_finish(&self, report: &QuizReport) {
        match report.reason {
            FinishReason::Completed => println!("-----------  ALL DONE -------------"),
            FinishReason::TimedOut => println!("-----------  TIME UP -------------"),
        }
        println!("Correct Answer : {} questions", report.summary_line());
        if report.total > 0 {
            println!("Score : {:.0}%", report.score_ratio() * 100.0);
        }
    }
}

pub async fn execute(
    problems: Option<PathBuf>,
    time_limit: Option<u64>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(path) = problems {
        config.problems = path;
    }
    if let Some(secs) = time_limit {
        config.time_limit_secs = secs;
    }

    // Any load failure ends here, before the timed phase.
    let questions = parser::load_questions(&config.problems)?;
    for warning in parser::validate_questions(&questions) {
        match warning.index {
            Some(i) => tracing::warn!("question {}: {}", i + 1, warning.message),
            None => tracing::warn!("{}", warning.message),
        }
    }

    println!("{RULE}");
    println!("Welcome to The Quiz");
    println!(
        "You will have {} second(s) to answer {} question(s)",
        config.time_limit_secs,
        questions.len()
    );
    println!("{RULE}");
    println!("Please Press Enter To Start The Quiz");

    // The listener must not be spawned until this returns; stdin has one reader.
    input::wait_for_start(&mut std::io::stdin().lock()).context("quiz was not started")?;

    let answers = input::spawn_stdin_listener().context("failed to start input listener")?;

    let engine = QuizEngine::new(QuizEngineConfig {
        time_limit: config.time_limit(),
    });
    let report = engine.run(&questions, answers, &ConsoleReporter).await;

    if format == "json" {
        println!("{}", report.to_json_pretty()?);
    }

    Ok(())
}
