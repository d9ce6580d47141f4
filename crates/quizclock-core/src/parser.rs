//! CSV question loader.
//!
//! Loads a question set from a two-column CSV file (prompt, answer) with no
//! header row, and validates it for questions that can never be answered.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::model::{Question, QuestionSet};

/// Load a question set from a CSV file on disk.
pub fn load_questions(path: &Path) -> Result<QuestionSet, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse_questions(file, path)?;
    tracing::debug!("loaded {} questions from {}", set.len(), path.display());
    Ok(set)
}

/// Parse CSV records from any reader (useful for testing).
///
/// `origin` is only used in error messages.
pub fn parse_questions<R: Read>(reader: R, origin: &Path) -> Result<QuestionSet, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut questions = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        let number = i + 1;

        let prompt = record.get(0).ok_or(LoadError::MissingField {
            record: number,
            field: "prompt",
        })?;
        let answer = record.get(1).ok_or(LoadError::MissingField {
            record: number,
            field: "answer",
        })?;

        questions.push(Question::new(prompt, answer));
    }

    Ok(QuestionSet::new(questions))
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based question index (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for questions that cannot be scored sensibly.
pub fn validate_questions(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            index: None,
            message: "question set is empty".into(),
        });
    }

    for (index, question) in set.iter().enumerate() {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: "prompt is empty".into(),
            });
        }

        if question.answer.is_empty() {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: "answer is empty".into(),
            });
        } else if question.answer.trim() != question.answer {
            // The listener only strips the line terminator.
            warnings.push(ValidationWarning {
                index: Some(index),
                message: format!(
                    "answer {:?} has surrounding whitespace and is hard to type exactly",
                    question.answer
                ),
            });
        }
    }

    let mut seen = HashSet::new();
    for (index, question) in set.iter().enumerate() {
        if !seen.insert(question.prompt.as_str()) {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: format!("duplicate prompt: {}", question.prompt),
            });
        }
    }

    warnings
}
