//! The `quizclock validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizclock_core::parser;

pub fn execute(problems: PathBuf) -> Result<()> {
    let questions = parser::load_questions(&problems)?;

    println!(
        "Question set: {} ({} questions)",
        problems.display(),
        questions.len()
    );

    if !questions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["#", "Prompt", "Answer"]);
        for (i, question) in questions.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&question.prompt),
                Cell::new(&question.answer),
            ]);
        }
        println!("{table}");
    }

    let warnings = parser::validate_questions(&questions);
    for w in &warnings {
        let prefix = w
            .index
            .map(|i| format!("  [{}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
