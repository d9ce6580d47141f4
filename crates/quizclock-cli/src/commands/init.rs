//! The `quizclock init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizclock.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("problems.csv"), SAMPLE_PROBLEMS)?;

    println!("\nNext steps:");
    println!("  1. Edit problems.csv (one question,answer per line)");
    println!("  2. Run: quizclock validate --problems problems.csv");
    println!("  3. Run: quizclock run");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizclock configuration

# CSV file with one question,answer record per line (no header row)
problems = "problems.csv"

# Budget for the whole session, in seconds
time_limit_secs = 30
"#;

const SAMPLE_PROBLEMS: &str = "5+5,10
1+1,2
8+3,11
1+2,3
8+6,14
3+1,4
1+4,5
5+1,6
2+3,5
3+3,6
2+4,6
5+2,7
";
