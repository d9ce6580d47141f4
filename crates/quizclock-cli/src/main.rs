//! quizclock CLI, the user-facing entry point of the timed console quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quizclock_core::config::MAX_TIME_LIMIT_SECS;

mod commands;

#[derive(Parser)]
#[command(name = "quizclock", version, about = "Timed console quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed quiz session
    Run {
        /// CSV file of question,answer records (overrides config)
        #[arg(long)]
        problems: Option<PathBuf>,

        /// Budget for the whole session in seconds (overrides config)
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(..=MAX_TIME_LIMIT_SECS)
        )]
        time_limit: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Summary format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a question file without starting a session
    Validate {
        /// CSV file of question,answer records
        #[arg(long)]
        problems: PathBuf,
    },

    /// Create a starter config and question file
    Init,

    /// Send a single HTTP request
    Http {
        /// Target URL
        #[arg(long)]
        url: Option<String>,

        /// get, post, put, patch, delete (default: post)
        #[arg(long, default_value = "")]
        method: String,

        /// Header as "Name: value" (repeatable)
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Request body
        #[arg(long, default_value = "")]
        body: String,

        /// Timeout in seconds, 0 for none
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// JSON file describing the request (replaces the other flags)
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Send a payload over TCP and print the reply
    Tcp {
        /// host:port to dial
        #[arg(long)]
        address: Option<String>,

        /// Payload
        #[arg(long, default_value = "")]
        body: String,

        /// Connect and read timeout in seconds, 0 for none
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Maximum bytes taken from the reply
        #[arg(long, default_value = "4096")]
        max_read: usize,

        /// JSON file describing the request (replaces the other flags)
        #[arg(long)]
        request: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizclock=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            problems,
            time_limit,
            config,
            format,
        } => commands::run::execute(problems, time_limit, config, format).await,
        Commands::Validate { problems } => commands::validate::execute(problems),
        Commands::Init => commands::init::execute(),
        Commands::Http {
            url,
            method,
            headers,
            body,
            timeout,
            request,
        } => commands::http::execute(url, method, headers, body, timeout, request).await,
        Commands::Tcp {
            address,
            body,
            timeout,
            max_read,
            request,
        } => commands::tcp::execute(address, body, timeout, max_read, request).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
