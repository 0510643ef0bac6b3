use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use jupiter_retriever::{Category, QueryOutcome, RetrievalConfig, RetrievalEngine, RetrievalError, TextFileSource};

/// Ask questions against the scraped Jupiter FAQ corpus
#[derive(Debug, Parser)]
#[command(name = "jupiter-retriever", version)]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Corpus text file, overrides `data_file` from the config
    #[arg(long)]
    data: Option<PathBuf>,
    /// Print each result as JSON
    #[arg(long)]
    json: bool,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
    /// Question to answer; omit for an interactive prompt
    query: Vec<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    category: Category,
    #[serde(flatten)]
    outcome: &'a QueryOutcome<'a>,
    answer: &'a str,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> jupiter_retriever::Result<()> {
    let mut config = RetrievalConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    config.ensure_dirs()?;

    let source = TextFileSource::new(&config.data_file);
    let info = source.info();
    if !info.exists {
        warn!(path = %config.data_file.display(), "no corpus file; run the scraper first");
    }

    let mut engine = RetrievalEngine::new(config)?;
    let start = Instant::now();
    let chunks = engine.load_from(&source)?;
    info!(
        chunks,
        bytes = info.size,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "index built"
    );

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        run_interactive(&engine, cli.json)
    } else {
        answer_one(&engine, query.trim(), cli.json)
    }
}

fn answer_one(engine: &RetrievalEngine, query: &str, json: bool) -> jupiter_retriever::Result<()> {
    let start = Instant::now();
    let (outcome, answer) = engine.answer(query);
    info!(
        status = ?outcome.status,
        results = outcome.results.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "{}",
        outcome.message
    );

    let mut stdout = io::stdout().lock();
    let written = if json {
        let report = JsonReport {
            query,
            category: engine.classify(query),
            outcome: &outcome,
            answer: &answer,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => writeln!(stdout, "{text}"),
            Err(e) => {
                warn!(error = %e, "could not serialize result");
                Ok(())
            }
        }
    } else {
        writeln!(stdout, "{answer}\n")
    };
    written.map_err(stdout_error)
}

fn stdout_error(source: io::Error) -> RetrievalError {
    RetrievalError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

fn run_interactive(engine: &RetrievalEngine, json: bool) -> jupiter_retriever::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Query> ");
        io::stdout().flush().map_err(stdout_error)?;
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!(error = %e, "read error");
                break;
            }
            None => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        answer_one(engine, trimmed, json)?;
    }
    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_failures_become_io_errors() {
        let err = stdout_error(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        match err {
            RetrievalError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("<stdout>"));
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cli_parses_query_words_and_flags() {
        let cli = Cli::parse_from(["jupiter-retriever", "--json", "interest", "rate"]);
        assert!(cli.json);
        assert!(!cli.verbose);
        assert_eq!(cli.query.join(" "), "interest rate");
    }
}
