//! Keyword mention report over plain-text transcripts.
//!
//! Reads one transcript per file, counts whole-word keyword and phrase
//! mentions, and prints per-keyword metrics plus a per-transcript breakdown.
//!
//! ## Usage
//!
//! ```bash
//! # Two keywords over every transcript in a directory
//! mention_report -k "fomc, rate hike" transcripts/*.txt
//!
//! # Keywords from a file, JSON output, busiest keyword first
//! mention_report --keywords-file keywords.txt --format json --ranked transcripts/*.txt
//!
//! # Slower speakers
//! MENTION_WPM=120 mention_report -k cpi call.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! Transcripts : 2
//! Words (avg) : 412.5
//! Minutes     : 2.75 avg at 150 wpm
//!
//! KEYWORD    MENTIONS  PER TRANSCRIPT  COVERAGE  AVG POSITION
//! fomc       6         3.00            100.0%    38.2%
//! rate hike  1         0.50            50.0%     71.9%
//!
//! TRANSCRIPT  WORDS  MINUTES  MENTIONS
//! jan         380    2.53     4, 1
//! feb         445    2.97     2, 0
//! ```
//!
//! Labels are file stems. Bytes that are not valid UTF-8 are replaced rather
//! than rejected.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info};

use mention_core::{
    logging, merge_keyword_lists, parse_keyword_list, MetricsConfig, MetricsEngine, MetricsError,
    Report, Transcript,
};

/// Keyword mention metrics over plain-text transcripts
#[derive(Parser, Debug)]
#[command(name = "mention_report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Transcript files, one transcript per file
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Comma or newline separated keywords (repeatable)
    #[arg(short, long = "keywords", value_name = "LIST")]
    keywords: Vec<String>,

    /// File with keywords, one per line or comma separated
    #[arg(long, value_name = "PATH")]
    keywords_file: Option<PathBuf>,

    /// Speaking rate used for duration estimates
    #[arg(
        long,
        env = "MENTION_WPM",
        default_value_t = MetricsConfig::DEFAULT_WORDS_PER_MINUTE,
        allow_negative_numbers = true
    )]
    wpm: f64,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Order keywords by mentions instead of input order
    #[arg(long)]
    ranked: bool,

    /// Log engine progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned tables
    Human,
    /// The full report as JSON
    Json,
}

#[derive(Debug, Error)]
enum ReportError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no keywords given (use --keywords or --keywords-file)")]
    NoKeywords,

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, ReportError> {
    let keywords = collect_keywords(cli)?;
    if keywords.is_empty() {
        return Err(ReportError::NoKeywords);
    }

    let engine = MetricsEngine::with_config(MetricsConfig::with_words_per_minute(cli.wpm));
    let transcripts = cli
        .files
        .iter()
        .map(|path| load_transcript(&engine, path))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        transcripts = transcripts.len(),
        keywords = keywords.len(),
        "building report"
    );
    let mut report = engine.compute(&transcripts, &keywords)?;
    if cli.ranked {
        report = report.into_ranked();
    }

    match cli.format {
        OutputFormat::Human => Ok(HumanReport(&report).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

fn collect_keywords(cli: &Cli) -> Result<Vec<String>, ReportError> {
    let mut keywords = Vec::new();
    for list in &cli.keywords {
        merge_keyword_lists(&mut keywords, parse_keyword_list(list));
    }
    if let Some(path) = &cli.keywords_file {
        let raw = read_lossy(path)?;
        merge_keyword_lists(&mut keywords, parse_keyword_list(&raw));
    }
    Ok(keywords)
}

fn load_transcript(engine: &MetricsEngine, path: &Path) -> Result<Transcript, ReportError> {
    let text = read_lossy(path)?;
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let transcript = engine.transcript(label, text);
    debug!(
        path = %path.display(),
        words = transcript.word_count,
        "loaded transcript"
    );
    Ok(transcript)
}

fn read_lossy(path: &Path) -> Result<String, ReportError> {
    let bytes = fs::read(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Table rendering of a [`Report`].
struct HumanReport<'a>(&'a Report);

impl fmt::Display for HumanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = &report.summary;

        writeln!(f, "Transcripts : {}", summary.transcript_count)?;
        writeln!(f, "Words (avg) : {:.1}", summary.average_word_count)?;
        writeln!(
            f,
            "Minutes     : {:.2} avg at {} wpm",
            summary.average_minutes, report.words_per_minute
        )?;

        let kw_width = report
            .keywords
            .iter()
            .map(|m| m.keyword.chars().count())
            .chain(["KEYWORD".len()])
            .max()
            .unwrap_or(0);

        writeln!(f)?;
        writeln!(
            f,
            "{:<kw_width$}  MENTIONS  PER TRANSCRIPT  COVERAGE  AVG POSITION",
            "KEYWORD"
        )?;
        for m in &report.keywords {
            let coverage = format!("{:.1}%", m.pct_with_mention);
            let position = match m.average_relative_position {
                Some(pos) => format!("{pos:.1}%"),
                None => "-".to_owned(),
            };
            writeln!(
                f,
                "{:<kw_width$}  {:<8}  {:<14.2}  {:<8}  {}",
                m.keyword, m.total_mentions, m.average_mentions, coverage, position
            )?;
        }

        let label_width = report
            .transcripts
            .iter()
            .map(|t| t.label.chars().count())
            .chain(["TRANSCRIPT".len()])
            .max()
            .unwrap_or(0);

        writeln!(f)?;
        write!(f, "{:<label_width$}  WORDS  MINUTES  MENTIONS", "TRANSCRIPT")?;
        for t in &report.transcripts {
            let mentions: Vec<String> = t.mentions.iter().map(u32::to_string).collect();
            write!(
                f,
                "\n{:<label_width$}  {:<5}  {:<7.2}  {}",
                t.label,
                t.word_count,
                t.estimated_minutes,
                mentions.join(", ")
            )?;
        }
        Ok(())
    }
}
