//! Sampled vs. exact frequent itemset result comparison
//!
//! Usage:
//!   compare_results EPS MINFREQ EXACT_FILE SAMPLE_FILE
//!
//!   # append the record line to a batch log as well
//!   compare_results --record-log runs.csv 0.01 0.05 exact.txt sample.txt
//!
//! The summary goes to stdout and the one-line CSV record to stderr.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use fim_compare::io::open_appender;
use fim_compare::{CompareParams, RECORD_HEADER, compare, format_report, to_json};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare a sampled frequent itemset result against the exact result",
    allow_negative_numbers = true
)]
struct Cli {
    /// Maximum absolute frequency error claimed by the sampled result
    #[arg(value_name = "EPS")]
    epsilon: f64,

    /// Minimum frequency of the mining run
    #[arg(value_name = "MINFREQ")]
    min_freq: f64,

    /// Exact result (`items<TAB>frequency`, sorted by frequency descending)
    #[arg(value_name = "EXACT_FILE", value_parser = existing_file)]
    exact_file: PathBuf,

    /// Sampled result (`items(frequency, lower, upper)`, sorted by frequency descending)
    #[arg(value_name = "SAMPLE_FILE", value_parser = existing_file)]
    sample_file: PathBuf,

    /// Print the full report as JSON instead of the summary block
    #[arg(long)]
    json: bool,

    /// Also append the record line to this file (header written when the file is new)
    #[arg(long, value_name = "PATH")]
    record_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{raw} does not exist, or is not a file"))
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Usage errors: first line of clap's message only, exit 1.
            let rendered = e.render().to_string();
            eprintln!("{}", rendered.lines().next().unwrap_or("error: invalid arguments"));
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

fn run(cli: &Cli) -> Result<()> {
    let params = CompareParams::new(cli.epsilon, cli.min_freq)?;
    debug!(
        "thresholds: exact >= {}, sample >= {}",
        params.exact_threshold(),
        params.sample_threshold()
    );

    let report = compare(&cli.exact_file, &cli.sample_file, &params)?;
    let rendered = format_report(&report);

    if cli.json {
        println!("{}", to_json(&report).context("failed to serialize report")?);
    } else {
        print!("{}", rendered.summary);
    }
    eprintln!("{}", rendered.record);

    if let Some(path) = &cli.record_log {
        append_record(path, &rendered.record)?;
    }
    Ok(())
}

fn append_record(path: &Path, record: &str) -> Result<()> {
    let (mut writer, fresh) =
        open_appender(path).with_context(|| format!("failed to open {}", path.display()))?;
    if fresh {
        writeln!(writer, "{RECORD_HEADER}")?;
    }
    writeln!(writer, "{record}")?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("appended record to {}", path.display());
    Ok(())
}
