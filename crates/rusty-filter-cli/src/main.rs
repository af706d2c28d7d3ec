use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rusty_filter::{Filter, FilterConfig, Record, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-filter")]
#[command(version, about = "Validate records against rusty-filter rule files", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON object against a rule file
    Check {
        /// Rule file (TOML, or JSON with a .json extension)
        #[arg(short, long)]
        config: PathBuf,

        /// JSON record to validate (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the outcome
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli.command);
    if let Err(err) = &result {
        eprintln!("Error: {:#}", err);
    }

    ExitCode::from(exit_status(&result))
}

/// 0 when valid, 1 when invalid, 2 when the run itself failed
fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether the record was valid
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Check {
            config,
            input,
            pretty,
        } => check(&config, input.as_deref(), pretty),
    }
}

fn check(config_path: &Path, input: Option<&Path>, pretty: bool) -> Result<bool> {
    if !config_path.exists() {
        bail!("Config file not found: {:?}", config_path);
    }

    let config = FilterConfig::load(config_path)
        .with_context(|| format!("Failed to load config file: {:?}", config_path))?;
    let filter = Filter::from_config(config).context("Invalid filter configuration")?;

    let record = read_record(input)?;
    tracing::debug!(fields = record.len(), "record loaded");

    let outcome = filter.validate(&record).context("Rule table rejected the record")?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", rendered);

    Ok(outcome.is_ok())
}

fn read_record(input: Option<&Path>) -> Result<Record> {
    let content = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read record from stdin")?;
            buf
        }
    };

    parse_record(&content)
}

fn parse_record(content: &str) -> Result<Record> {
    let json: serde_json::Value =
        serde_json::from_str(content).context("Input is not valid JSON")?;

    match Value::from(json) {
        Value::Object(record) => Ok(record),
        Value::Null => Ok(Record::new()),
        _ => bail!("Input must be a JSON object"),
    }
}
