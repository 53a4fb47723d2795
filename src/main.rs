//! vnw-helpers command line front end
//!
//! Shows how the library reads loosely formatted values. Every subcommand
//! prints one JSON document to stdout.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value as Json, json};
use std::io::{self, BufRead};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};
use vnw_helpers::convert::{pg_bool, set_date_field, set_timestamptz_field};
use vnw_helpers::func::run_with_concurrency_limit;
use vnw_helpers::{HelpersConfig, TimestampNormalizer, try_convert_to_slice};

#[derive(Parser, Debug)]
#[command(
    name = "vnw-helpers",
    about = "Inspect how loosely formatted values are parsed",
    version = "0.1.0"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a timestamp written day-month-year or year-month-day
    Timestamp { input: String },
    /// Parse an RFC 3339 or ISO timestamp as UTC
    Timestamptz { input: String },
    /// Parse a date against the accepted date layouts
    Date { input: String },
    /// Read a textual boolean
    Bool { input: String },
    /// Parse a PostgreSQL array literal or JSON array
    Array {
        input: String,
        #[arg(long, value_enum, default_value_t = ElementKind::Text)]
        kind: ElementKind,
    },
    /// Normalize timestamps read from stdin, one per line
    Batch,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ElementKind {
    Text,
    Int,
    Float,
    Bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = HelpersConfig::from_env()?;
    let normalizer = TimestampNormalizer::from_config(&config);

    let output = match args.command {
        Command::Timestamp { input } => {
            let result = normalizer.to_pg_timestamp(&input);
            let canonical = normalizer.normalize(&input).ok();
            json!({
                "input": input,
                "canonical": canonical,
                "valid": result.valid,
                "value": result,
            })
        }
        Command::Timestamptz { input } => {
            let result = set_timestamptz_field(input.as_str());
            json!({ "input": input, "valid": result.valid, "value": result })
        }
        Command::Date { input } => {
            let result = set_date_field(input.as_str());
            json!({ "input": input, "valid": result.valid, "value": result })
        }
        Command::Bool { input } => {
            let result = pg_bool(&input);
            json!({ "input": input, "valid": result.valid, "value": result })
        }
        Command::Array { input, kind } => {
            let elements = parse_array(&input, kind)?;
            json!({ "input": input, "elements": elements })
        }
        Command::Batch => run_batch(normalizer, config.concurrency_limit).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_array(input: &str, kind: ElementKind) -> Result<Json> {
    let elements = match kind {
        ElementKind::Text => serde_json::to_value(try_convert_to_slice::<String>(input)?)?,
        ElementKind::Int => serde_json::to_value(try_convert_to_slice::<i64>(input)?)?,
        ElementKind::Float => serde_json::to_value(try_convert_to_slice::<f64>(input)?)?,
        ElementKind::Bool => serde_json::to_value(try_convert_to_slice::<bool>(input)?)?,
    };
    Ok(elements)
}

async fn run_batch(normalizer: TimestampNormalizer, limit: usize) -> Result<Json> {
    let lines = read_lines(io::BufReader::new(io::stdin())).await?;
    let total = lines.len();
    info!("Normalizing {} line(s) with limit {}", total, limit);

    let invalid = run_with_concurrency_limit(
        CancellationToken::new(),
        lines,
        limit,
        move |_, line: String| async move {
            normalizer
                .parse(&line)
                .map(|_| ())
                .map_err(|e| e.to_string())
        },
    )
    .await;

    for message in &invalid {
        error!("{}", message);
    }

    Ok(json!({ "total": total, "invalid": invalid }))
}

/// Collect every line of `reader` on the blocking pool
async fn read_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: BufRead + Send + 'static,
{
    let lines = tokio::task::spawn_blocking(move || {
        reader.lines().collect::<io::Result<Vec<String>>>()
    })
    .await??;
    Ok(lines)
}
