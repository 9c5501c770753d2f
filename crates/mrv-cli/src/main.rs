use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mrv_core::{
    FilterSpec, Memory, NormalizeOutcome, Viewport, filter_memories, normalize, project, time,
};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "mrv",
    about = "Memory replay viewer: normalize, filter, and project replay records"
)]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a filtered timeline of replay records
    View {
        /// Replay JSON file (array of raw records)
        path: PathBuf,

        /// Keep only records whose content or tags contain this keyword
        #[arg(long)]
        keyword: Option<String>,

        /// Keep only records not earlier than this date
        #[arg(long)]
        start_date: Option<String>,

        /// Keep only records not later than this date
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Project records onto the spiral and print the points
    Spiral {
        /// Replay JSON file (array of raw records)
        path: PathBuf,

        /// Drawable surface width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Drawable surface height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// Emit points as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show summary statistics for a replay file
    Stats {
        /// Replay JSON file (array of raw records)
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::View {
            path,
            keyword,
            start_date,
            end_date,
        } => cmd_view(path, keyword.as_deref(), start_date.as_deref(), end_date.as_deref()),
        Commands::Spiral {
            path,
            width,
            height,
            json,
        } => cmd_spiral(path, *width, *height, *json),
        Commands::Stats { path } => cmd_stats(path),
    }
}

/// Read a replay file and require the top-level array shape.
/// A non-array payload is a fetch-level failure, not a per-record reject.
fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match payload {
        Value::Array(items) => Ok(items),
        other => anyhow::bail!(
            "{}: expected an array of replay records, got {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn load_memories(path: &Path) -> Result<Vec<Memory>> {
    let records = load_records(path)?;
    let NormalizeOutcome { memories, rejected } = normalize(&records);

    for r in &rejected {
        tracing::debug!("rejected record {}: {:?}", r.index, r.reason);
    }
    if !rejected.is_empty() {
        tracing::warn!(
            "rejected {} of {} replay records",
            rejected.len(),
            records.len()
        );
    }

    Ok(memories)
}

fn cmd_view(
    path: &Path,
    keyword: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<()> {
    let memories = load_memories(path)?;

    let mut spec = FilterSpec::new();
    if let Some(kw) = keyword {
        spec = spec.with_keyword(kw);
    }
    if let Some(start) = start_date {
        spec = spec.with_start_date(start);
    }
    if let Some(end) = end_date {
        spec = spec.with_end_date(end);
    }

    let kept = filter_memories(&memories, &spec);
    if kept.is_empty() {
        println!("(no memory entries)");
        return Ok(());
    }

    for m in &kept {
        let tags = if m.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", m.tags.join(", "))
        };
        println!("{}  w:{}{}  {}", m.timestamp, m.weight, tags, m.content);
    }

    if !spec.is_empty() {
        println!("({} of {} entries)", kept.len(), memories.len());
    }

    Ok(())
}

fn cmd_spiral(path: &Path, width: f64, height: f64, json: bool) -> Result<()> {
    let memories = load_memories(path)?;
    let outcome = project(&memories, Viewport::new(width, height));

    for i in &outcome.dropped {
        tracing::warn!("dropped point {i}: non-finite scale factor");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.points)?);
    } else {
        for p in &outcome.points {
            println!(
                "{:>4}  x={:8.2}  y={:8.2}  r={:5.2}",
                p.source_index, p.x, p.y, p.size
            );
        }
    }

    Ok(())
}

fn cmd_stats(path: &Path) -> Result<()> {
    let records = load_records(path)?;
    let outcome = normalize(&records);

    let tags: BTreeSet<&str> = outcome
        .memories
        .iter()
        .flat_map(|m| m.tags.iter().map(String::as_str))
        .collect();

    let mut instants: Vec<_> = outcome
        .memories
        .iter()
        .filter_map(|m| time::instant(&m.timestamp))
        .collect();
    instants.sort();

    println!("records:   {}", records.len());
    println!("memories:  {}", outcome.memories.len());
    println!("rejected:  {}", outcome.rejected.len());
    println!("tags:      {}", tags.len());
    match (instants.first(), instants.last()) {
        (Some(first), Some(last)) => {
            println!("span:      {} → {}", first.to_rfc3339(), last.to_rfc3339());
        }
        _ => println!("span:      (no parseable timestamps)"),
    }

    Ok(())
}
