//! ibdmap - command-line front end
//!
//! Loads a segment file and an annotation file, reconciles them, and
//! answers match queries. With `--individual` it answers one query and
//! exits; otherwise it reads one query per stdin line:
//!
//! ```text
//! <id> [bucket|-] [lower] [upper]
//! ```
//!
//! Results go to stdout (JSON or TSV); logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::AsyncBufReadExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ibd_map::{export, IbdConfig, IbdMap, Query, QueryResult, QueryService};

/// Command-line arguments for ibdmap
#[derive(Parser, Debug)]
#[command(name = "ibdmap")]
#[command(about = "Shared IBD of one individual with every other, by millennium and place")]
#[command(version)]
struct Args {
    /// IBD segment file (tab-separated, ancIBD layout)
    segment_file: PathBuf,

    /// Sample annotation file (tab-separated, AADR .anno layout)
    annotation_file: PathBuf,

    /// TOML file overriding column mapping, dating and deadline
    #[arg(short, long, env = "IBDMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Answer a single query for this individual and exit
    #[arg(short, long)]
    individual: Option<String>,

    /// Bucket start (years before year zero); defaults to the earliest present
    #[arg(short, long, allow_hyphen_values = true)]
    bucket: Option<i64>,

    /// Lower bound on shared length, in Morgans
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    lower: String,

    /// Upper bound on shared length, in Morgans
    #[arg(long, default_value = "100", allow_hyphen_values = true)]
    upper: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print the queryable individuals and exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Tsv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries results, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ibd_map=info,ibdmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => IbdConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => IbdConfig::default(),
    };

    info!(
        "Loading {} and {}",
        args.segment_file.display(),
        args.annotation_file.display()
    );
    let map = IbdMap::open(&args.segment_file, &args.annotation_file, &config)
        .context("Failed to load input tables")?;

    if let Some(edges) = map.bin_edges() {
        info!(
            individuals = map.individuals().len(),
            min_bucket = edges.min_edge(),
            max_bucket = edges.max_edge(),
            "Ready"
        );
    }

    if args.list {
        let mut out = std::io::stdout().lock();
        for id in map.individuals() {
            writeln!(out, "{id}")?;
        }
        return Ok(());
    }

    let service = QueryService::new(Arc::new(map), &config.service);

    if let Some(id) = &args.individual {
        let query = Query::parse(id.as_str(), args.bucket, &args.lower, &args.upper)?;
        let result = service.query(query).await?;
        render(&result, args.format)?;
        return Ok(());
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let outcome = match parse_request(line, &args) {
            Ok(query) => service.query(query).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(result) => render(&result, args.format)?,
            Err(e) => error!("{line}: {e}"),
        }
    }

    Ok(())
}

/// `<id> [bucket|-] [lower] [upper]`; omitted fields fall back to the flags.
fn parse_request(line: &str, args: &Args) -> ibd_map::Result<Query> {
    let mut parts = line.split_whitespace();
    let id = parts.next().unwrap_or_default();
    let bucket = match parts.next() {
        None | Some("-") => args.bucket,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ibd_map::Error::Validation(format!("bucket is not an integer: '{raw}'"))
        })?),
    };
    let lower = parts.next().unwrap_or(args.lower.as_str());
    let upper = parts.next().unwrap_or(args.upper.as_str());
    Query::parse(id, bucket, lower, upper)
}

fn render(result: &QueryResult, format: OutputFormat) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match format {
        OutputFormat::Json => export::write_json(result, &mut out)?,
        OutputFormat::Tsv => export::write_table(result, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
