//! Project or unproject coordinate pairs with a projection header.
//!
//! Usage:
//!   project-points --header grid.hdr < lonlat.txt
//!   project-points --header grid.hdr --inverse --format json --input xy.txt
//!
//! Input holds one pair per line, separated by whitespace or a comma.
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use projection::{
    par_project_points, par_unproject_points, project_points, read_header, unproject_points,
    ProjectionHeader, Projector,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "project-points")]
#[command(about = "Transform coordinate pairs between lon/lat and projected meters")]
struct Args {
    /// Projection header file
    #[arg(long, env = "PROJECTION_HEADER")]
    header: PathBuf,

    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Unproject x/y meters to lon/lat instead of projecting
    #[arg(long)]
    inverse: bool,

    /// Transform on all cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// False easting (meters)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    false_easting: f64,

    /// False northing (meters)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    false_northing: f64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Serialize)]
struct Record {
    input: (f64, f64),
    output: (f64, f64),
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Logs go to stderr so stdout stays machine readable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let header = read_header(&args.header)
        .with_context(|| format!("Failed to load header {}", args.header.display()))?;
    info!(family = header.family(), "Loaded projection header");

    let projector = build(header, args.false_easting, args.false_northing)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };
    let points = parse_pairs(&text)?;
    debug!(count = points.len(), inverse = args.inverse, "Transforming points");

    let results = match &projector {
        None => points.clone(),
        Some(projector) => transform(projector.as_ref(), &points, args.inverse, args.parallel)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            for (a, b) in &results {
                writeln!(out, "{} {}", a, b)?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<Record> = points
                .iter()
                .zip(&results)
                .map(|(&input, &output)| Record { input, output })
                .collect();
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Projector for the header, or `None` for lonlat.
fn build(
    header: ProjectionHeader,
    false_easting: f64,
    false_northing: f64,
) -> Result<Option<Box<dyn Projector>>> {
    let Some(mut projector) = header
        .into_projector()
        .context("Invalid projection parameters")?
    else {
        if false_easting != 0.0 || false_northing != 0.0 {
            bail!("False easting/northing do not apply to a lonlat header");
        }
        return Ok(None);
    };

    projector
        .set_false_easting_northing(false_easting, false_northing)
        .context("Invalid false easting/northing")?;
    Ok(Some(projector))
}

fn transform(
    projector: &dyn Projector,
    points: &[(f64, f64)],
    inverse: bool,
    parallel: bool,
) -> Result<Vec<(f64, f64)>> {
    let results = match (inverse, parallel) {
        (false, false) => project_points(projector, points),
        (false, true) => par_project_points(projector, points),
        (true, false) => unproject_points(projector, points)?,
        (true, true) => par_unproject_points(projector, points)?,
    };
    Ok(results)
}

fn parse_pairs(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f64>()
                    .with_context(|| format!("line {}: invalid number '{}'", index + 1, token))
            })
            .collect::<Result<Vec<f64>>>()?;
        match values.as_slice() {
            [a, b] => pairs.push((*a, *b)),
            _ => bail!(
                "line {}: expected 2 values, found {}",
                index + 1,
                values.len()
            ),
        }
    }
    Ok(pairs)
}
