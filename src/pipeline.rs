use log::{debug, info, warn};

use px_stat::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Command;

pub mod fetch;

#[derive(Debug, Snafu)]
pub enum PxError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing JSON for {path}"))]
    SerializingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error sending query to {url}"))]
    Fetch {
        source: reqwest::Error,
        url: String,
    },
    #[snafu(display("HTTP {status} from {url}: {snippet}"))]
    HttpStatus {
        status: u16,
        url: String,
        snippet: String,
    },
    #[snafu(display("{source}"))]
    Decode { source: px_stat::DecodeError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PxResult<T> = Result<T, PxError>;

fn load_dataset(path: &str) -> PxResult<Dataset> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read {} chars from {}", contents.len(), path);
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

fn load_normalized(path: &str) -> PxResult<Vec<ResultRow>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let normalized: Normalized =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    info!("{}: {} normalized rows", path, normalized.results.len());
    Ok(normalized.results)
}

/// Pretty-prints through a `serde_json::Value` so the key order matches
/// what a reference file parses to (used by `--check`).
fn to_pretty<T: serde::Serialize>(value: &T, path: &str) -> PxResult<String> {
    let js: JSValue = serde_json::to_value(value).context(SerializingJsonSnafu { path })?;
    serde_json::to_string_pretty(&js).context(SerializingJsonSnafu { path })
}

fn write_output(path: &str, contents: &str) -> PxResult<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
        }
    }
    fs::write(path, contents).context(WritingOutputSnafu { path })
}

fn parse_metric(s: &str) -> PxResult<Metric> {
    match s {
        "percent" => Ok(Metric::Percent),
        "seats" => Ok(Metric::Seats),
        other => whatever!("Unknown metric {:?}: expected percent or seats", other),
    }
}

/// Decodes the optional raw seats dataset accompanying a percent dataset.
fn load_seats_cube(path: &Option<String>, with_constituency: bool) -> PxResult<Vec<Vec<ResultRow>>> {
    match path {
        None => Ok(Vec::new()),
        Some(p) => {
            let ds = load_dataset(p)?;
            let rows = decode(
                &ds,
                &DecodeOptions {
                    with_constituency,
                    year_fallback: None,
                    metric: Metric::Seats,
                },
            )
            .context(DecodeSnafu)?;
            Ok(vec![rows])
        }
    }
}

fn write_published(out: &str, published: &Published) -> PxResult<String> {
    let pretty = to_pretty(published, out)?;
    write_output(out, &pretty)?;
    println!("Wrote {} ({} rows)", out, published.results.len());
    Ok(pretty)
}

fn cmd_fetch(query: &str, out: &str, url: &Option<String>) -> PxResult<()> {
    let url = url.as_deref().unwrap_or(fetch::DEFAULT_URL);
    let body = fetch::fetch_raw(query, url)?;
    write_output(out, &body)?;
    println!("Wrote {} ({} bytes)", out, body.len());
    Ok(())
}

fn cmd_national(input: &str, out: &str, seats: &Option<String>) -> PxResult<()> {
    let ds = load_dataset(input)?;
    let primary = decode(&ds, &DecodeOptions::national(Metric::Percent)).context(DecodeSnafu)?;
    info!("{}: {} decoded rows", input, primary.len());
    let secondaries = load_seats_cube(seats, false)?;
    let merged = merge_rows(primary, &secondaries);
    let published = reduce_top_n(merged, GroupBy::Year, TOP_N);
    write_published(out, &published)?;
    Ok(())
}

fn cmd_regional(input: &str, out: &str, seats: &Option<String>) -> PxResult<()> {
    let ds = load_dataset(input)?;
    let primary =
        decode(&ds, &DecodeOptions::regional(Metric::Percent, None)).context(DecodeSnafu)?;
    info!("{}: {} decoded rows", input, primary.len());
    let secondaries = load_seats_cube(seats, true)?;
    let merged = merge_rows(primary, &secondaries);
    let published = reduce_top_n(merged, GroupBy::YearConstituency, TOP_N);
    write_published(out, &published)?;
    Ok(())
}

fn cmd_normalize(
    input: &str,
    out: &str,
    year_fallback: Option<i32>,
    metric: &str,
) -> PxResult<()> {
    let metric = parse_metric(metric)?;
    let ds = load_dataset(input)?;
    let rows = decode(&ds, &DecodeOptions::regional(metric, year_fallback)).context(DecodeSnafu)?;
    let normalized = Normalized { results: rows };
    let pretty = to_pretty(&normalized, out)?;
    write_output(out, &pretty)?;
    println!("Wrote {} ({} rows)", out, normalized.results.len());
    Ok(())
}

fn cmd_publish(
    out: &str,
    inputs: &[String],
    seats: &[String],
    check: &Option<String>,
) -> PxResult<()> {
    let mut primary: Vec<ResultRow> = Vec::new();
    for path in inputs {
        primary.extend(load_normalized(path)?);
    }
    let mut secondaries: Vec<Vec<ResultRow>> = Vec::new();
    for path in seats {
        secondaries.push(load_normalized(path)?);
    }

    let merged = merge_rows(primary, &secondaries);
    let published = reduce_top_n(merged, GroupBy::YearConstituency, TOP_N);
    let pretty = write_published(out, &published)?;

    // The reference file, if provided for comparison.
    if let Some(reference_path) = check {
        let reference_path = reference_path.as_str();
        let contents =
            fs::read_to_string(reference_path).context(OpeningJsonSnafu { path: reference_path })?;
        let reference: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {
            path: reference_path,
        })?;
        let reference_pretty =
            serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {
                path: reference_path,
            })?;
        if reference_pretty != pretty {
            warn!("Found differences with the reference file");
            print_diff(reference_pretty.as_str(), pretty.as_str(), "\n");
            whatever!(
                "Difference detected between published output and reference {}",
                reference_path
            );
        }
        info!("published output matches {}", reference_path);
    }
    Ok(())
}

pub fn run(command: &Command) -> PxResult<()> {
    match command {
        Command::Fetch { query, out, url } => cmd_fetch(query, out, url),
        Command::National { input, out, seats } => cmd_national(input, out, seats),
        Command::Regional { input, out, seats } => cmd_regional(input, out, seats),
        Command::Normalize {
            input,
            out,
            year_fallback,
            metric,
        } => cmd_normalize(input, out, *year_fallback, metric),
        Command::Publish {
            out,
            inputs,
            seats,
            check,
        } => cmd_publish(out, inputs, seats, check),
    }
}
