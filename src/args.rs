use clap::{Parser, Subcommand};

/// Transform pipeline for the election-results charts: fetches PX-Web
/// (JSON-stat2) tables from Hagstofa Íslands and flattens them into the
/// published JSON files the presentation layer reads.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, global = true, takes_value = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// POST a stored PX-Web query and persist the raw JSON-stat2 response verbatim.
    Fetch {
        /// (file path) The stored query, as exported from the PX-Web table
        /// UI. A `queryObj` wrapper is unwrapped automatically.
        #[clap(value_parser)]
        query: String,
        /// (file path) Where the raw response body is written.
        #[clap(value_parser)]
        out: String,
        /// The API endpoint of the table. Defaults to the KOS02121
        /// parliamentary-results table.
        #[clap(long, value_parser)]
        url: Option<String>,
    },
    /// Decode a national (year x party) percent cube into the published
    /// national results file.
    National {
        /// (file path) The raw JSON-stat2 percent dataset.
        #[clap(value_parser)]
        input: String,
        /// (file path) The published output, e.g. public/results.json.
        #[clap(value_parser)]
        out: String,
        /// (file path) An optional raw seats dataset joined into the rows.
        #[clap(long, value_parser)]
        seats: Option<String>,
    },
    /// Decode a regional (year x constituency x party) percent cube into
    /// the published regional results file.
    Regional {
        /// (file path) The raw JSON-stat2 percent dataset.
        #[clap(value_parser)]
        input: String,
        /// (file path) The published output, e.g. public/results-kjordaemi.json.
        #[clap(value_parser)]
        out: String,
        /// (file path) An optional raw seats dataset joined into the rows.
        #[clap(long, value_parser)]
        seats: Option<String>,
    },
    /// Flatten one raw per-year regional cube into a normalized
    /// intermediate file, without any reduction.
    Normalize {
        /// (file path) The raw JSON-stat2 dataset for a single election.
        #[clap(value_parser)]
        input: String,
        /// (file path) The normalized output, e.g. kjordaemi-2007.normalized.json.
        #[clap(value_parser)]
        out: String,
        /// The year applied to every row when the source carries no year
        /// dimension (per-year queries pin the year server-side).
        #[clap(long, value_parser)]
        year_fallback: Option<i32>,
        /// Which field of the rows the decoded values fill: percent or seats.
        #[clap(long, value_parser, default_value = "percent")]
        metric: String,
    },
    /// Merge normalized per-year files into the published regional results file.
    Publish {
        /// (file path) The published output, e.g. public/results-kjordaemi.json.
        #[clap(value_parser)]
        out: String,
        /// (file paths) The normalized percent files, in merge order. On
        /// duplicate (year, constituency, party) keys the later file wins.
        #[clap(value_parser, required = true)]
        inputs: Vec<String>,
        /// (file path, repeatable) Normalized seats files left-joined into
        /// the merged rows.
        #[clap(long, value_parser)]
        seats: Vec<String>,
        /// (file path) A reference copy of the expected output. If provided,
        /// pxresults checks that the published file matches the reference.
        #[clap(long, value_parser)]
        check: Option<String>,
    },
}
