//! Command-line arguments.
//!
//! Usage:
//!
//!     listings-collector [OPTIONS] <COLLECTION>...
//!
//! Asking for help, passing an unknown flag or naming no collection
//! prints the usage text and exits successfully. A flag with a
//! malformed value is reported as an error.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, error::ErrorKind};

use crate::query::{FetchOptions, SortDirection};
use crate::writer::OutputFormat;

/// Fetch marketplace listings for one or more collections and export
/// them to listings.csv (or listings.json).
#[derive(Debug, Parser)]
#[command(name = "listings-collector", allow_negative_numbers = true)]
pub struct Args {
    /// Limit of listings to fetch for each collection
    #[arg(long, value_name = "INTEGER")]
    pub limit: Option<u64>,

    /// Only include listings at or above this price
    #[arg(long, value_name = "NUMBER", value_parser = parse_price)]
    pub min_price: Option<f64>,

    /// Only include listings at or below this price
    #[arg(long, value_name = "NUMBER", value_parser = parse_price)]
    pub max_price: Option<f64>,

    /// Sort listings by price descending (ascending by default)
    #[arg(long)]
    pub desc: bool,

    /// Export to listings.json instead of listings.csv
    #[arg(long)]
    pub json: bool,

    /// Keep fetching the other collections when one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Path to a JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Collection symbols, e.g. degods okay_bears
    #[arg(required = true, value_name = "COLLECTION")]
    pub collections: Vec<String>,
}

impl Args {
    /// Filter options shared by every collection; the symbol is filled
    /// in per collection by the runner.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            collection: String::new(),
            limit: self.limit.unwrap_or(0),
            min_price: self.min_price.unwrap_or(0.0),
            max_price: self.max_price.unwrap_or(0.0),
            sort: if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Csv
        }
    }
}

/// Result of reading the command line.
#[derive(Debug)]
pub enum Invocation {
    Run(Args),

    /// Rendered usage text to print before exiting with status 0.
    ShowUsage(String),
}

/// Parses `argv` (including the program name).
///
/// Errors are only returned for malformed flag values; every other
/// clap failure turns into `Invocation::ShowUsage`.
pub fn parse_from<I, T>(argv: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Ok(Invocation::Run(args)),
        Err(e) => match e.kind() {
            ErrorKind::ValueValidation | ErrorKind::InvalidValue | ErrorKind::InvalidUtf8 => {
                Err(e)
            }
            _ => Ok(Invocation::ShowUsage(usage())),
        },
    }
}

fn usage() -> String {
    Args::command().render_help().to_string()
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;

    if !price.is_finite() || price < 0.0 {
        return Err(format!("`{raw}` must be a non-negative number"));
    }

    Ok(price)
}
