//! File sink for the aggregated listings.
//!
//! Exactly one file is written per run, overwriting any previous file
//! of the same name inside the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::schema::NormalizedListing;

const CSV_HEADER: [&str; 4] = ["collection", "seller", "price", "mintAddress"];

/// Export format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Csv => "listings.csv",
            OutputFormat::Json => "listings.json",
        }
    }
}

/// Writes `listings` to `dir` in the given format and returns the path.
pub fn write_listings(
    dir: &Path,
    format: OutputFormat,
    listings: &[NormalizedListing],
) -> Result<PathBuf, OutputError> {
    let path = dir.join(format.file_name());

    let bytes = match format {
        OutputFormat::Csv => encode_csv(listings)?,
        OutputFormat::Json => serde_json::to_vec(listings)?,
    };

    fs::write(&path, bytes).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(path)
}

// The header is written by hand so that an empty result still
// produces it; serde-driven headers only appear with a first record.
fn encode_csv(listings: &[NormalizedListing]) -> Result<Vec<u8>, OutputError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for listing in listings {
        wtr.serialize(listing)?;
    }

    wtr.into_inner()
        .map_err(|e| OutputError::Csv(csv::Error::from(e.into_error())))
}
