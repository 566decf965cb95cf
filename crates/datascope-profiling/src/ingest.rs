//! Local file loading for tabular datasets.
//!
//! Dispatches on file extension: CSV via the polars CSV reader with fallback
//! strategies for malformed quoting, Parquet via the polars Parquet reader.
//! Unsupported extensions and unreadable files are unrecoverable input errors
//! that abort the session.

use crate::error::{ProfilingError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, error};

/// Load a dataset from a local file, dispatching on extension.
pub fn read_file_to_dataframe(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "csv" => load_csv_with_fallbacks(path)?,
        "parquet" => ParquetReader::new(File::open(path)?).finish()?,
        other => return Err(ProfilingError::UnsupportedFormat(format!(".{other}"))),
    };

    if df.height() == 0 || df.width() == 0 {
        return Err(ProfilingError::EmptyDataset);
    }

    Ok(df)
}

/// Load CSV with multiple fallback strategies.
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard CSV loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("CSV loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cleaned = clean_csv_content(&content);
            use std::io::Cursor;
            let cursor = Cursor::new(cleaned);

            Ok(CsvReadOptions::default()
                .with_infer_schema_length(Some(100))
                .with_has_header(true)
                .into_reader_with_file_handle(cursor)
                .finish()?)
        }
        Err(e) => {
            error!("Could not read file: {}", e);
            Err(e.into())
        }
    }
}

/// Strip doubled quotes and blank lines that trip the CSV parser.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
