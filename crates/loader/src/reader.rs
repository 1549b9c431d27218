//! CSV input.

use std::path::{Path, PathBuf};

use gs25_core::product::ProductRow;

use crate::error::{LoadError, LoadResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Rows parsed from a file plus the number of records that could not be read.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub rows: Vec<ProductRow>,
    pub skipped: usize,
}

/// Pick the input file: the first CLI argument wins over `CSV_PATH`.
pub fn resolve_input(arg: Option<String>, env: Option<String>) -> LoadResult<PathBuf> {
    arg.or(env)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or(LoadError::NoInput)
}

/// Read product rows from an exported CSV.
///
/// Columns are matched by header name, a leading byte-order mark is
/// ignored, and the gift column may be absent. Records that do not
/// deserialize are logged and skipped.
pub fn read_rows(path: &Path) -> LoadResult<ReadOutcome> {
    if !path.is_file() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    parse_rows(&bytes)
}

/// Parse CSV bytes. See [`read_rows`].
pub fn parse_rows(bytes: &[u8]) -> LoadResult<ReadOutcome> {
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    // Header problems are fatal; record problems are not.
    reader.headers()?;

    let mut outcome = ReadOutcome::default();
    for (i, record) in reader.deserialize::<ProductRow>().enumerate() {
        match record {
            Ok(row) => outcome.rows.push(row),
            Err(e) => {
                // +2: one for the header, one for 1-based numbering.
                tracing::warn!(line = i + 2, error = %e, "Skipping malformed CSV record");
                outcome.skipped += 1;
            }
        }
    }

    tracing::info!(rows = outcome.rows.len(), skipped = outcome.skipped, "Read CSV");
    Ok(outcome)
}
