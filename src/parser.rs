//! CSV parser for the athlete-events document.

use anyhow::Result;
use csv::{ErrorKind, ReaderBuilder, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{Dataset, Record};

/// Outcome counters for a single parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    pub skipped: usize,
}

/// Decodes CSV bytes (with a header row) into a [`Dataset`].
///
/// Rows that cannot be decoded, such as a non-numeric `Year` or an unknown
/// `Medal` label, are logged and skipped rather than failing the whole load.
///
/// # Errors
///
/// Returns an error only if the underlying reader fails with an I/O error.
pub fn parse_dataset(bytes: &[u8]) -> Result<(Dataset, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(bytes);

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (line, result) in rdr.deserialize::<Record>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                if let ErrorKind::Io(_) = e.kind() {
                    return Err(e.into());
                }
                // +2: one for the header, one for 1-based numbering.
                warn!(line = line + 2, error = %e, "Skipping malformed row");
                report.skipped += 1;
            }
        }
    }

    report.rows = records.len();
    debug!(rows = report.rows, skipped = report.skipped, "Dataset parsed");

    Ok((Dataset::new(records), report))
}
