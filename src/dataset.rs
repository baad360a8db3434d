//! CSV dataset loading and export

use crate::error::Result;
use crate::models::{Record, RECORD_COLUMNS};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load every row of a headed CSV file as a record, in file order.
///
/// A missing file is not an error: a warning is logged and an empty
/// dataset returned so the caller can stop early.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        warn!("Dataset not found: {}", path.display());
        return Ok(Vec::new());
    }

    debug!("Loading dataset from {}", path.display());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let records = read_records(&mut reader)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from in-memory CSV text
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());
    read_records(&mut reader)
}

fn read_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Record>> {
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        // Short rows leave trailing columns absent, like a dict reader would
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.trim().to_string(), v.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Write records to CSV with the standard column set, creating parent dirs
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.write_record(RECORD_COLUMNS.iter().map(|c| record.field(c).unwrap_or("")))?;
    }
    writer.flush()?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
