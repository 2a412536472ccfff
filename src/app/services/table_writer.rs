//! CSV table writing for extracted node and link results
//!
//! Each table is written with exactly one fixed header row followed by the
//! data rows in report order. Output files are truncated per run, never
//! appended to, so re-extracting a report replaces the previous tables.

use std::path::Path;

use tracing::info;

use crate::app::models::{LinkRecord, NodeRecord};
use crate::constants::{LINK_TABLE_HEADER, NODE_TABLE_HEADER};
use crate::{Error, Result};

/// Write the node results table, overwriting any existing file
///
/// Returns the number of data rows written.
pub fn write_node_table(path: &Path, records: &[NodeRecord]) -> Result<usize> {
    let mut writer = open_writer(path)?;

    writer
        .write_record(NODE_TABLE_HEADER)
        .map_err(|e| write_error(path, e))?;
    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|e| write_error(path, e))?;
    }
    finish(writer, path)?;

    info!(
        "Wrote {} node rows to {}",
        records.len(),
        path.display()
    );
    Ok(records.len())
}

/// Write the link results table, overwriting any existing file
///
/// Returns the number of data rows written.
pub fn write_link_table(path: &Path, records: &[LinkRecord]) -> Result<usize> {
    let mut writer = open_writer(path)?;

    writer
        .write_record(LINK_TABLE_HEADER)
        .map_err(|e| write_error(path, e))?;
    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|e| write_error(path, e))?;
    }
    finish(writer, path)?;

    info!(
        "Wrote {} link rows to {}",
        records.len(),
        path.display()
    );
    Ok(records.len())
}

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).map_err(|e| {
        Error::csv(
            path.display().to_string(),
            "Failed to create output table",
            Some(e),
        )
    })
}

fn write_error(path: &Path, source: csv::Error) -> Error {
    Error::csv(
        path.display().to_string(),
        "Failed to write row",
        Some(source),
    )
}

fn finish(mut writer: csv::Writer<std::fs::File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush table {}", path.display()), e))
}
