//! Row filter for dropping known noise rows from CSV tables
//!
//! The report parser is deliberately permissive, so the repeated column
//! header and unit lines that EPANET re-emits at every time step survive
//! into the output tables. This filter removes them afterwards: a row is
//! dropped when its comma-joined text contains any configured marker
//! substring.

use std::path::Path;

use tracing::{debug, info};

use crate::{Error, Result};

/// Filter an in-memory row sequence, dropping every row whose fields,
/// joined with a comma, contain any marker substring
///
/// Relative order is preserved, surviving rows are untouched, and nothing
/// is deduplicated. Naive substring search is fine at this data scale
/// (thousands of rows).
pub fn filter_rows(rows: &[Vec<String>], markers: &[String]) -> Vec<Vec<String>> {
    rows.iter()
        .filter(|row| {
            let joined = row.join(",");
            !markers.iter().any(|marker| joined.contains(marker))
        })
        .cloned()
        .collect()
}

/// Write a filtered copy of a CSV table, preserving the row/column shape
/// of surviving rows
///
/// Returns the number of rows removed. The output file is overwritten.
pub fn filter_csv_file(input: &Path, output: &Path, markers: &[String]) -> Result<usize> {
    info!(
        "Filtering {} -> {} with {} markers",
        input.display(),
        output.display(),
        markers.len()
    );

    if !input.exists() {
        return Err(Error::file_not_found(input.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .map_err(|e| {
            Error::csv(
                input.display().to_string(),
                "Failed to open input table",
                Some(e),
            )
        })?;

    let mut writer = csv::Writer::from_path(output).map_err(|e| {
        Error::csv(
            output.display().to_string(),
            "Failed to create output table",
            Some(e),
        )
    })?;

    let mut removed = 0;
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::csv(input.display().to_string(), "Bad CSV row", Some(e)))?;

        let joined = record.iter().collect::<Vec<_>>().join(",");
        if markers.iter().any(|marker| joined.contains(marker)) {
            removed += 1;
            debug!("Dropping row: {}", joined);
            continue;
        }
        writer.write_record(&record).map_err(|e| {
            Error::csv(
                output.display().to_string(),
                "Failed to write row",
                Some(e),
            )
        })?;
    }

    writer.flush().map_err(|e| {
        Error::io(
            format!("Failed to flush output table {}", output.display()),
            e,
        )
    })?;

    info!("Removed {} rows", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_FILTER_MARKERS;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn markers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_marked_rows_are_dropped() {
        let input = rows(&[&["a", "b"], &["c", "HEADER"]]);
        let filtered = filter_rows(&input, &markers(&["HEADER"]));
        assert_eq!(filtered, rows(&[&["a", "b"]]));
    }

    #[test]
    fn test_marker_matches_across_field_boundary() {
        // The match runs against the comma-joined row text, so a marker may
        // span several fields.
        let input = rows(&[
            &["01:00", "Node", "Demand", "Head", "Pressure"],
            &["01:00", "N1", "10.0", "50.0", "45.0"],
        ]);
        let filtered = filter_rows(&input, &markers(&["Node,Demand,Head,Pressure"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0][1], "N1");
    }

    #[test]
    fn test_order_preserved_and_no_dedup() {
        let input = rows(&[&["x"], &["drop me"], &["y"], &["x"]]);
        let filtered = filter_rows(&input, &markers(&["drop"]));
        assert_eq!(filtered, rows(&[&["x"], &["y"], &["x"]]));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let input = rows(&[&["a"], &["ID,CMH,m,m extra"], &["b"]]);
        let m = markers(DEFAULT_FILTER_MARKERS);
        let once = filter_rows(&input, &m);
        let twice = filter_rows(&once, &m);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_markers_keep_everything() {
        let input = rows(&[&["a"], &["b"]]);
        let filtered = filter_rows(&input, &[]);
        assert_eq!(filtered, input);
    }

    #[test]
    fn test_filter_csv_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("table.csv");
        let output = dir.path().join("table_filtered.csv");

        std::fs::write(&input, "Time,Node_ID\n01:00,Node\n01:00,N1\n").unwrap();

        let removed = filter_csv_file(&input, &output, &markers(&["Node_ID,Node"])).unwrap();
        assert_eq!(removed, 0);

        let removed = filter_csv_file(&input, &output, &markers(&["01:00,Node"])).unwrap();
        assert_eq!(removed, 1);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "Time,Node_ID\n01:00,N1\n");
    }

    #[test]
    fn test_filter_csv_file_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = filter_csv_file(
            &dir.path().join("missing.csv"),
            &dir.path().join("out.csv"),
            &[],
        );
        assert!(result.is_err());
    }
}
