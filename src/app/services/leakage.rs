//! Delimiter/decimal normalization for leakage CSV files
//!
//! The L-Town benchmark ships leakage time series as semicolon-delimited
//! CSVs whose numeric fields use decimal commas ("12,5"). Downstream
//! tooling expects decimal points, so this service rewrites each file in
//! place-adjacent fashion: same delimiter, same row/column shape, decimal
//! commas converted to decimal points, everything else byte-identical.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::info;

use crate::constants::{CLEAN_SUFFIX, DECIMAL_COMMA_PATTERN, LEAKAGE_DELIMITER};
use crate::{Error, Result};

/// Rewrites leakage CSVs with decimal commas normalized to decimal points
///
/// Only fields shaped like a decimal-comma number are touched; identifiers,
/// dates, and fields with several commas are copied verbatim. The header
/// row is copied verbatim as well.
#[derive(Debug)]
pub struct LeakageFixer {
    decimal_re: Regex,
}

impl LeakageFixer {
    /// Create a new fixer with the decimal-comma pattern compiled
    pub fn new() -> Self {
        Self {
            // The pattern is a literal constant; compilation cannot fail.
            decimal_re: Regex::new(DECIMAL_COMMA_PATTERN).unwrap(),
        }
    }

    /// Normalize one leakage file, writing the cleaned copy to `output`
    ///
    /// Returns the number of fields rewritten. The output file is
    /// overwritten.
    pub fn fix_file(&self, input: &Path, output: &Path) -> Result<usize> {
        info!("Cleaning {} -> {}", input.display(), output.display());

        if !input.exists() {
            return Err(Error::file_not_found(input.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(LEAKAGE_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .from_path(input)
            .map_err(|e| {
                Error::csv(
                    input.display().to_string(),
                    "Failed to open leakage file",
                    Some(e),
                )
            })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(LEAKAGE_DELIMITER)
            .from_path(output)
            .map_err(|e| {
                Error::csv(
                    output.display().to_string(),
                    "Failed to create cleaned file",
                    Some(e),
                )
            })?;

        let mut fields_rewritten = 0;
        for record in reader.records() {
            let record = record.map_err(|e| {
                Error::csv(input.display().to_string(), "Bad CSV row", Some(e))
            })?;

            let row: Vec<String> = record
                .iter()
                .map(|field| {
                    if self.decimal_re.is_match(field) {
                        fields_rewritten += 1;
                        field.replacen(',', ".", 1)
                    } else {
                        field.to_string()
                    }
                })
                .collect();

            writer.write_record(&row).map_err(|e| {
                Error::csv(
                    output.display().to_string(),
                    "Failed to write row",
                    Some(e),
                )
            })?;
        }

        writer.flush().map_err(|e| {
            Error::io(
                format!("Failed to flush cleaned file {}", output.display()),
                e,
            )
        })?;

        info!("Rewrote {} fields", fields_rewritten);
        Ok(fields_rewritten)
    }
}

impl Default for LeakageFixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the default cleaned-copy path for a leakage file
///
/// `2018_Leakages.csv` becomes `2018_Leakages_clean.csv` in the same
/// directory. A custom suffix replaces the `_clean` part.
pub fn clean_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("leakage");
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => input.with_file_name(format!("{}{}.{}", stem, suffix, ext)),
        None => input.with_file_name(format!("{}{}", stem, suffix)),
    }
}

/// Derive the default cleaned-copy path using the standard `_clean` suffix
pub fn default_clean_output_path(input: &Path) -> PathBuf {
    clean_output_path(input, CLEAN_SUFFIX)
}
