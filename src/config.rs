//! Configuration for extraction runs
//!
//! Provides the resolved settings an extraction works from: where the
//! report lives, where the tables go, and which noise markers the optional
//! filter pass uses. Assembled from CLI arguments and defaults, validated
//! before any work starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FILTER_MARKERS, DEFAULT_LINK_OUTPUT, DEFAULT_NODE_OUTPUT, FILTERED_SUFFIX,
};
use crate::{Error, Result};

/// Resolved settings for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the EPANET report to parse
    pub report_path: PathBuf,

    /// Directory receiving the output tables
    pub output_dir: PathBuf,

    /// Node table file name within the output directory
    pub node_output: String,

    /// Link table file name within the output directory
    pub link_output: String,

    /// Run the row filter over both tables after extraction
    pub apply_filter: bool,

    /// Marker substrings identifying noise rows
    pub markers: Vec<String>,
}

impl Config {
    /// Create a configuration with default output names and markers
    pub fn new(report_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            report_path,
            output_dir,
            node_output: DEFAULT_NODE_OUTPUT.to_string(),
            link_output: DEFAULT_LINK_OUTPUT.to_string(),
            apply_filter: false,
            markers: DEFAULT_FILTER_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Override the node table file name
    pub fn with_node_output(mut self, name: impl Into<String>) -> Self {
        self.node_output = name.into();
        self
    }

    /// Override the link table file name
    pub fn with_link_output(mut self, name: impl Into<String>) -> Self {
        self.link_output = name.into();
        self
    }

    /// Enable the post-extraction filter pass
    pub fn with_filter(mut self) -> Self {
        self.apply_filter = true;
        self
    }

    /// Replace the marker set
    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        self.markers = markers;
        self
    }

    /// Validate the configuration before running
    pub fn validate(&self) -> Result<()> {
        if !self.report_path.exists() {
            return Err(Error::configuration(format!(
                "Report file does not exist: {}",
                self.report_path.display()
            )));
        }

        if self.node_output.is_empty() || self.link_output.is_empty() {
            return Err(Error::configuration(
                "Output file names cannot be empty".to_string(),
            ));
        }

        if self.markers.iter().any(|m| m.is_empty()) {
            return Err(Error::data_validation(
                "Filter markers cannot be empty strings".to_string(),
            ));
        }

        Ok(())
    }

    /// Create the output directory if it does not exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).map_err(|e| {
                Error::io(
                    format!(
                        "Failed to create output directory {}",
                        self.output_dir.display()
                    ),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Full path of the node table
    pub fn node_table_path(&self) -> PathBuf {
        self.output_dir.join(&self.node_output)
    }

    /// Full path of the link table
    pub fn link_table_path(&self) -> PathBuf {
        self.output_dir.join(&self.link_output)
    }

    /// Path of the filtered copy of a table (`_filtered` before the extension)
    pub fn filtered_path(table_path: &Path) -> PathBuf {
        let stem = table_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table");
        match table_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => table_path.with_file_name(format!("{}{}.{}", stem, FILTERED_SUFFIX, ext)),
            None => table_path.with_file_name(format!("{}{}", stem, FILTERED_SUFFIX)),
        }
    }
}
