//! Parsing statistics and result structures for report processing
//!
//! This module provides types for tracking what a parse run saw and
//! organizing the extracted records for downstream table writing.

use crate::app::models::{LinkRecord, NodeRecord};

/// Parsing result with extracted records and basic statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Node result rows in report order
    pub nodes: Vec<NodeRecord>,

    /// Link result rows in report order
    pub links: Vec<LinkRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines scanned
    pub lines_scanned: usize,

    /// Number of section headers recognized
    pub sections_seen: usize,

    /// Number of node records emitted
    pub node_records: usize,

    /// Number of link records emitted
    pub link_records: usize,

    /// Number of in-section lines skipped for too few tokens
    pub lines_skipped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records emitted across both tables
    pub fn total_records(&self) -> usize {
        self.node_records + self.link_records
    }
}
