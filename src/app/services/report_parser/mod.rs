//! Report parser for EPANET simulation output files
//!
//! This module provides a best-effort parser for EPANET `.rpt` report text.
//! The report interleaves "Node Results at HH:MM Hrs" and "Link Results at
//! HH:MM Hrs" blocks for every simulation time step; the parser walks the
//! file once and flattens those blocks into two ordered record sequences.
//!
//! ## Architecture
//!
//! - [`parser`] - Core line scan, section recognition, and record emission
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use epanet_processor::app::services::report_parser::ReportParser;
//!
//! let parser = ReportParser::new();
//! let result = parser.parse_content("Node Results at 1:00 Hrs:\nN1 10.0 50.0 45.0\n");
//!
//! assert_eq!(result.nodes.len(), 1);
//! assert_eq!(result.stats.node_records, 1);
//! ```

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::ReportParser;
pub use stats::{ParseResult, ParseStats};
