//! Core report parser implementation
//!
//! This module provides the single-pass line scan over report text: section
//! headers move the parser between node and link blocks, blank lines close
//! the current block, and every qualifying data line inside a block becomes
//! one record. No line is a fatal error; the scan always completes.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info, warn};

use super::stats::{ParseResult, ParseStats};
use crate::app::models::{LinkRecord, NodeRecord, Section, TimeLabel};
use crate::constants::{LINK_TOKEN_COUNT, NODE_TOKEN_COUNT, SECTION_HEADER_PATTERN};
use crate::{Error, Result};

/// Best-effort parser for EPANET report files
///
/// The parser is deliberately permissive: data lines with too few tokens
/// are skipped, extra trailing tokens are ignored, and repeated header/unit
/// rows inside a block are emitted as-is. Stripping those known noise rows
/// is the row filter's job downstream.
#[derive(Debug)]
pub struct ReportParser {
    header_re: Regex,
}

impl ReportParser {
    /// Create a new parser with the section header pattern compiled
    pub fn new() -> Self {
        Self {
            // The pattern is a literal constant; compilation cannot fail.
            header_re: Regex::new(SECTION_HEADER_PATTERN).unwrap(),
        }
    }

    /// Parse a report file and return the extracted tables with statistics
    ///
    /// The only error surfaced is a failure to read the file; report content
    /// itself never fails to parse.
    pub fn parse_file(&self, report_path: &Path) -> Result<ParseResult> {
        info!("Parsing EPANET report: {}", report_path.display());

        if !report_path.exists() {
            return Err(Error::file_not_found(report_path.display().to_string()));
        }

        let content = std::fs::read_to_string(report_path).map_err(|e| {
            Error::io(
                format!("Failed to read report {}", report_path.display()),
                e,
            )
        })?;

        let result = self.parse_content(&content);

        info!(
            "Parsed {} node records and {} link records from {} sections",
            result.stats.node_records, result.stats.link_records, result.stats.sections_seen
        );
        if result.stats.sections_seen == 0 {
            warn!("No results sections found in report");
        }

        Ok(result)
    }

    /// Parse report text already held in memory
    ///
    /// Walks the lines strictly in order, maintaining the current section
    /// and its time label. Infallible: malformed content produces fewer
    /// records, never an error.
    pub fn parse_content(&self, content: &str) -> ParseResult {
        let mut nodes = Vec::new();
        let mut links = Vec::new();
        let mut stats = ParseStats::new();

        let mut current_section = Section::None;
        let mut current_time: Option<TimeLabel> = None;

        for line in content.lines() {
            stats.lines_scanned += 1;
            let line = line.trim();

            // A section header switches state even mid-block.
            if let Some(caps) = self.header_re.captures(line) {
                match TimeLabel::parse(&caps[2]) {
                    Some(time) => {
                        current_section = if &caps[1] == "Node" {
                            Section::Nodes
                        } else {
                            Section::Links
                        };
                        current_time = Some(time);
                        stats.sections_seen += 1;
                        debug!("Entering {:?} section at {}", current_section, &caps[2]);
                    }
                    None => {
                        // Unusable time token; leave the current state alone.
                        debug!("Skipping header with unparsable time: {}", line);
                    }
                }
                continue;
            }

            if line.is_empty() {
                current_section = Section::None;
                continue;
            }

            match current_section {
                Section::Nodes => {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if tokens.len() >= NODE_TOKEN_COUNT {
                        if let Some(time) = &current_time {
                            nodes.push(NodeRecord {
                                time: time.clone(),
                                node_id: tokens[0].to_string(),
                                demand: tokens[1].to_string(),
                                head: tokens[2].to_string(),
                                pressure: tokens[3].to_string(),
                            });
                            stats.node_records += 1;
                        }
                    } else {
                        stats.lines_skipped += 1;
                    }
                }
                Section::Links => {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if tokens.len() >= LINK_TOKEN_COUNT {
                        if let Some(time) = &current_time {
                            links.push(LinkRecord {
                                time: time.clone(),
                                link_id: tokens[0].to_string(),
                                flow: tokens[1].to_string(),
                                velocity: tokens[2].to_string(),
                                head_loss: tokens[3].to_string(),
                                status: tokens[4].to_string(),
                            });
                            stats.link_records += 1;
                        }
                    } else {
                        stats.lines_skipped += 1;
                    }
                }
                Section::None => {}
            }
        }

        ParseResult {
            nodes,
            links,
            stats,
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}
