//! Data models for EPANET report processing
//!
//! This module contains the core data structures for representing parsed
//! simulation results: the normalized time label, the per-element result
//! records, and the transient section state used during parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Time Label
// =============================================================================

/// A simulation time stamp normalized onto a single 24-hour clock
///
/// EPANET reports label results with cumulative simulation hours, so a
/// two-day run produces headers like "25:10 Hrs". The hour is folded modulo
/// 24 onto a base day; the minute is kept exactly as written (a report
/// emitting "0:65" stays "00:65" — only the hour wraparound is defined
/// behavior). Both components are zero-padded to width 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLabel(String);

impl TimeLabel {
    /// Parse and normalize a raw `H:MM` token from a section header
    ///
    /// Returns `None` unless the token is exactly two integer components
    /// joined by a colon. Callers treat `None` as "not a usable header" and
    /// skip the line.
    pub fn parse(raw: &str) -> Option<Self> {
        let (hour, minute) = raw.split_once(':')?;
        let hour: u32 = hour.parse().ok()?;
        let minute: u32 = minute.parse().ok()?;
        Some(Self(format!("{:02}:{:02}", hour % 24, minute)))
    }

    /// The normalized `HH:MM` text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Result Records
// =============================================================================

/// One node result row extracted from a report
///
/// Numeric fields are kept as the raw report tokens, never parsed to
/// numbers, so the output tables reproduce the report's own formatting
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Normalized time of the enclosing section
    pub time: TimeLabel,
    /// Node identifier (junction, tank, or reservoir)
    pub node_id: String,
    /// Demand in the report's flow units
    pub demand: String,
    /// Hydraulic head in meters
    pub head: String,
    /// Pressure in meters
    pub pressure: String,
}

/// One link result row extracted from a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Normalized time of the enclosing section
    pub time: TimeLabel,
    /// Link identifier (pipe, pump, or valve)
    pub link_id: String,
    /// Flow in the report's flow units
    pub flow: String,
    /// Velocity in m/s
    pub velocity: String,
    /// Head loss in meters
    pub head_loss: String,
    /// Link status (e.g. "Open", "Closed")
    pub status: String,
}

impl NodeRecord {
    /// Serialize as an output table row
    pub fn to_row(&self) -> [&str; 5] {
        [
            self.time.as_str(),
            &self.node_id,
            &self.demand,
            &self.head,
            &self.pressure,
        ]
    }
}

impl LinkRecord {
    /// Serialize as an output table row
    pub fn to_row(&self) -> [&str; 6] {
        [
            self.time.as_str(),
            &self.link_id,
            &self.flow,
            &self.velocity,
            &self.head_loss,
            &self.status,
        ]
    }
}

// =============================================================================
// Parse State
// =============================================================================

/// Which results block the parser is currently inside
///
/// A blank line closes the current block; a new section header opens the
/// next one, even mid-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Outside any results block
    #[default]
    None,
    /// Inside a "Node Results at ..." block
    Nodes,
    /// Inside a "Link Results at ..." block
    Links,
}
