//! Application constants for the EPANET report processor
//!
//! This module contains the fixed output table headers, the report section
//! header pattern, and the default noise markers and file names used
//! throughout the application.

// =============================================================================
// Report Syntax
// =============================================================================

/// Pattern matching a results section header, e.g. "Node Results at 1:00 Hrs:"
///
/// Capture 1 is the element keyword (`Node` or `Link`), capture 2 the raw
/// `H:MM` time token. Anchored at the line start; trailing text after "Hrs"
/// is irrelevant.
pub const SECTION_HEADER_PATTERN: &str = r"^(Node|Link) Results at (\d+:\d+) Hrs";

/// Minimum token count for a node data line (id, demand, head, pressure)
pub const NODE_TOKEN_COUNT: usize = 4;

/// Minimum token count for a link data line (id, flow, velocity, headloss, status)
pub const LINK_TOKEN_COUNT: usize = 5;

// =============================================================================
// Output Tables
// =============================================================================

/// Header row for the node results table
pub const NODE_TABLE_HEADER: &[&str] = &[
    "Time",
    "Node_ID",
    "Demand (LPS)",
    "Head (m)",
    "Pressure (m)",
];

/// Header row for the link results table
pub const LINK_TABLE_HEADER: &[&str] = &[
    "Time",
    "Link_ID",
    "Flow (LPS)",
    "Velocity (m/s)",
    "Head_Loss (m)",
    "Status",
];

/// Default output file name for node results
pub const DEFAULT_NODE_OUTPUT: &str = "epanet_results_nodes.csv";

/// Default output file name for link results
pub const DEFAULT_LINK_OUTPUT: &str = "epanet_results_links.csv";

/// Suffix inserted before the extension for filtered table copies
pub const FILTERED_SUFFIX: &str = "_filtered";

// =============================================================================
// Row Filter
// =============================================================================

/// Default marker substrings identifying repeated header/unit rows
///
/// The EPANET report re-emits its column header and unit lines at every time
/// step; after permissive parsing these survive as data rows and are dropped
/// by substring match against the comma-joined row text.
pub const DEFAULT_FILTER_MARKERS: &[&str] = &[
    "Node,Demand,Head,Pressure",
    "ID,CMH,m,m",
    "Link,Flow,VelocityUnit,Headloss,Status",
];

// =============================================================================
// Leakage CSV Normalization
// =============================================================================

/// Field delimiter used by the L-Town leakage CSV files
pub const LEAKAGE_DELIMITER: u8 = b';';

/// Pattern matching a numeric field written with a decimal comma, e.g. "12,5"
pub const DECIMAL_COMMA_PATTERN: &str = r"^-?\d+,\d+$";

/// Suffix inserted before the extension for normalized leakage copies
pub const CLEAN_SUFFIX: &str = "_clean";
