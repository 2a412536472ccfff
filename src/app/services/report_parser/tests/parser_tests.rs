//! Tests for the core report parser

use crate::app::models::Section;
use crate::app::services::report_parser::ReportParser;

#[test]
fn test_basic_node_and_link_extraction() {
    let report = "\
Node Results at 1:00 Hrs:
N1 10.0 50.0 45.0

Link Results at 1:00 Hrs:
L1 5.0 1.2 0.3 Open
";

    let parser = ReportParser::new();
    let result = parser.parse_content(report);

    assert_eq!(result.nodes.len(), 1);
    assert_eq!(
        result.nodes[0].to_row(),
        ["01:00", "N1", "10.0", "50.0", "45.0"]
    );

    assert_eq!(result.links.len(), 1);
    assert_eq!(
        result.links[0].to_row(),
        ["01:00", "L1", "5.0", "1.2", "0.3", "Open"]
    );

    assert_eq!(result.stats.sections_seen, 2);
    assert_eq!(result.stats.total_records(), 2);
}

#[test]
fn test_lines_outside_sections_produce_no_records() {
    let report = "\
J1 1.0 2.0 3.0 stray before any header

Node Results at 2:00 Hrs:
N1 10.0 50.0 45.0

N2 11.0 51.0 46.0 after the blank line closed the block
";

    let result = ReportParser::new().parse_content(report);

    // Only the line inside the open block counts.
    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].node_id, "N1");
}

#[test]
fn test_blank_line_closes_section() {
    let report = "\
Node Results at 0:00 Hrs:
N1 1 2 3

N2 1 2 3
";
    let result = ReportParser::new().parse_content(report);
    assert_eq!(result.nodes.len(), 1);
}

#[test]
fn test_node_token_count_gating() {
    let report = "\
Node Results at 1:00 Hrs:
N1 10.0 50.0
N2 10.0 50.0 45.0
N3 10.0 50.0 45.0 extra columns ignored
";
    let result = ReportParser::new().parse_content(report);

    assert_eq!(result.nodes.len(), 2);
    assert_eq!(result.nodes[0].node_id, "N2");
    assert_eq!(result.nodes[1].node_id, "N3");
    assert_eq!(result.nodes[1].pressure, "45.0");
    assert_eq!(result.stats.lines_skipped, 1);
}

#[test]
fn test_link_token_count_gating() {
    let report = "\
Link Results at 1:00 Hrs:
L1 5.0 1.2 0.3
L2 5.0 1.2 0.3 Open
";
    let result = ReportParser::new().parse_content(report);

    // Four tokens is enough for a node line but not a link line.
    assert_eq!(result.links.len(), 1);
    assert_eq!(result.links[0].link_id, "L2");
    assert_eq!(result.stats.lines_skipped, 1);
}

#[test]
fn test_header_switches_section_mid_block() {
    let report = "\
Node Results at 1:00 Hrs:
N1 10.0 50.0 45.0
Link Results at 1:00 Hrs:
L1 5.0 1.2 0.3 Open
";
    let result = ReportParser::new().parse_content(report);

    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.links.len(), 1);
}

#[test]
fn test_time_carries_across_records_and_wraps() {
    let report = "\
Node Results at 25:10 Hrs:
N1 1 2 3
N2 4 5 6
";
    let result = ReportParser::new().parse_content(report);

    assert_eq!(result.nodes.len(), 2);
    assert_eq!(result.nodes[0].time.as_str(), "01:10");
    assert_eq!(result.nodes[1].time.as_str(), "01:10");
}

#[test]
fn test_order_preservation_across_time_steps() {
    let report = "\
Node Results at 1:00 Hrs:
A 1 2 3
B 1 2 3

Node Results at 2:00 Hrs:
C 1 2 3
";
    let result = ReportParser::new().parse_content(report);

    let ids: Vec<&str> = result.nodes.iter().map(|n| n.node_id.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C"]);
    assert_eq!(result.nodes[2].time.as_str(), "02:00");
}

#[test]
fn test_surrounding_report_content_is_ignored() {
    let report = "\
  Page 1                    EPANET 2.2

  Input File: l-town.inp

  Link - Node Table:
  ----------------------------------------------------------------------
  Link           Start          End                Length
  ID             Node           Node                    m
  ----------------------------------------------------------------------

Node Results at 1:00 Hrs:
N1 10.0 50.0 45.0
";
    let result = ReportParser::new().parse_content(report);

    assert_eq!(result.nodes.len(), 1);
    assert!(result.links.is_empty());
    assert_eq!(result.stats.sections_seen, 1);
}

#[test]
fn test_header_and_unit_rows_survive_parsing() {
    // Repeated column header/unit lines inside a block have enough tokens
    // to qualify as data rows; the parser keeps them and the row filter
    // removes them downstream.
    let report = "\
Node Results at 1:00 Hrs:
Node Demand Head Pressure
ID CMH m m
N1 10.0 50.0 45.0
";
    let result = ReportParser::new().parse_content(report);

    assert_eq!(result.nodes.len(), 3);
    assert_eq!(result.nodes[0].node_id, "Node");
    assert_eq!(result.nodes[2].node_id, "N1");
}

#[test]
fn test_empty_report_produces_empty_result() {
    let result = ReportParser::new().parse_content("");
    assert!(result.nodes.is_empty());
    assert!(result.links.is_empty());
    assert_eq!(result.stats.sections_seen, 0);
}

#[test]
fn test_unparsable_time_token_leaves_state_alone() {
    // "1:0:0" matches digits:digits as "1:0" followed by ":0 Hrs"? It does
    // not: the pattern requires " Hrs" right after the token, so the line
    // is not a header at all and, with no open section, emits nothing.
    let report = "\
Node Results at 1:0:0 Hrs:
N1 10.0 50.0 45.0
";
    let result = ReportParser::new().parse_content(report);
    assert!(result.nodes.is_empty());
}

#[test]
fn test_default_section_state() {
    assert_eq!(Section::default(), Section::None);
}

#[test]
fn test_parse_file_missing_report_is_an_error() {
    let parser = ReportParser::new();
    let result = parser.parse_file(std::path::Path::new("/nonexistent/run.rpt"));
    assert!(result.is_err());
}

#[test]
fn test_parse_file_round_trip() {
    use std::io::Write;

    let dir = tempfile::TempDir::new().unwrap();
    let report_path = dir.path().join("run.rpt");
    let mut file = std::fs::File::create(&report_path).unwrap();
    writeln!(file, "Node Results at 1:00 Hrs:").unwrap();
    writeln!(file, "N1 10.0 50.0 45.0").unwrap();

    let result = ReportParser::new().parse_file(&report_path).unwrap();
    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].time.as_str(), "01:00");
}
