//! Command implementations for the EPANET processor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and run summary generation for the CLI interface.

use crate::app::services::leakage::{clean_output_path, LeakageFixer};
use crate::app::services::report_parser::ReportParser;
use crate::app::services::row_filter;
use crate::app::services::table_writer;
use crate::cli::args::{Args, Commands, ExtractArgs, FilterArgs, FixLeakageArgs, OutputFormat};
use crate::config::Config;
use crate::constants::DEFAULT_FILTER_MARKERS;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Processing statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of node records written
    pub node_records: usize,
    /// Number of link records written
    pub link_records: usize,
    /// Number of rows removed by the filter
    pub rows_removed: usize,
    /// Number of leakage files cleaned
    pub files_cleaned: usize,
    /// Number of decimal-comma fields rewritten
    pub fields_rewritten: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Main command runner for the EPANET processor
///
/// Sets up logging, validates arguments, executes the requested command,
/// and prints the run summary.
pub fn run(args: Args) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    let stats = match args.get_command() {
        Commands::Extract(extract_args) => {
            setup_logging(extract_args.get_log_level())?;
            info!("Starting extraction");
            debug!("Command line arguments: {:?}", extract_args);

            extract_args.validate()?;
            let config = build_extract_config(&extract_args);
            let mut stats = execute_extract(&config)?;
            stats.processing_time = start_time.elapsed();

            generate_final_report(&extract_args.output_format, &stats)?;
            stats
        }
        Commands::Filter(filter_args) => {
            setup_logging(filter_args.get_log_level())?;
            info!("Starting table filter");
            debug!("Command line arguments: {:?}", filter_args);

            filter_args.validate()?;
            let mut stats = execute_filter(&filter_args)?;
            stats.processing_time = start_time.elapsed();

            generate_final_report(&filter_args.output_format, &stats)?;
            stats
        }
        Commands::FixLeakage(leakage_args) => {
            setup_logging(leakage_args.get_log_level())?;
            info!("Starting leakage cleanup");
            debug!("Command line arguments: {:?}", leakage_args);

            leakage_args.validate()?;
            let mut stats = execute_fix_leakage(&leakage_args)?;
            stats.processing_time = start_time.elapsed();

            generate_final_report(&leakage_args.output_format, &stats)?;
            stats
        }
    };

    Ok(stats)
}

/// Set up structured logging based on the requested level
fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("epanet_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Assemble the extraction configuration from CLI arguments and defaults
fn build_extract_config(args: &ExtractArgs) -> Config {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let mut config = Config::new(args.report.clone(), output_dir);
    if let Some(nodes) = &args.nodes {
        config = config.with_node_output(nodes.clone());
    }
    if let Some(links) = &args.links {
        config = config.with_link_output(links.clone());
    }
    if args.filter {
        config = config.with_filter();
    }
    if !args.markers.is_empty() {
        config = config.with_markers(args.markers.clone());
    }
    config
}

/// Run the report-to-table extraction described by `config`
fn execute_extract(config: &Config) -> Result<ProcessingStats> {
    config.validate()?;
    config.ensure_output_directory()?;

    let parser = ReportParser::new();
    let result = parser.parse_file(&config.report_path)?;

    let node_path = config.node_table_path();
    let link_path = config.link_table_path();

    let mut stats = ProcessingStats {
        node_records: table_writer::write_node_table(&node_path, &result.nodes)?,
        link_records: table_writer::write_link_table(&link_path, &result.links)?,
        ..Default::default()
    };
    stats.output_sizes.push(file_size_entry(&node_path));
    stats.output_sizes.push(file_size_entry(&link_path));

    if config.apply_filter {
        for table_path in [&node_path, &link_path] {
            let filtered_path = Config::filtered_path(table_path);
            stats.rows_removed +=
                row_filter::filter_csv_file(table_path, &filtered_path, &config.markers)?;
            stats.output_sizes.push(file_size_entry(&filtered_path));
        }
    }

    Ok(stats)
}

/// Run a standalone filter pass over one table
fn execute_filter(args: &FilterArgs) -> Result<ProcessingStats> {
    let markers: Vec<String> = if args.markers.is_empty() {
        DEFAULT_FILTER_MARKERS.iter().map(|s| s.to_string()).collect()
    } else {
        args.markers.clone()
    };

    let mut stats = ProcessingStats {
        rows_removed: row_filter::filter_csv_file(&args.input, &args.output, &markers)?,
        ..Default::default()
    };
    stats.output_sizes.push(file_size_entry(&args.output));

    Ok(stats)
}

/// Normalize each leakage file in turn, with a progress bar unless quiet
fn execute_fix_leakage(args: &FixLeakageArgs) -> Result<ProcessingStats> {
    let progress_bar = if args.show_progress() && args.files.len() > 1 {
        let pb = ProgressBar::new(args.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let fixer = LeakageFixer::new();
    let mut stats = ProcessingStats::default();

    for (i, file) in args.files.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(format!("Cleaning {}", file.display()));
        }

        let output = clean_output_path(file, &args.suffix);
        stats.fields_rewritten += fixer.fix_file(file, &output)?;
        stats.files_cleaned += 1;
        stats.output_sizes.push(file_size_entry(&output));
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Cleanup complete");
    }

    Ok(stats)
}

/// Record a written file's size for the run summary
fn file_size_entry(path: &Path) -> (String, u64) {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    (path.display().to_string(), size)
}

/// Generate the final run summary
fn generate_final_report(format: &OutputFormat, stats: &ProcessingStats) -> Result<()> {
    match format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable summary
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    println!("\n{}", "Processing complete".green().bold());
    println!("   • Node records written: {}", stats.node_records);
    println!("   • Link records written: {}", stats.link_records);
    if stats.rows_removed > 0 {
        println!("   • Rows removed by filter: {}", stats.rows_removed);
    }
    if stats.files_cleaned > 0 {
        println!(
            "   • Leakage files cleaned: {} ({} fields rewritten)",
            stats.files_cleaned, stats.fields_rewritten
        );
    }
    println!(
        "   • Processing time: {:.2}s",
        stats.processing_time.as_secs_f64()
    );

    if !stats.output_sizes.is_empty() {
        println!("\nOutput files:");
        for (filename, size) in &stats.output_sizes {
            println!("   • {}: {}", filename, ProcessingStats::format_size(*size));
        }
    }

    println!();
    Ok(())
}

/// Generate JSON summary for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "node_records": stats.node_records,
        "link_records": stats.link_records,
        "rows_removed": stats.rows_removed,
        "files_cleaned": stats.files_cleaned,
        "fields_rewritten": stats.fields_rewritten,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
        "output_files": stats.output_sizes.iter().map(|(name, size)| {
            serde_json::json!({
                "filename": name,
                "size_bytes": size
            })
        }).collect::<Vec<_>>()
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json_stats).unwrap_or_default()
    );
    Ok(())
}

/// Generate CSV summary for data analysis
fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("node_records,{}", stats.node_records);
    println!("link_records,{}", stats.link_records);
    println!("rows_removed,{}", stats.rows_removed);
    println!("files_cleaned,{}", stats.files_cleaned);
    println!("fields_rewritten,{}", stats.fields_rewritten);
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );
    println!("total_output_size_bytes,{}", stats.total_output_size());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CLEAN_SUFFIX;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE_REPORT: &str = "\
Node Results at 1:00 Hrs:
Node Demand Head Pressure
ID CMH m m
N1 10.0 50.0 45.0

Link Results at 1:00 Hrs:
L1 5.0 1.2 0.3 Open
";

    #[test]
    fn test_processing_stats() {
        let mut stats = ProcessingStats::default();
        assert_eq!(stats.total_output_size(), 0);

        stats.output_sizes.push(("nodes.csv".to_string(), 1000));
        stats.output_sizes.push(("links.csv".to_string(), 2000));
        assert_eq!(stats.total_output_size(), 3000);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(ProcessingStats::format_size(0), "0 B");
        assert_eq!(ProcessingStats::format_size(512), "512 B");
        assert_eq!(ProcessingStats::format_size(1024), "1.00 KB");
        assert_eq!(ProcessingStats::format_size(1536), "1.50 KB");
        assert_eq!(ProcessingStats::format_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_execute_extract_writes_both_tables() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("run.rpt");
        std::fs::write(&report, SAMPLE_REPORT).unwrap();

        let config = Config::new(report, temp_dir.path().join("out"));
        let stats = execute_extract(&config).unwrap();

        // Header/unit rows survive unfiltered extraction.
        assert_eq!(stats.node_records, 3);
        assert_eq!(stats.link_records, 1);
        assert_eq!(stats.rows_removed, 0);
        assert!(config.node_table_path().exists());
        assert!(config.link_table_path().exists());
    }

    #[test]
    fn test_execute_extract_with_filter_drops_noise_rows() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("run.rpt");
        std::fs::write(&report, SAMPLE_REPORT).unwrap();

        let config = Config::new(report, temp_dir.path().join("out")).with_filter();
        let stats = execute_extract(&config).unwrap();

        assert_eq!(stats.rows_removed, 2);

        let filtered = Config::filtered_path(&config.node_table_path());
        let content = std::fs::read_to_string(filtered).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("01:00,N1"));
    }

    #[test]
    fn test_execute_fix_leakage() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("2018_Leakages.csv");
        std::fs::write(&file, "Timestamp;p232\n2018-01-01 00:00;12,5\n").unwrap();

        let args = FixLeakageArgs {
            files: vec![file.clone()],
            suffix: CLEAN_SUFFIX.to_string(),
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
        };

        let stats = execute_fix_leakage(&args).unwrap();
        assert_eq!(stats.files_cleaned, 1);
        assert_eq!(stats.fields_rewritten, 1);

        let cleaned = temp_dir.path().join("2018_Leakages_clean.csv");
        let content = std::fs::read_to_string(cleaned).unwrap();
        assert_eq!(content, "Timestamp;p232\n2018-01-01 00:00;12.5\n");
    }

    #[test]
    fn test_build_extract_config_applies_overrides() {
        let args = ExtractArgs {
            report: PathBuf::from("run.rpt"),
            output_dir: Some(PathBuf::from("out")),
            nodes: Some("n.csv".to_string()),
            links: Some("l.csv".to_string()),
            filter: true,
            markers: vec!["NOISE".to_string()],
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        };

        let config = build_extract_config(&args);
        assert_eq!(config.node_output, "n.csv");
        assert_eq!(config.link_output, "l.csv");
        assert!(config.apply_filter);
        assert_eq!(config.markers, vec!["NOISE".to_string()]);
        assert_eq!(config.node_table_path(), PathBuf::from("out/n.csv"));
    }
}
