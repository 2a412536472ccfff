//! Command-line argument definitions for the EPANET report processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::CLEAN_SUFFIX;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the EPANET report processor
///
/// Converts EPANET hydraulic simulation report files into flat CSV tables,
/// filters known noise rows out of CSV tables, and normalizes the
/// delimiter/decimal conventions of leakage CSV files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "epanet-processor",
    version,
    about = "Convert EPANET simulation reports into CSV tables",
    long_about = "A batch tool that extracts timestamped node and link results from EPANET \
                  .rpt report files into two flat CSV tables, with optional filtering of the \
                  repeated header/unit rows the report format re-emits at every time step, \
                  and normalization of semicolon-delimited leakage CSVs."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the EPANET processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract node and link results from a report into CSV tables
    Extract(ExtractArgs),
    /// Drop rows containing marker substrings from a CSV table
    Filter(FilterArgs),
    /// Normalize decimal commas in semicolon-delimited leakage CSVs
    FixLeakage(FixLeakageArgs),
}

/// Arguments for the extract command (main report-to-table conversion)
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Path to the EPANET .rpt report file
    #[arg(
        short = 'r',
        long = "report",
        value_name = "FILE",
        help = "Path to the EPANET .rpt report file"
    )]
    pub report: PathBuf,

    /// Output directory for the generated tables
    ///
    /// Will be created if it doesn't exist. Defaults to the current
    /// directory.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory for the generated CSV tables"
    )]
    pub output_dir: Option<PathBuf>,

    /// File name for the node results table
    #[arg(
        long = "nodes",
        value_name = "FILE",
        help = "File name for the node results table"
    )]
    pub nodes: Option<String>,

    /// File name for the link results table
    #[arg(
        long = "links",
        value_name = "FILE",
        help = "File name for the link results table"
    )]
    pub links: Option<String>,

    /// Also write filtered copies of both tables
    ///
    /// Runs the row filter over the extracted tables, dropping the repeated
    /// header/unit rows, and writes the results with a _filtered suffix.
    #[arg(long = "filter", help = "Also write filtered copies of both tables")]
    pub filter: bool,

    /// Marker substrings identifying noise rows (repeatable)
    ///
    /// Replaces the built-in marker set when given.
    #[arg(
        short = 'm',
        long = "marker",
        value_name = "STRING",
        help = "Marker substring identifying noise rows (repeatable)"
    )]
    pub markers: Vec<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the filter command (standalone table filtering)
#[derive(Debug, Clone, Parser)]
pub struct FilterArgs {
    /// Input CSV table
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input CSV table"
    )]
    pub input: PathBuf,

    /// Output path for the filtered copy
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output path for the filtered copy"
    )]
    pub output: PathBuf,

    /// Marker substrings identifying noise rows (repeatable)
    ///
    /// Replaces the built-in marker set when given.
    #[arg(
        short = 'm',
        long = "marker",
        value_name = "STRING",
        help = "Marker substring identifying noise rows (repeatable)"
    )]
    pub markers: Vec<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the fix-leakage command (leakage CSV normalization)
#[derive(Debug, Clone, Parser)]
pub struct FixLeakageArgs {
    /// Leakage CSV files to normalize
    ///
    /// Each file is rewritten next to the original with a _clean suffix,
    /// e.g. 2018_Leakages.csv -> 2018_Leakages_clean.csv.
    #[arg(
        value_name = "FILES",
        required = true,
        help = "Leakage CSV files to normalize"
    )]
    pub files: Vec<PathBuf>,

    /// Suffix for the cleaned copies
    #[arg(
        long = "suffix",
        value_name = "STRING",
        default_value = CLEAN_SUFFIX,
        help = "Suffix inserted before the extension of cleaned copies"
    )]
    pub suffix: String,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run summary
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ExtractArgs {
    /// Validate the extract command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.report.exists() {
            return Err(Error::configuration(format!(
                "Report file does not exist: {}",
                self.report.display()
            )));
        }

        if self.report.is_dir() {
            return Err(Error::configuration(format!(
                "Report path is a directory: {}",
                self.report.display()
            )));
        }

        validate_markers(&self.markers)?;
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress output (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl FilterArgs {
    /// Validate the filter command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input table does not exist: {}",
                self.input.display()
            )));
        }

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        validate_markers(&self.markers)?;
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl FixLeakageArgs {
    /// Validate the fix-leakage command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for file in &self.files {
            if !file.exists() {
                return Err(Error::configuration(format!(
                    "Leakage file does not exist: {}",
                    file.display()
                )));
            }
        }

        if self.suffix.is_empty() {
            return Err(Error::configuration(
                "Cleaned-copy suffix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Map verbosity flags to a tracing filter level
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Reject empty marker strings (an empty substring matches every row)
fn validate_markers(markers: &[String]) -> Result<()> {
    if markers.iter().any(|m| m.is_empty()) {
        return Err(Error::data_validation(
            "Filter markers cannot be empty strings".to_string(),
        ));
    }
    Ok(())
}
