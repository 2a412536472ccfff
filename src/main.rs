use clap::Parser;
use epanet_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the run summary has already been printed
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("EPANET Processor - Hydraulic Simulation Report Converter");
    println!("========================================================");
    println!();
    println!("Convert EPANET .rpt simulation reports into flat CSV tables of node");
    println!("and link results, with optional filtering of repeated header rows.");
    println!();
    println!("USAGE:");
    println!("    epanet-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract      Extract node and link results from a report (main command)");
    println!("    filter       Drop rows containing marker substrings from a CSV table");
    println!("    fix-leakage  Normalize decimal commas in semicolon-delimited leakage CSVs");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract a report into the current directory:");
    println!("    epanet-processor extract --report L-TOWN_Real_out.rpt");
    println!();
    println!("    # Extract and also write filtered copies of both tables:");
    println!("    epanet-processor extract --report L-TOWN_Real_out.rpt --filter");
    println!();
    println!("    # Filter an existing table with a custom marker:");
    println!("    epanet-processor filter --input nodes.csv --output nodes_filtered.csv \\");
    println!("                            --marker \"ID,CMH,m,m\"");
    println!();
    println!("    # Clean leakage CSVs in place (writes *_clean.csv copies):");
    println!("    epanet-processor fix-leakage 2018_Leakages.csv 2019_Leakages.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    epanet-processor <COMMAND> --help");
}
