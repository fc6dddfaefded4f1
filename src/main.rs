use clap::Parser;
use fridgetag_parser::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // No subcommand: show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // `serve` installs its own Ctrl+C handler for graceful shutdown
    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Fridge-tag Parser - Berlinger Temperature Logger Export Converter");
    println!("=================================================================");
    println!();
    println!("Parse the indented text reports written by Berlinger Fridge-tag");
    println!("temperature loggers into validated camelCase JSON.");
    println!();
    println!("USAGE:");
    println!("    fridgetag <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse one export file and print the document");
    println!("    serve       Run the HTTP upload service");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse an export and print the banner, document, and summary:");
    println!("    fridgetag parse 16009999_201601191009.txt");
    println!();
    println!("    # Machine-readable output with per-record tracing on stderr:");
    println!("    fridgetag parse export.txt --format json --debug");
    println!();
    println!("    # Serve uploads on port 9000:");
    println!("    fridgetag serve --port 9000");
    println!();
    println!("For detailed help on any command, use:");
    println!("    fridgetag <COMMAND> --help");
}
