//! Parse command: one export file to a JSON document on stdout

use super::shared::{apply_log_level, load_configuration, setup_logging};
use crate::app::adapters::filesystem::read_source;
use crate::app::services::pipeline::{PipelineOptions, ProcessedDocument, process_text};
use crate::app::services::schema::QTagDataOutput;
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

const BANNER: &str = "--- Parsed and Transformed FridgeTag Data (Output Model) ---";

/// Parse command runner
pub async fn run_parse(args: ParseArgs) -> Result<()> {
    let start_time = Instant::now();

    args.validate()?;
    let mut config = load_configuration(&args.common)?;
    apply_log_level(&mut config, args.get_log_level());
    config.validate()?;
    setup_logging(&config.logging.level, args.common.quiet)?;

    info!("Parsing {}", args.file.display());
    debug!("Parse arguments: {:?}", args);

    let text = read_source(&args.file)?;
    let options = PipelineOptions::with_trace_records(args.debug);
    let processed = process_text(&text, &options).inspect_err(report_failure)?;

    let json = render_document(&processed.document, config.output.pretty)?;
    match args.output_format {
        OutputFormat::Human => {
            println!();
            println!("{}", BANNER.bright_white().bold());
            println!("{}", json);
            println!();
            print_summary(&processed, start_time);
        }
        OutputFormat::Json => println!("{}", json),
    }

    Ok(())
}

/// Serialize the output document
pub fn render_document(document: &QTagDataOutput, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

fn print_summary(processed: &ProcessedDocument, start_time: Instant) {
    let records = processed.document.history_records.len();
    let rejected = processed.rejected_records.len();

    let mut line = format!(
        "{} {} history records from {} lines",
        "✓".bright_green().bold(),
        records.to_string().bright_cyan(),
        processed.stats.total_lines
    );
    if rejected > 0 {
        line.push_str(&format!(
            ", {}",
            format!("{} rejected", rejected).bright_yellow()
        ));
    }
    line.push_str(&format!(
        " {}",
        format!("({:.1?})", start_time.elapsed()).bright_black()
    ));
    println!("{}", line);
}

fn report_failure(error: &Error) {
    if !error.is_validation() {
        return;
    }
    eprintln!("{}", "Validation failed".bright_red().bold());
    for violation in error.violations() {
        eprintln!(
            "  {} {} {}",
            violation.field.bright_yellow(),
            violation.message,
            format!("(input: {})", violation.input).bright_black()
        );
    }
}
