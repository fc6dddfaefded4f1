//! Command-line argument definitions for the Fridge-tag parser
//!
//! The CLI is defined with the clap derive API. Every subcommand carries the
//! same logging and configuration flags through [`CommonArgs`].

use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Fridge-tag parser
///
/// Converts Berlinger Fridge-tag text exports into validated JSON, either for
/// a single file or as an HTTP upload service.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fridgetag",
    version,
    about = "Parse Berlinger Fridge-tag text exports into validated JSON",
    long_about = "Reads the indented key/value text report written by Berlinger Fridge-tag \
                  temperature loggers, rebuilds its section hierarchy, validates it, and \
                  produces a camelCase JSON document for cold-chain monitoring platforms. \
                  Runs once against a file or as an HTTP upload service."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one export file and print the resulting document
    Parse(ParseArgs),
    /// Run the HTTP upload service
    Serve(ServeArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML file layered over the built-in defaults. If not specified, looks
    /// for ~/.config/fridgetag/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Check that an explicitly given config file exists
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Fridge-tag text export to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format for the parsed document
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the parsed document"
    )]
    pub output_format: OutputFormat,

    /// Log every validated history record
    ///
    /// Also raises the log level to debug unless -v/-q says otherwise.
    #[arg(long = "debug", help = "Log every validated history record")]
    pub debug: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ParseArgs {
    /// Log level from -v/-q, then --debug
    pub fn get_log_level(&self) -> Option<&'static str> {
        self.common
            .get_log_level()
            .or(if self.debug { Some("debug") } else { None })
    }

    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()
    }
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long = "host", value_name = "ADDR", help = "Address to bind")]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to bind")]
    pub port: Option<u16>,

    /// Largest accepted upload (overrides server.max_upload_bytes)
    #[arg(
        long = "max-upload-bytes",
        value_name = "BYTES",
        help = "Largest accepted upload body in bytes"
    )]
    pub max_upload_bytes: Option<usize>,

    /// Accept uploads whatever their filename extension
    #[arg(
        long = "allow-any-extension",
        help = "Accept uploads that do not end in .txt"
    )]
    pub allow_any_extension: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ServeArgs {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        self.common.get_log_level()
    }

    /// Validate the serve command arguments
    pub fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(Error::configuration("Port must be greater than 0"));
        }
        if self.max_upload_bytes == Some(0) {
            return Err(Error::configuration("Upload limit must be greater than 0"));
        }
        self.common.validate()
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Banner, document, and summary for reading in a terminal
    Human,
    /// The document only, for scripting
    Json,
}
