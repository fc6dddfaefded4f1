//! Command implementations for the Fridge-tag parser CLI
//!
//! Each subcommand lives in its own module; [`shared`] holds logging and
//! configuration setup used by all of them.

pub mod parse;
pub mod serve;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `parse`: one export file to JSON on stdout
/// - `serve`: the HTTP upload service
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args).await,
        Some(Commands::Serve(serve_args)) => serve::run_serve(serve_args).await,
        None => Ok(()),
    }
}
