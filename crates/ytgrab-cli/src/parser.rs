//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the download front-end.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands.
#[derive(Parser)]
#[command(name = "ytgrab")]
#[command(about = "Download videos and audio through yt-dlp")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["ytgrab", "--verbose", "paths"]);
        assert!(cli.verbose);
        assert!(cli.command.is_some());
    }

    #[test]
    fn test_bare_invocation_has_no_command() {
        let cli = Cli::parse_from(["ytgrab"]);
        assert!(cli.command.is_none());
    }
}
