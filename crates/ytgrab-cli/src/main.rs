//! CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to handlers.
//! Nothing here touches the supervisor directly; handlers do.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ytgrab_cli::{handlers, Cli, Commands, ToolsCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default floor to debug
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        ytgrab_cli::Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Download(args) => {
            handlers::download::execute(args).await?;
        }
        Commands::Tools { command } => match command {
            ToolsCommand::Status { json } => {
                handlers::tools::status(json).await?;
            }
            ToolsCommand::InstallYtdlp => {
                handlers::tools::install_ytdlp().await?;
            }
            ToolsCommand::InstallFfmpeg => {
                handlers::tools::install_ffmpeg().await?;
            }
        },
        Commands::Paths => {
            handlers::paths::execute()?;
        }
    }

    Ok(())
}
