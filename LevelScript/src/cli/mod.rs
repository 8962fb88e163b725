//! LevelScript CLI - Command-line interface for dialogue script generation

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::{Commands, ConfigArgs};

#[derive(Parser)]
#[command(name = "levelscript")]
#[command(about = "LevelScript: dialogue script stubs from Unity level assets", long_about = None)]
#[command(version)]
struct Cli {
    /// Defaults to `generate` with the standard project layout
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Run the LevelScript CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Generate {
        config: ConfigArgs::default(),
        quiet: false,
    });
    command.execute()?;

    Ok(())
}
