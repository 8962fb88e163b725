use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::{CONFIG_FILE_NAME, ParseErrorPolicy, PipelineConfig};
use crate::formats::asset::ASSET_EXTENSION;

pub mod generate;
pub mod inspect;

/// Options locating the level tree and output directory
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Unity project root (defaults to the current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Config file (defaults to <project>/levelscript.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Level-list directory (overrides config)
    #[arg(long)]
    pub levels: Option<PathBuf>,

    /// Script output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional level folder to skip (repeatable)
    #[arg(long = "exclude", value_name = "LEVEL")]
    pub excluded: Vec<String>,

    /// Fail a level when one of its assets cannot be parsed
    #[arg(long)]
    pub abort_on_parse_error: bool,
}

impl ConfigArgs {
    /// Build the pipeline configuration: config file, then CLI overrides.
    pub fn resolve(&self) -> anyhow::Result<PipelineConfig> {
        let root = self.project.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_path = self
            .config
            .clone()
            .or_else(|| Some(root.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()));

        let mut config = match config_path {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::for_project(&root),
        };

        if let Some(levels) = &self.levels {
            config.levels_dir.clone_from(levels);
        }
        if let Some(output) = &self.output {
            config.output_dir.clone_from(output);
        }
        config.excluded_levels.extend(self.excluded.iter().cloned());
        if self.abort_on_parse_error {
            config.on_parse_error = ParseErrorPolicy::AbortLevel;
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate <level>_Script.txt for every level folder
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the level folders that would be processed
    Levels {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show the processing order of a level folder's assets
    Order {
        /// Level folder
        level: PathBuf,

        /// Asset file extension
        #[arg(long, default_value = ASSET_EXTENSION)]
        extension: String,
    },

    /// Print the dialogue ids found in one asset file
    Extract {
        /// Asset file
        asset: PathBuf,
    },

    /// Print the script of one level folder without writing it
    Preview {
        /// Level folder
        level: PathBuf,

        /// Asset file extension
        #[arg(long, default_value = ASSET_EXTENSION)]
        extension: String,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Generate { config, quiet } => generate::execute(config.resolve()?, !*quiet),
            Commands::Levels { config } => inspect::levels(&config.resolve()?),
            Commands::Order { level, extension } => inspect::order(level, extension),
            Commands::Extract { asset } => inspect::extract(asset),
            Commands::Preview { level, extension } => inspect::preview(level, extension),
        }
    }
}
