//! Pipeline configuration (levelscript.toml)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::asset::ASSET_EXTENSION;

/// Conventional config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "levelscript.toml";

/// Level-list directory, relative to the project root.
pub const DEFAULT_LEVELS_DIR: &str = "Assets/Resources/InterrorgationLevels";

/// Script output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "Assets/Resources/Scenarios/InterrogationLevels";

/// Level folder skipped unless the exclusion list is overridden.
pub const DEFAULT_EXCLUDED_LEVEL: &str = "TestLevel";

fn default_levels_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LEVELS_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_excluded_levels() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_EXCLUDED_LEVEL.to_string()])
}

fn default_asset_extension() -> String {
    ASSET_EXTENSION.to_string()
}

/// What to do when an asset in a level cannot be read or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorPolicy {
    /// Leave the asset out, log it, and keep generating the level.
    #[default]
    Skip,
    /// Fail the whole level; no script is written for it.
    AbortLevel,
}

/// Configuration of a script generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory containing one subdirectory per level.
    #[serde(default = "default_levels_dir")]
    pub levels_dir: PathBuf,
    /// Directory the `<level>_Script.txt` files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Level folder names to skip.
    #[serde(default = "default_excluded_levels")]
    pub excluded_levels: BTreeSet<String>,
    /// Asset file extension, without the dot.
    #[serde(default = "default_asset_extension")]
    pub asset_extension: String,
    /// How assets that cannot be read or parsed are handled.
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            levels_dir: default_levels_dir(),
            output_dir: default_output_dir(),
            excluded_levels: default_excluded_levels(),
            asset_extension: default_asset_extension(),
            on_parse_error: ParseErrorPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with paths under a Unity project root.
    pub fn for_project<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            levels_dir: root.join(DEFAULT_LEVELS_DIR),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            ..Self::default()
        }
    }

    /// Parse a TOML configuration; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML configuration file
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let mut config = Self::from_toml(&content).map_err(|e| config_error(e.to_string()))?;

        if let Some(base) = path.parent() {
            config.levels_dir = base.join(&config.levels_dir);
            config.output_dir = base.join(&config.output_dir);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config {
            path: PathBuf::from(CONFIG_FILE_NAME),
            message: e.to_string(),
        })
    }

    /// Whether a level folder name is excluded.
    pub fn is_excluded(&self, level: &str) -> bool {
        self.excluded_levels.contains(level)
    }
}
