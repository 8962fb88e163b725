//! Script persistence

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::LevelScript;

/// Destination for generated level scripts.
///
/// Implementations must be shareable across threads; levels are generated
/// in parallel.
pub trait ScriptWriter: Sync {
    /// Persist a script, fully replacing any previous content.
    ///
    /// # Returns
    /// The location the script was written to.
    fn write_script(&self, script: &LevelScript) -> Result<PathBuf>;
}

/// Writes each script to `<output_dir>/<level>_Script.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    output_dir: PathBuf,
}

impl DirectoryWriter {
    /// Create a writer targeting `output_dir`.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory scripts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a script would be written to.
    pub fn script_path(&self, script: &LevelScript) -> PathBuf {
        self.output_dir.join(script.file_name())
    }
}

impl ScriptWriter for DirectoryWriter {
    fn write_script(&self, script: &LevelScript) -> Result<PathBuf> {
        let path = self.script_path(script);
        let write_error = |source| Error::ScriptWrite {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.output_dir).map_err(write_error)?;
        std::fs::write(&path, script.render()).map_err(write_error)?;

        tracing::info!("Generated level script: {}", script.file_name());
        Ok(path)
    }
}
