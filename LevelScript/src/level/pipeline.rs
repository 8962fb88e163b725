//! Level script generation pipeline
//!
//! For every level folder: list candidate assets, put them in authoring
//! order, extract dialogue ids from each in turn, and write the resulting
//! script. Levels are independent and run in parallel; within a level, assets
//! are always processed sequentially so the script order is deterministic.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::config::{ParseErrorPolicy, PipelineConfig};
use crate::dialogue::read_asset_dialogues;
use crate::error::{Error, Result};
use crate::script::{AssetContribution, DirectoryWriter, LevelScript, ScriptWriter, SkippedAsset};

use super::discovery::{LevelScan, find_level_folders, scan_level_folder};
use super::ordering::order_asset_files;
use super::types::{
    BatchScriptResult, LevelOutcome, ScriptPhase, ScriptProgress, ScriptProgressCallback,
};

/// Name of a level, taken from its folder name.
pub fn level_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Generates dialogue script stubs for a tree of level folders
#[derive(Debug, Clone, Default)]
pub struct LevelPipeline {
    config: PipelineConfig,
}

impl LevelPipeline {
    /// Create a pipeline from an explicit configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Writer targeting the configured output directory.
    pub fn directory_writer(&self) -> DirectoryWriter {
        DirectoryWriter::new(&self.config.output_dir)
    }

    /// Level folders to process, sorted by name, exclusions applied.
    pub fn level_folders(&self) -> Result<Vec<PathBuf>> {
        find_level_folders(&self.config.levels_dir, |name| self.config.is_excluded(name))
    }

    /// Candidate asset file names of a level folder, in processing order.
    pub fn candidate_assets(&self, folder: &Path) -> Result<Vec<String>> {
        let scan = self.scan(folder)?;
        for skipped in &scan.unreadable {
            tracing::warn!("Skipping unreadable asset: {}", skipped.error);
        }
        Ok(scan.assets)
    }

    /// Scan a level folder, with the candidate assets put in processing order.
    fn scan(&self, folder: &Path) -> Result<LevelScan> {
        let mut scan = scan_level_folder(folder, &self.config.asset_extension)?;
        scan.assets = order_asset_files(&scan.assets);
        tracing::debug!("Asset order for {}: {:?}", folder.display(), scan.assets);
        Ok(scan)
    }

    /// Build the script of one level folder without writing it
    ///
    /// Assets that cannot be read or parsed, including candidate entries
    /// that could not be listed, are handled according to
    /// [`PipelineConfig::on_parse_error`]: skipped and recorded in
    /// [`LevelScript::skipped`], or returned as the level's error.
    pub fn build_level(&self, folder: &Path) -> Result<LevelScript> {
        let mut script = LevelScript::new(level_name(folder));
        let scan = self.scan(folder)?;

        for unreadable in scan.unreadable {
            self.handle_bad_asset(&mut script, unreadable.path, unreadable.error)?;
        }

        for file_name in scan.assets {
            let path = folder.join(&file_name);
            tracing::info!("Extracting dialogues: {}", path.display());

            match read_asset_dialogues(&path) {
                Ok(dialogues) => {
                    script.sources.push(AssetContribution {
                        file_name,
                        dialogue_count: dialogues.len(),
                    });
                    script.dialogues.extend(dialogues);
                }
                Err(e) => self.handle_bad_asset(&mut script, path, e)?,
            }
        }

        Ok(script)
    }

    /// Apply the parse-error policy to an asset that could not be used.
    fn handle_bad_asset(
        &self,
        script: &mut LevelScript,
        path: PathBuf,
        error: Error,
    ) -> Result<()> {
        match self.config.on_parse_error {
            ParseErrorPolicy::Skip => {
                tracing::warn!("Skipping asset {}: {error}", path.display());
                script.skipped.push(SkippedAsset {
                    path,
                    reason: error.to_string(),
                });
                Ok(())
            }
            ParseErrorPolicy::AbortLevel => {
                tracing::error!("Aborting level {}: {error}", script.level);
                Err(error)
            }
        }
    }

    /// Build and write the script of one level folder.
    pub fn generate_level<W: ScriptWriter + ?Sized>(&self, folder: &Path, writer: &W) -> LevelOutcome {
        let level = level_name(folder);
        match self.build_level(folder) {
            Ok(script) => LevelOutcome {
                result: writer.write_script(&script).map_err(|e| e.to_string()),
                dialogue_count: script.len(),
                skipped_assets: script.skipped.into_iter().map(|s| s.path).collect(),
                level,
            },
            Err(e) => LevelOutcome {
                level,
                result: Err(e.to_string()),
                dialogue_count: 0,
                skipped_assets: Vec::new(),
            },
        }
    }

    /// Generate all level scripts into the configured output directory.
    pub fn run(&self) -> Result<BatchScriptResult> {
        self.run_with_progress(&self.directory_writer(), &|_| {})
    }

    /// Generate all level scripts through `writer`, reporting progress
    ///
    /// A failing level is recorded in the result and does not stop the
    /// others.
    ///
    /// # Errors
    /// Returns [`Error::MissingDirectory`](crate::Error::MissingDirectory)
    /// if the level-list directory does not exist.
    pub fn run_with_progress<W: ScriptWriter + ?Sized>(
        &self,
        writer: &W,
        progress: ScriptProgressCallback,
    ) -> Result<BatchScriptResult> {
        progress(&ScriptProgress::new(ScriptPhase::Discovering, 0, 1));
        let folders = self.level_folders()?;
        let total = folders.len();
        tracing::info!(
            "Found {total} level(s) in {}",
            self.config.levels_dir.display()
        );

        let processed = AtomicUsize::new(0);
        let outcomes: Vec<LevelOutcome> = folders
            .par_iter()
            .map(|folder| {
                let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(&ScriptProgress::with_file(
                    ScriptPhase::Generating,
                    current,
                    total,
                    level_name(folder),
                ));
                self.generate_level(folder, writer)
            })
            .collect();

        let mut batch = BatchScriptResult::default();
        for outcome in &outcomes {
            match &outcome.result {
                Ok(path) => {
                    batch.success_count += 1;
                    batch.results.push(format!(
                        "Generated: {} ({} dialogues)",
                        path.display(),
                        outcome.dialogue_count
                    ));
                }
                Err(e) => {
                    batch.fail_count += 1;
                    tracing::warn!("Level {} failed: {e}", outcome.level);
                    batch.results.push(format!("Failed {}: {e}", outcome.level));
                }
            }
        }
        batch.outcomes = outcomes;

        progress(&ScriptProgress::new(ScriptPhase::Complete, total, total));
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name() {
        assert_eq!(level_name(Path::new("Levels/Case01")), "Case01");
        assert_eq!(level_name(Path::new("/")), "");
    }
}
