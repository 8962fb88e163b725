//! Types for level script generation progress and results

use std::path::PathBuf;

/// Progress callback type for script generation
pub type ScriptProgressCallback<'a> = &'a (dyn Fn(&ScriptProgress) + Sync + Send);

/// Progress information during script generation
#[derive(Debug, Clone)]
pub struct ScriptProgress {
    /// Current operation phase
    pub phase: ScriptPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current level being processed (if applicable)
    pub current_file: Option<String>,
}

impl ScriptProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: ScriptPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a level name
    #[must_use]
    pub fn with_file(phase: ScriptPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of a script generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    /// Listing level folders
    Discovering,
    /// Extracting dialogues and writing scripts
    Generating,
    /// Run complete
    Complete,
}

impl ScriptPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovering => "Discovering levels",
            Self::Generating => "Generating scripts",
            Self::Complete => "Complete",
        }
    }
}

/// Outcome of generating one level's script
#[derive(Debug, Clone)]
pub struct LevelOutcome {
    /// Level folder name
    pub level: String,
    /// Written script path, or the error message
    pub result: Result<PathBuf, String>,
    /// Number of dialogue blocks written
    pub dialogue_count: usize,
    /// Assets skipped because they could not be read or parsed
    pub skipped_assets: Vec<PathBuf>,
}

/// Result of a full script generation run
#[derive(Debug, Clone, Default)]
pub struct BatchScriptResult {
    /// Number of levels written
    pub success_count: usize,
    /// Number of levels that failed
    pub fail_count: usize,
    /// Messages for each level processed
    pub results: Vec<String>,
    /// Per-level outcomes, in level folder order
    pub outcomes: Vec<LevelOutcome>,
}

impl BatchScriptResult {
    /// Total number of assets skipped across all levels
    pub fn skipped_asset_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.skipped_assets.len()).sum()
    }
}
