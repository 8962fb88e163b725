//! Level folders - discovery, asset ordering and script generation
//!
//! A level folder groups the assets of one interrogation level:
//! - `level.asset` - the level root
//! - `Topic*.asset` - discussion topics
//! - `*Proof*.asset` - pieces of evidence
//!
//! [`LevelPipeline`] turns each folder into a `<level>_Script.txt` stub.

pub mod discovery;
pub mod ordering;
pub mod pipeline;
pub mod types;

pub use discovery::{
    LevelScan, UnreadableEntry, find_candidate_assets, find_level_folders, is_candidate_asset,
    scan_level_folder,
};
pub use ordering::{AssetSortKey, NaturalPart, asset_sort_key, natural_sort_key, order_asset_files};
pub use pipeline::{LevelPipeline, level_name};
pub use types::{
    BatchScriptResult, LevelOutcome, ScriptPhase, ScriptProgress, ScriptProgressCallback,
};
