//! # LevelScript
//!
//! Generates placeholder dialogue scripts from Unity level assets.
//!
//! Every interrogation level is a folder of `.asset` files (the level root,
//! its topics and its proofs). Any field whose name ends in `Dialogue` names
//! a dialogue the level expects to play. `LevelScript` collects those ids in
//! authoring order and writes one `<level>_Script.txt` per level, with a
//! labelled placeholder block for each dialogue.
//!
//! ## Quick Start
//!
//! ### Generating All Levels
//!
//! ```no_run
//! use levelscript::prelude::*;
//!
//! let pipeline = LevelPipeline::new(PipelineConfig::for_project("MyUnityProject"));
//! let result = pipeline.run()?;
//! println!("{} scripts written, {} failed", result.success_count, result.fail_count);
//! # Ok::<(), levelscript::Error>(())
//! ```
//!
//! ### Extracting Dialogues From One Asset
//!
//! ```no_run
//! use levelscript::dialogue::read_asset_dialogues;
//!
//! for id in read_asset_dialogues("Levels/Case01/Topic1.asset")? {
//!     println!("{id}");
//! }
//! # Ok::<(), levelscript::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `levelscript` command-line binary

pub mod config;
pub mod dialogue;
pub mod error;
pub mod formats;
pub mod level;
pub mod script;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{ParseErrorPolicy, PipelineConfig};
    pub use crate::dialogue::{DialogueId, extract_dialogues, read_asset_dialogues};
    pub use crate::error::{Error, Result};
    pub use crate::formats::asset::{parse_document, read_asset, sanitize};
    pub use crate::level::{
        BatchScriptResult, LevelPipeline, ScriptPhase, ScriptProgress, order_asset_files,
    };
    pub use crate::script::{DirectoryWriter, LevelScript, ScriptWriter, emit_script};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
