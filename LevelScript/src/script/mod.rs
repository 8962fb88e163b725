//! Dialogue script stubs
//!
//! Each dialogue id becomes one placeholder block in the game's script
//! markup. Writers fill in the placeholder text later; the label and the
//! completion call tie the block back to the level's deduction logic.
//!
//! ```text
//! @<| label 'Intro' |>
//! 这里放对话
//!
//! <| __Nova.deductionManager:DialogueFinished('Intro') |>
//! @<| is_end() |>
//!
//! ```

mod writer;

use std::path::PathBuf;

use crate::dialogue::DialogueId;

pub use writer::{DirectoryWriter, ScriptWriter};

/// Placeholder body line of every block.
pub const PLACEHOLDER_LINE: &str = "这里放对话";

/// Suffix appended to the level folder name to form the script name.
pub const SCRIPT_SUFFIX: &str = "_Script";

/// File extension of generated scripts (without the dot).
pub const SCRIPT_EXTENSION: &str = "txt";

/// Emit the script lines for one dialogue id.
///
/// The id is inserted verbatim; quotes are not escaped.
pub fn emit_block(id: &str) -> [String; 6] {
    [
        format!("@<| label '{id}' |>"),
        PLACEHOLDER_LINE.to_string(),
        String::new(),
        format!("<| __Nova.deductionManager:DialogueFinished('{id}') |>"),
        "@<| is_end() |>".to_string(),
        String::new(),
    ]
}

/// Emit the script lines for a sequence of dialogue ids, in order.
pub fn emit_script<S: AsRef<str>>(dialogues: &[S]) -> Vec<String> {
    dialogues
        .iter()
        .flat_map(|id| emit_block(id.as_ref()))
        .collect()
}

/// Join script lines into file content.
///
/// Lines are joined with `\n` and no newline is appended, so an empty script
/// renders as an empty string.
pub fn render_script(lines: &[String]) -> String {
    lines.join("\n")
}

/// Output name of a level's script (`<level>_Script`).
pub fn script_name(level_name: &str) -> String {
    format!("{level_name}{SCRIPT_SUFFIX}")
}

/// An asset file that contributed to a level script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetContribution {
    /// File name inside the level folder.
    pub file_name: String,
    /// Number of dialogue ids extracted from it.
    pub dialogue_count: usize,
}

/// An asset file left out of a level script.
#[derive(Debug, Clone)]
pub struct SkippedAsset {
    /// Full path of the asset.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// The generated script of one level
#[derive(Debug, Clone, Default)]
pub struct LevelScript {
    /// Level folder name.
    pub level: String,
    /// Dialogue ids in script order.
    pub dialogues: Vec<DialogueId>,
    /// Assets processed, in processing order.
    pub sources: Vec<AssetContribution>,
    /// Assets that could not be read or parsed.
    pub skipped: Vec<SkippedAsset>,
}

impl LevelScript {
    /// Create an empty script for a level
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Output identifier, `<level>_Script`.
    pub fn name(&self) -> String {
        script_name(&self.level)
    }

    /// Output file name, `<level>_Script.txt`.
    pub fn file_name(&self) -> String {
        format!("{}.{SCRIPT_EXTENSION}", self.name())
    }

    /// Script lines for all dialogues.
    pub fn lines(&self) -> Vec<String> {
        emit_script(&self.dialogues)
    }

    /// File content of the script.
    pub fn render(&self) -> String {
        render_script(&self.lines())
    }

    /// Number of dialogue blocks.
    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    /// Whether the script has no dialogue blocks.
    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emit_single_block() {
        assert_eq!(
            emit_script(&["Line1"]),
            vec![
                "@<| label 'Line1' |>",
                "这里放对话",
                "",
                "<| __Nova.deductionManager:DialogueFinished('Line1') |>",
                "@<| is_end() |>",
                "",
            ]
        );
    }

    #[test]
    fn test_emit_preserves_order_and_duplicates() {
        let lines = emit_script(&["B", "A", "B"]);
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "@<| label 'B' |>");
        assert_eq!(lines[6], "@<| label 'A' |>");
        assert_eq!(lines[12], "@<| label 'B' |>");
    }

    #[test]
    fn test_ids_are_not_escaped() {
        let block = emit_block("it's");
        assert_eq!(block[0], "@<| label 'it's' |>");
        assert_eq!(block[3], "<| __Nova.deductionManager:DialogueFinished('it's') |>");
    }

    #[test]
    fn test_empty_script() {
        let empty: [&str; 0] = [];
        assert!(emit_script(&empty).is_empty());

        let script = LevelScript::new("Empty");
        assert!(script.is_empty());
        assert_eq!(script.render(), "");
    }

    #[test]
    fn test_render_and_names() {
        let mut script = LevelScript::new("Level01");
        script.dialogues.push("Hi".to_string());
        assert_eq!(script.name(), "Level01_Script");
        assert_eq!(script.file_name(), "Level01_Script.txt");
        assert_eq!(
            script.render(),
            "@<| label 'Hi' |>\n这里放对话\n\n<| __Nova.deductionManager:DialogueFinished('Hi') |>\n@<| is_end() |>\n"
        );
    }
}
