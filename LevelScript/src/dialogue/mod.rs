//! Dialogue id extraction
//!
//! Level assets do not share a schema: topics, proofs and the level root each
//! carry their own fields, nested at arbitrary depth. What they do share is a
//! naming convention: any field whose name ends in `Dialogue` holds a dialogue
//! id, or a list of them. Extraction therefore walks the untyped YAML tree and
//! collects those fields in document order.
//!
//! ```
//! use levelscript::dialogue::extract_dialogues_from_str;
//!
//! let raw = "\
//! MonoBehaviour:
//!   introDialogue: Intro
//!   steps:
//!     - failDialogue: [Fail_1, Fail_2]
//! ";
//! assert_eq!(extract_dialogues_from_str(raw)?, ["Intro", "Fail_1", "Fail_2"]);
//! # Ok::<(), levelscript::Error>(())
//! ```

use std::path::Path;

use serde_yaml::Value;

use crate::error::Result;
use crate::formats::asset::{parse_asset, read_asset};

/// A dialogue id, used verbatim as a script label.
pub type DialogueId = String;

/// Field-name suffix marking a dialogue field (case-sensitive).
pub const DIALOGUE_SUFFIX: &str = "Dialogue";

/// Returns true if a mapping key names a dialogue field.
pub fn is_dialogue_key(key: &str) -> bool {
    key.ends_with(DIALOGUE_SUFFIX)
}

/// Collect every dialogue id in a parsed asset, in pre-order.
pub fn extract_dialogues(root: &Value) -> Vec<DialogueId> {
    let mut dialogues = Vec::new();
    collect(root, &mut dialogues);
    dialogues
}

/// Sanitize, parse and extract dialogue ids from raw asset text.
///
/// The documents of a multi-object asset are walked in file order.
pub fn extract_dialogues_from_str(content: &str) -> Result<Vec<DialogueId>> {
    Ok(extract_from_documents(&parse_asset(content)?))
}

/// Read an asset file and extract its dialogue ids.
pub fn read_asset_dialogues<P: AsRef<Path>>(path: P) -> Result<Vec<DialogueId>> {
    let path = path.as_ref();
    let dialogues = extract_from_documents(&read_asset(path)?);
    tracing::debug!("{} dialogue(s) in {}", dialogues.len(), path.display());
    Ok(dialogues)
}

fn extract_from_documents(documents: &[Value]) -> Vec<DialogueId> {
    let mut dialogues = Vec::new();
    for document in documents {
        collect(document, &mut dialogues);
    }
    dialogues
}

fn collect(value: &Value, out: &mut Vec<DialogueId>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                if key.as_str().is_some_and(is_dialogue_key) {
                    take_field_value(child, out);
                }
                // Matched values are still walked; dialogue fields may nest.
                collect(child, out);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect(item, out);
            }
        }
        Value::Tagged(tagged) => collect(&tagged.value, out),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Append the ids held directly by a dialogue field's value.
fn take_field_value(value: &Value, out: &mut Vec<DialogueId>) {
    match value {
        Value::String(id) => out.push(id.clone()),
        Value::Sequence(items) => out.extend(items.iter().filter_map(scalar_text)),
        _ => {}
    }
}

/// Text form of a list element; null and collections have none.
fn scalar_text(value: &Value) -> Option<DialogueId> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
