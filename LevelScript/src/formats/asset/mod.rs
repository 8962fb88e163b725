//! Unity `.asset` documents
//!
//! Level data is authored as Unity `ScriptableObject` assets, serialized in
//! Unity's YAML dialect. Reading one is a two-step affair:
//! [`sanitize`] drops the Unity-specific directives, then [`parse_document`]
//! hands the remainder to `serde_yaml`. Assets holding several objects are
//! split into one document per object first (see [`parse_asset`]).
//!
//! ```
//! use levelscript::formats::asset::{parse_document, sanitize};
//!
//! let raw = "%YAML 1.1\n--- !u!114 &11400000\nMonoBehaviour:\n  m_Name: level\n";
//! let value = parse_document(&sanitize(raw))?;
//! assert!(value.get("MonoBehaviour").is_some());
//! # Ok::<(), levelscript::Error>(())
//! ```

mod sanitize;

use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};

pub use sanitize::{
    is_directive_line, is_document_separator, sanitize, sanitize_documents,
    strip_object_references,
};

/// File extension of Unity asset files (without the dot).
pub const ASSET_EXTENSION: &str = "asset";

/// Parse sanitized asset text into a YAML value tree.
///
/// Whitespace-only text is an empty document and yields [`Value::Null`].
pub fn parse_document(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Sanitize and parse raw asset text
///
/// # Returns
/// One value tree per non-empty document, in file order. Each object of a
/// multi-object asset is parsed on its own, so objects repeating the same
/// top-level key (`MonoBehaviour`) do not collide.
pub fn parse_asset(content: &str) -> Result<Vec<Value>> {
    sanitize_documents(content)
        .iter()
        .map(|document| parse_document(document))
        .collect()
}

/// Read and parse an asset file from disk.
///
/// Errors carry the file path: [`Error::AssetRead`] when the file cannot be
/// read, [`Error::AssetParse`] when the sanitized text is not valid YAML.
pub fn read_asset<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::AssetRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_asset(&content).map_err(|e| Error::AssetParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_document("").unwrap(), Value::Null);
        assert_eq!(parse_document("\n  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_unity_asset() {
        let raw = concat!(
            "%YAML 1.1\n",
            "%TAG !u! tag:unity3d.com,2011:\n",
            "--- !u!114 &11400000\n",
            "MonoBehaviour:\n",
            "  m_Script: {fileID: 11500000, guid: 4f1c, type: 3}\n",
            "  topicDialogue: Topic_Intro\n",
        );
        let documents = parse_asset(raw).unwrap();
        assert_eq!(documents.len(), 1);
        let behaviour = documents[0].get("MonoBehaviour").unwrap();
        assert_eq!(
            behaviour.get("topicDialogue").and_then(Value::as_str),
            Some("Topic_Intro")
        );
    }

    #[test]
    fn test_parse_multi_object_asset() {
        let raw = concat!(
            "%YAML 1.1\n",
            "--- !u!114 &1\n",
            "MonoBehaviour:\n",
            "  aDialogue: One\n",
            "--- !u!114 &2\n",
            "MonoBehaviour:\n",
            "  aDialogue: Two\n",
        );
        let names: Vec<_> = parse_asset(raw)
            .unwrap()
            .iter()
            .map(|doc| doc["MonoBehaviour"]["aDialogue"].as_str().map(str::to_string))
            .collect();
        assert_eq!(names, [Some("One".to_string()), Some("Two".to_string())]);
    }

    #[test]
    fn test_parse_asset_header_only() {
        assert!(parse_asset("%YAML 1.1\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_document() {
        let result = parse_document("key: [unclosed");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_read_asset_missing_file() {
        let result = read_asset("definitely/not/here.asset");
        assert!(matches!(result, Err(Error::AssetRead { .. })));
    }
}
