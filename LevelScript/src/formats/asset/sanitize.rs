//! Unity directive stripping
//!
//! Unity serializes assets as "YAML with extras": a `%YAML`/`%TAG` header,
//! `--- !u!114 &11400000` document separators carrying class IDs and file IDs,
//! and `&<fileID>` anchors that a generic YAML parser either rejects or
//! misreads. This module removes those parts so the rest parses as plain YAML.

use std::sync::OnceLock;

use regex::Regex;

/// Prefix of Unity's type-tag handle (`!u!114`).
const UNITY_TAG_PREFIX: &str = "!u!";

fn object_reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"&\d+").expect("valid regex"))
}

/// Returns true for header, separator and type-tag lines.
pub fn is_directive_line(line: &str) -> bool {
    let trimmed = line.trim();
    line.starts_with('%') || trimmed.starts_with("---") || trimmed.starts_with(UNITY_TAG_PREFIX)
}

/// Remove every inline object-reference token (`&11400000`) from a line.
pub fn strip_object_references(line: &str) -> String {
    object_reference_pattern().replace_all(line, "").into_owned()
}

/// Returns true for a `---` document separator line.
pub fn is_document_separator(line: &str) -> bool {
    line.trim().starts_with("---")
}

/// Sanitize raw asset text for YAML parsing
///
/// Drops directive lines (see [`is_directive_line`]) and strips object
/// references from every remaining line. Lines are split on `\n` only and
/// re-joined with `\n`, so anything else on a line (including a trailing
/// `\r`) passes through untouched.
///
/// The directive check runs on the raw line, before references are
/// stripped. A line that only looks like a directive once its `&<digits>`
/// tokens are gone (`&1--- x`) is kept as `--- x`, so sanitizing that output
/// again drops it. Apart from such lines, `sanitize` is idempotent.
pub fn sanitize(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !is_directive_line(line))
        .map(strip_object_references)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sanitize raw asset text, one string per YAML document
///
/// Unity writes one document per serialized object, each opened by a
/// `--- !u!<class> &<fileID>` separator. Lines are sanitized as in
/// [`sanitize`], but a separator also starts a new document. Documents left
/// empty after sanitizing (such as the `%YAML` header) are dropped.
pub fn sanitize_documents(content: &str) -> Vec<String> {
    let mut documents: Vec<Vec<String>> = vec![Vec::new()];
    for line in content.split('\n') {
        if is_document_separator(line) {
            documents.push(Vec::new());
        } else if !is_directive_line(line) {
            if let Some(current) = documents.last_mut() {
                current.push(strip_object_references(line));
            }
        }
    }

    documents
        .into_iter()
        .map(|lines| lines.join("\n"))
        .filter(|document| !document.trim().is_empty())
        .collect()
}
