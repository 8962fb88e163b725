//! Asset processing order
//!
//! Dialogue blocks appear in the script in the order their assets are
//! processed, which follows the authoring convention:
//!
//! 1. the level root (`level.asset`)
//! 2. topics (names starting with `Topic`)
//! 3. everything else that is not a proof
//! 4. proofs
//!
//! with a natural sort inside each group so `Topic2` precedes `Topic10`.

use std::cmp::Ordering;

/// Name of the level-root asset.
pub const LEVEL_ROOT_ASSET: &str = "level.asset";

/// One run of a natural-sort key.
///
/// Keys always alternate `Text`, `Number`, `Text`, ... starting with a
/// (possibly empty) `Text`, so runs at the same position share a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NaturalPart {
    /// Lowercased non-digit run.
    Text(String),
    /// Digit run, compared by numeric value.
    Number(DigitRun),
}

/// An arbitrary-length run of ASCII digits compared as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitRun(String);

impl DigitRun {
    fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self(trimmed.to_string())
    }
}

impl Ord for DigitRun {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for DigitRun {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Composite sort key of an asset file name, most significant field first.
///
/// `false` sorts before `true` for the three flags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetSortKey {
    /// Not the level root.
    pub not_level_root: bool,
    /// Does not start with `topic` (case-insensitive).
    pub not_topic: bool,
    /// Contains `proof` (case-insensitive).
    pub is_proof: bool,
    /// Tie-breaker.
    pub natural: Vec<NaturalPart>,
}

/// Split a name into alternating text and digit runs for natural ordering.
///
/// ```
/// use levelscript::level::ordering::natural_sort_key;
///
/// assert!(natural_sort_key("Topic2") < natural_sort_key("Topic10"));
/// assert_eq!(natural_sort_key("topic7"), natural_sort_key("Topic007"));
/// ```
pub fn natural_sort_key(name: &str) -> Vec<NaturalPart> {
    let mut parts = Vec::new();
    let mut rest = name;

    loop {
        let text_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        parts.push(NaturalPart::Text(rest[..text_end].to_lowercase()));
        rest = &rest[text_end..];
        if rest.is_empty() {
            break;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        parts.push(NaturalPart::Number(DigitRun::new(&rest[..digits_end])));
        rest = &rest[digits_end..];
    }

    parts
}

/// Compute the composite sort key of an asset file name.
pub fn asset_sort_key(name: &str) -> AssetSortKey {
    let lower = name.to_lowercase();
    AssetSortKey {
        not_level_root: lower != LEVEL_ROOT_ASSET,
        not_topic: !lower.starts_with("topic"),
        is_proof: lower.contains("proof"),
        natural: natural_sort_key(name),
    }
}

/// Sort asset file names into processing order.
///
/// The sort is stable, so names with identical keys keep their input order.
pub fn order_asset_files<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut keyed: Vec<(AssetSortKey, &str)> = names
        .iter()
        .map(|name| (asset_sort_key(name.as_ref()), name.as_ref()))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, name)| name.to_string()).collect()
}
