//! Dataset loading and grouping.
//!
//! The source dataset is a JSON array of verse records. Loading assigns each
//! verse its stable `original_index` from its position in the array, then
//! groups verses by mandala number in order of first appearance (the main
//! circle is laid out in that order, not sorted by key).
//!
//! Validation is deliberately shallow: the input must be a non-empty array of
//! records; anything beyond that shape check is the producer's problem. A
//! load failure is fatal to initialization and carries file context.

use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use indexmap::IndexMap;

use crate::model::{Dataset, Verse};

/// Load a JSON dataset file and group it into mandalas.
pub fn load_dataset(path: impl AsRef<Utf8Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load dataset {}", path))?;
    parse_dataset(&text).with_context(|| format!("Failed to parse dataset {}", path))
}

/// Parse a JSON dataset from text. Exposed separately so tests and in-memory
/// callers skip the filesystem.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        bail!("Dataset must be a JSON array of verse records");
    }
    let verses: Vec<Verse> = serde_json::from_value(value)?;
    if verses.is_empty() {
        bail!("Dataset contains no verses");
    }
    Ok(group_verses(verses))
}

/// Assign `original_index` in source order and group by mandala number,
/// preserving first-appearance order.
pub fn group_verses(mut verses: Vec<Verse>) -> Dataset {
    for (i, v) in verses.iter_mut().enumerate() {
        v.original_index = i;
    }
    let mut groups: IndexMap<u32, Vec<Verse>> = IndexMap::new();
    for v in verses {
        groups.entry(v.mandala).or_default().push(v);
    }
    Dataset::from_grouped(groups)
}
