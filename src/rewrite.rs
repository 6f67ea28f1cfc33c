//! Descriptor reference rewriting.
//!
//! The package descriptor refers to source files (`./src/index.ts`); after a
//! build those references must point at the built files the manifest records.
//! The rewrite deep-walks the parsed document and replaces every string
//! value whose suffix matches a manifest entry.

use serde_json::Value;

use crate::error::Result;
use crate::manifest::ManifestIndex;

/// Rewrites every matching string value in a descriptor document.
///
/// The text is parsed as JSON, walked depth-first through objects and
/// arrays, and re-serialized pretty-printed with its key order intact.
/// Numbers, booleans and nulls are untouched, as are object keys. Once no
/// string value ends with a manifest `src` any more, a further rewrite is a
/// no-op.
///
/// # Arguments
///
/// * `text` - Descriptor document text
/// * `index` - Manifest index supplying the replacements
///
/// # Returns
///
/// The rewritten document, pretty-printed with 2-space indentation.
pub fn rewrite_descriptor(text: &str, index: &ManifestIndex) -> Result<String> {
    let mut document: Value = serde_json::from_str(text)?;
    let rewritten = rewrite_value(&mut document, index);
    log::debug!("Rewrote {rewritten} descriptor reference(s)");
    Ok(serde_json::to_string_pretty(&document)?)
}

fn rewrite_value(value: &mut Value, index: &ManifestIndex) -> usize {
    match value {
        Value::String(text) => match index.rewrite(text) {
            Some(replacement) => {
                log::debug!("Rewriting {text} -> {replacement}");
                *text = replacement;
                1
            }
            None => 0,
        },
        Value::Array(items) => items
            .iter_mut()
            .map(|item| rewrite_value(item, index))
            .sum(),
        Value::Object(map) => map
            .values_mut()
            .map(|item| rewrite_value(item, index))
            .sum(),
        _ => 0,
    }
}
