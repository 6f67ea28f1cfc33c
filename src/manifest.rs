//! Build manifest index.
//!
//! The bundler that produced the raw output also wrote `manifest.json`, a
//! JSON object keyed by original source path whose values record the final
//! built file name. This module parses that document into an ordered index
//! and answers suffix queries against it, which is how source-relative
//! references inside the package descriptor are mapped to built files.

use serde_json::Value;

use crate::error::Result;
use crate::paths::slash;

/// One manifest record: an original source path and the file it became.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// Original source path, held slash-separated.
    pub src: String,
    /// Final built file name, relative to the output directory.
    pub file: String,
}

/// Ordered index over the build manifest.
///
/// Entries keep the manifest document's own order; [`lookup`] returns the
/// first match in that order.
///
/// [`lookup`]: ManifestIndex::lookup
#[derive(Debug, Clone)]
pub struct ManifestIndex {
    entries: Vec<ManifestEntry>,
}

impl ManifestIndex {
    /// Parses a manifest document into an index.
    ///
    /// The document must be a JSON object. Each value contributes one entry:
    /// `file` is taken from the value, `src` from the value when present and
    /// from the document key otherwise. Entries without a usable `src` or
    /// `file` are skipped; an empty `src` would match every candidate.
    ///
    /// # Arguments
    ///
    /// * `text` - Manifest document text
    ///
    /// # Returns
    ///
    /// The index, or a JSON error when the document does not parse.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        let mut entries = Vec::with_capacity(document.len());

        for (key, value) in &document {
            let src = value
                .get("src")
                .and_then(Value::as_str)
                .unwrap_or(key.as_str());
            if src.is_empty() {
                log::debug!("Skipping manifest entry with empty src: {key}");
                continue;
            }
            let Some(file) = value.get("file").and_then(Value::as_str) else {
                log::debug!("Skipping manifest entry without file: {key}");
                continue;
            };
            entries.push(ManifestEntry {
                src: slash(src),
                file: file.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Returns the number of usable entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the first entry whose `src` is a suffix of `candidate`.
    ///
    /// Both sides are compared slash-separated. When several entries share a
    /// suffix relationship the manifest document order decides.
    pub fn lookup(&self, candidate: &str) -> Option<&ManifestEntry> {
        self.find(&slash(candidate))
    }

    /// Rewrites `candidate` by replacing the matched `src` suffix with `file`.
    ///
    /// Exactly the trailing suffix is replaced; a `src` occurring earlier in
    /// the candidate is left alone. The non-matching prefix is preserved in
    /// slash form. Returns `None` when no entry matches.
    pub fn rewrite(&self, candidate: &str) -> Option<String> {
        let slashed = slash(candidate);
        let entry = self.find(&slashed)?;
        let prefix = slashed.strip_suffix(entry.src.as_str())?;
        Some(format!("{prefix}{}", entry.file))
    }

    /// First suffix match for an already-slashed candidate.
    fn find(&self, slashed: &str) -> Option<&ManifestEntry> {
        self.entries
            .iter()
            .find(|entry| slashed.ends_with(&entry.src))
    }
}
