//! In-memory artifact registry.
//!
//! Emission phases register produced artifacts here instead of writing them
//! directly, so everything lands on disk in a single flush step. The phase
//! that flushes is the write barrier the descriptor rewrite depends on.

use std::path::Path;

use crate::error::{ErrorExt, Result};

/// One artifact produced by an emission phase.
#[derive(Debug, Clone)]
pub struct EmittedAsset {
    /// Destination name, slash-separated and relative to the output directory.
    pub file_name: String,
    /// Artifact contents.
    pub source: Vec<u8>,
}

impl EmittedAsset {
    /// Creates an artifact from a destination name and its contents.
    pub fn new(file_name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }
}

/// Collects emitted artifacts until [`write_to`] flushes them.
///
/// Registration order is kept; registering a name that is already present
/// replaces the earlier artifact in place.
///
/// [`write_to`]: OutputBundle::write_to
#[derive(Debug, Default)]
pub struct OutputBundle {
    assets: Vec<EmittedAsset>,
}

impl OutputBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artifact, replacing any earlier one with the same name.
    pub fn register(&mut self, asset: EmittedAsset) {
        match self
            .assets
            .iter()
            .position(|existing| existing.file_name == asset.file_name)
        {
            Some(index) => self.assets[index] = asset,
            None => self.assets.push(asset),
        }
    }

    /// Returns the registered artifacts in registration order.
    pub fn assets(&self) -> &[EmittedAsset] {
        &self.assets
    }

    /// Looks up an artifact by its destination name.
    pub fn get(&self, file_name: &str) -> Option<&EmittedAsset> {
        self.assets
            .iter()
            .find(|asset| asset.file_name == file_name)
    }

    /// Returns the number of registered artifacts.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Writes every registered artifact under `dir`, creating parent
    /// directories as needed. Files are fully written when this returns.
    ///
    /// # Arguments
    ///
    /// * `dir` - Output directory the artifact names are relative to
    ///
    /// # Returns
    ///
    /// The number of files written.
    pub async fn write_to(&self, dir: &Path) -> Result<usize> {
        for asset in &self.assets {
            let destination = dir.join(&asset.file_name);
            if let Some(parent) = destination.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .fs_context("creating directory", parent)?;
            }
            tokio::fs::write(&destination, &asset.source)
                .await
                .fs_context("writing artifact", &destination)?;
            log::debug!("Wrote {}", destination.display());
        }
        Ok(self.assets.len())
    }
}
