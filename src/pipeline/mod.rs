//! Packaging pipeline orchestration.
//!
//! This module provides the [`Pipeline`] that coordinates the packaging
//! phases over a finished bundler output:
//!
//! 1. Emit the localization and static asset trees into an in-memory bundle
//! 2. Emit the package descriptor into the bundle
//! 3. Flush the bundle to the output directory
//! 4. Rewrite descriptor references through the build manifest
//! 5. Remove the manifest unless it was requested
//! 6. Optionally archive the output directory
//!
//! The phases run strictly in order; a build-tool integrator may drive the
//! step methods at its own lifecycle points, or call [`Pipeline::run`] to
//! execute the whole sequence.

mod phase;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::bundle::{EmittedAsset, OutputBundle};
use crate::emit::{emit_tree, I18nTree, StaticTree};
use crate::error::{Context, Error, ErrorExt, Result};
use crate::manifest::ManifestIndex;
use crate::rewrite::rewrite_descriptor;
use crate::settings::Settings;
use crate::{archive, bail};

pub use phase::Phase;

/// Fixed descriptor artifact name in the output directory.
pub const DESCRIPTOR_FILE_NAME: &str = "package.json";

/// Manifest document name the external bundler writes.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// The produced archive file.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveArtifact {
    /// Archive location under the project root.
    pub path: PathBuf,

    /// Size in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 checksum.
    pub checksum: String,
}

/// Result record for a completed packaging run.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Number of distinct asset files emitted into the output directory.
    ///
    /// Sources that flatten to the same destination register once.
    pub emitted_assets: usize,

    /// Path of the rewritten descriptor.
    pub descriptor_path: PathBuf,

    /// Whether the manifest was removed during cleanup.
    pub manifest_removed: bool,

    /// The produced archive, when the archive step is enabled.
    pub archive: Option<ArchiveArtifact>,
}

/// Post-build packaging pipeline.
///
/// Owns the phase state machine and the in-memory bundle between the emit
/// phases and the flush. A pipeline packages one build; construct a new one
/// per run.
///
/// # Examples
///
/// ```no_run
/// use postbundle::{Pipeline, SettingsBuilder};
///
/// # async fn example() -> postbundle::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/path/to/extension")
///     .output_directory("dist")
///     .build()?;
///
/// let report = Pipeline::new(settings).run().await?;
/// println!("emitted {} asset file(s)", report.emitted_assets);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    settings: Settings,
    bundle: OutputBundle,
    phase: Phase,
    emitted_assets: usize,
}

impl Pipeline {
    /// Creates a pipeline over a finished bundler output.
    ///
    /// The pipeline starts at [`Phase::RawOutputReady`]: the external
    /// bundler is expected to have written its compiled output and the
    /// manifest into the output directory already. That precondition is not
    /// checked until the rewrite phase needs the artifacts.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            bundle: OutputBundle::new(),
            phase: Phase::RawOutputReady,
            emitted_assets: 0,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns a reference to the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the in-memory bundle of artifacts registered so far.
    pub fn bundle(&self) -> &OutputBundle {
        &self.bundle
    }

    /// Emits the localization and static asset trees into the bundle.
    ///
    /// Requires [`Phase::RawOutputReady`]. Missing or empty trees register
    /// nothing; both trees are complete when this returns.
    ///
    /// # Returns
    ///
    /// The number of distinct asset files registered. Sources that flatten
    /// to the same destination count once.
    pub async fn emit_assets(&mut self) -> Result<usize> {
        self.require(Phase::RawOutputReady)?;
        log::info!("Emitting asset trees");

        emit_tree(
            &self.settings.resolved_i18n_dir(),
            Arc::new(I18nTree),
            &mut self.bundle,
        )
        .await?;
        emit_tree(
            &self.settings.resolved_static_dir(),
            Arc::new(StaticTree::new(self.settings.static_prefix())),
            &mut self.bundle,
        )
        .await?;

        // Nothing else is registered yet, so the bundle holds exactly the
        // distinct asset destinations.
        let count = self.bundle.len();
        self.emitted_assets = count;
        log::info!("✓ Emitted {count} asset file(s)");
        self.advance();
        Ok(count)
    }

    /// Reads the configured descriptor and registers it into the bundle
    /// under its canonical output name.
    ///
    /// Requires [`Phase::AssetsEmitted`]. The descriptor text is registered
    /// verbatim; references are rewritten later, once everything is on disk.
    pub async fn emit_descriptor(&mut self) -> Result<()> {
        self.require(Phase::AssetsEmitted)?;
        let source = self.settings.resolved_package_path();
        log::info!("Emitting descriptor from {}", source.display());

        let contents = tokio::fs::read(&source)
            .await
            .fs_context("reading descriptor", &source)?;
        self.bundle
            .register(EmittedAsset::new(DESCRIPTOR_FILE_NAME, contents));
        self.advance();
        Ok(())
    }

    /// Flushes every registered artifact to the output directory.
    ///
    /// Requires [`Phase::DescriptorEmitted`]. All files are fully written
    /// when this returns, which is what the rewrite phase depends on.
    ///
    /// # Returns
    ///
    /// The number of files written.
    pub async fn write_output(&mut self) -> Result<usize> {
        self.require(Phase::DescriptorEmitted)?;
        let out_dir = self.settings.resolved_output_directory();
        tokio::fs::create_dir_all(&out_dir)
            .await
            .fs_context("creating directory", &out_dir)?;

        let written = self.bundle.write_to(&out_dir).await?;
        log::info!("✓ Wrote {written} file(s) to {}", out_dir.display());
        self.advance();
        Ok(written)
    }

    /// Rewrites descriptor references through the build manifest.
    ///
    /// Requires [`Phase::OutputWritten`]. Both the descriptor and the
    /// manifest must exist in the output directory; either one missing is a
    /// [`Error::MissingArtifact`]. The descriptor is overwritten in place.
    pub async fn rewrite_descriptor(&mut self) -> Result<()> {
        self.require(Phase::OutputWritten)?;
        let out_dir = self.settings.resolved_output_directory();
        let descriptor_path = out_dir.join(DESCRIPTOR_FILE_NAME);
        let manifest_path = out_dir.join(MANIFEST_FILE_NAME);

        let descriptor = read_artifact(&descriptor_path, DESCRIPTOR_FILE_NAME, &out_dir).await?;
        let manifest = read_artifact(&manifest_path, MANIFEST_FILE_NAME, &out_dir).await?;

        let index = ManifestIndex::from_json(&manifest)?;
        log::debug!("Manifest carries {} usable entries", index.len());
        let rewritten = rewrite_descriptor(&descriptor, &index)?;
        tokio::fs::write(&descriptor_path, rewritten)
            .await
            .fs_context("writing descriptor", &descriptor_path)?;

        log::info!("✓ Rewrote descriptor references");
        self.advance();
        Ok(())
    }

    /// Removes the manifest from the output directory unless the caller
    /// explicitly requested one.
    ///
    /// Requires [`Phase::DescriptorRewritten`]. A requested manifest is left
    /// untouched.
    ///
    /// # Returns
    ///
    /// Whether the manifest was removed.
    pub async fn clean_manifest(&mut self) -> Result<bool> {
        self.require(Phase::DescriptorRewritten)?;
        let manifest_path = self
            .settings
            .resolved_output_directory()
            .join(MANIFEST_FILE_NAME);

        let removed = if self.settings.manifest_requested() {
            log::debug!("Manifest was requested, keeping {}", manifest_path.display());
            false
        } else {
            match tokio::fs::remove_file(&manifest_path).await {
                Ok(()) => {
                    log::info!("✓ Removed {}", manifest_path.display());
                    true
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => false, // Idempotent
                Err(e) => return Err(e.into()),
            }
        };
        self.advance();
        Ok(removed)
    }

    /// Archives the output directory, when the archive step is enabled.
    ///
    /// Requires [`Phase::ManifestCleaned`]. The archive lands under the
    /// project root, named after the configured file name or the last `/`
    /// segment of the descriptor `name` field.
    ///
    /// # Returns
    ///
    /// The produced artifact, or `None` when archiving is disabled.
    pub async fn package(&mut self) -> Result<Option<ArchiveArtifact>> {
        self.require(Phase::ManifestCleaned)?;
        let Some(archive_settings) = self.settings.archive().cloned() else {
            log::debug!("Archive step disabled");
            self.advance();
            return Ok(None);
        };

        let file_name = match archive_settings.file_name {
            Some(name) => name,
            None => self.derive_archive_name().await?,
        };
        log::info!("zip files: {file_name}");

        let destination = self.settings.project_root().join(&file_name);
        let out_dir = self.settings.resolved_output_directory();
        archive::zip_dir(&out_dir, &destination).await?;

        let metadata = tokio::fs::metadata(&destination)
            .await
            .fs_context("reading artifact metadata", &destination)?;
        let checksum = archive::calculate_sha256(&destination).await?;
        log::info!("✓ Created archive: {}", destination.display());

        self.advance();
        Ok(Some(ArchiveArtifact {
            path: destination,
            size: metadata.len(),
            checksum,
        }))
    }

    /// Runs every phase in order and returns the run's result record.
    ///
    /// A failed phase aborts the remaining ones; side effects of completed
    /// phases stay on disk.
    pub async fn run(mut self) -> Result<PackageReport> {
        self.emit_assets().await?;
        self.emit_descriptor().await?;
        self.write_output().await?;
        self.rewrite_descriptor().await?;
        let manifest_removed = self.clean_manifest().await?;
        let archive = self.package().await?;

        Ok(PackageReport {
            emitted_assets: self.emitted_assets,
            descriptor_path: self
                .settings
                .resolved_output_directory()
                .join(DESCRIPTOR_FILE_NAME),
            manifest_removed,
            archive,
        })
    }

    /// Derives the archive file name from the descriptor `name` field.
    async fn derive_archive_name(&self) -> Result<String> {
        let out_dir = self.settings.resolved_output_directory();
        let path = out_dir.join(DESCRIPTOR_FILE_NAME);
        let text = read_artifact(&path, DESCRIPTOR_FILE_NAME, &out_dir).await?;
        let descriptor: Value = serde_json::from_str(&text)?;
        let name = descriptor
            .get("name")
            .and_then(Value::as_str)
            .context("descriptor name is required to derive the archive file name")?;
        if name.is_empty() {
            bail!("descriptor name is empty, cannot derive the archive file name");
        }
        let last = name.rsplit('/').next().unwrap_or(name);
        Ok(format!("{last}.zip"))
    }

    fn require(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::PhaseOrder {
                expected: expected.name(),
                actual: self.phase.name(),
            })
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.phase.successor() {
            self.phase = next;
        }
    }
}

/// Reads a required artifact from the output directory.
async fn read_artifact(path: &Path, artifact: &str, dir: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::MissingArtifact {
            artifact: artifact.to_string(),
            dir: dir.to_path_buf(),
        }),
        Err(e) => Err(Error::Fs {
            action: "reading artifact".to_string(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBuilder;

    fn pipeline_at(root: &Path) -> Pipeline {
        let settings = SettingsBuilder::new()
            .project_root(root)
            .output_directory("dist")
            .build()
            .unwrap();
        Pipeline::new(settings)
    }

    #[tokio::test]
    async fn steps_refuse_out_of_order_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = pipeline_at(dir.path());

        let err = pipeline.rewrite_descriptor().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "pipeline is at phase raw-output-ready, step requires phase output-written"
        );
        assert_eq!(pipeline.phase(), Phase::RawOutputReady);
    }

    #[tokio::test]
    async fn emitting_missing_trees_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = pipeline_at(dir.path());

        let count = pipeline.emit_assets().await.unwrap();
        assert_eq!(count, 0);
        assert!(pipeline.bundle().is_empty());
        assert_eq!(pipeline.phase(), Phase::AssetsEmitted);
    }

    #[tokio::test]
    async fn a_failed_step_does_not_advance() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = pipeline_at(dir.path());

        pipeline.emit_assets().await.unwrap();
        // No descriptor file exists in the project root.
        assert!(pipeline.emit_descriptor().await.is_err());
        assert_eq!(pipeline.phase(), Phase::AssetsEmitted);
    }
}
