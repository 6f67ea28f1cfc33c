//! Post-build packaging pipeline for bundler output
//!
//! After a bundler has compiled a project into an output directory, this
//! library finishes the job:
//! - emits localization and static asset trees into the output
//! - rewrites source references in the package descriptor to built files
//! - optionally archives the finished output into a single zip
//!
//! It ships no binary; a build-tool integration drives the [`Pipeline`]
//! from its own lifecycle hooks, or calls [`Pipeline::run`] for the whole
//! sequence.

pub mod archive;
pub mod bundle;
pub mod emit;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod rewrite;
pub mod settings;

// Re-export commonly used types
pub use bundle::{EmittedAsset, OutputBundle};
pub use error::{Context, Error, ErrorExt, Result};
pub use manifest::{ManifestEntry, ManifestIndex};
pub use pipeline::{
    ArchiveArtifact, PackageReport, Phase, Pipeline, DESCRIPTOR_FILE_NAME, MANIFEST_FILE_NAME,
};
pub use settings::{ArchiveSettings, Settings, SettingsBuilder};
