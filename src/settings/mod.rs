//! Configuration structures for packaging runs.
//!
//! This module provides the configuration types consumed by the pipeline:
//! project and output locations, asset tree directories, the optional
//! archive step, and a builder pattern for constructing settings.

mod archive;
mod builder;
mod core;

// Re-export all public types
pub use archive::ArchiveSettings;
pub use builder::SettingsBuilder;
pub use core::{Settings, DEFAULT_I18N_DIR, DEFAULT_PACKAGE_PATH, DEFAULT_STATIC_DIR};
