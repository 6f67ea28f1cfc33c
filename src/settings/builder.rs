//! Builder for constructing Settings.

use std::path::{Path, PathBuf};

use super::core::{DEFAULT_I18N_DIR, DEFAULT_PACKAGE_PATH, DEFAULT_STATIC_DIR};
use super::{ArchiveSettings, Settings};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building pipeline settings with validation.
///
/// # Examples
///
/// ```no_run
/// use postbundle::{ArchiveSettings, SettingsBuilder};
///
/// # fn example() -> postbundle::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/path/to/extension")
///     .output_directory("dist")
///     .i18n_dir("locales")
///     .archive(ArchiveSettings::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    package_path: Option<PathBuf>,
    i18n_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    archive: Option<ArchiveSettings>,
    manifest_requested: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory the external bundler wrote into.
    ///
    /// A relative path is interpreted under the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the package descriptor location.
    ///
    /// Default: `package.json`
    pub fn package_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.package_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the localization tree directory.
    ///
    /// Default: `i18n`
    pub fn i18n_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.i18n_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the static asset tree directory.
    ///
    /// Default: `static`
    pub fn static_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.static_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables the archive step.
    ///
    /// Default: Disabled (no archive is produced)
    pub fn archive(mut self, settings: ArchiveSettings) -> Self {
        self.archive = Some(settings);
        self
    }

    /// Records whether the caller explicitly asked the bundler for a
    /// manifest. A requested manifest survives the cleanup phase.
    ///
    /// Default: false (the manifest is removed after the rewrite)
    pub fn manifest_requested(mut self, requested: bool) -> Self {
        self.manifest_requested = requested;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `project_root`
    /// - `output_directory`
    pub fn build(self) -> crate::error::Result<Settings> {
        use crate::error::Context;

        Ok(Settings::new(
            self.project_root.context("project_root is required")?,
            self.output_directory
                .context("output_directory is required")?,
            self.package_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGE_PATH)),
            self.i18n_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_I18N_DIR)),
            self.static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            self.archive,
            self.manifest_requested,
        ))
    }
}
