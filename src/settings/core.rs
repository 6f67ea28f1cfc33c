//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

use super::ArchiveSettings;
use crate::paths::{resolve_under, slash_path};

/// Default package descriptor path, relative to the project root.
pub const DEFAULT_PACKAGE_PATH: &str = "package.json";

/// Default localization tree directory, relative to the project root.
pub const DEFAULT_I18N_DIR: &str = "i18n";

/// Default static asset tree directory, relative to the project root.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Main settings for a packaging run.
///
/// Central configuration for the pipeline, constructed via
/// [`SettingsBuilder`]. Relative paths are interpreted under the project
/// root.
///
/// # Examples
///
/// ```no_run
/// use postbundle::SettingsBuilder;
///
/// # fn example() -> postbundle::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/path/to/extension")
///     .output_directory("dist")
///     .build()?;
/// assert_eq!(settings.i18n_dir(), std::path::Path::new("i18n"));
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`ArchiveSettings`] - Archive step configuration
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Root of the project being packaged.
    project_root: PathBuf,

    /// Directory the external bundler wrote its raw output into.
    output_directory: PathBuf,

    /// Package descriptor location, as configured.
    package_path: PathBuf,

    /// Localization tree location, as configured.
    i18n_dir: PathBuf,

    /// Static asset tree location, as configured.
    static_dir: PathBuf,

    /// Archive step configuration.
    ///
    /// None disables the packaging phase.
    archive: Option<ArchiveSettings>,

    /// Whether the caller explicitly asked the bundler for a manifest.
    ///
    /// A requested manifest survives the cleanup phase.
    manifest_requested: bool,
}

impl Settings {
    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the output directory as configured.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the package descriptor path as configured.
    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Returns the localization tree directory as configured.
    pub fn i18n_dir(&self) -> &Path {
        &self.i18n_dir
    }

    /// Returns the static asset tree directory as configured.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Returns the archive configuration, if the archive step is enabled.
    pub fn archive(&self) -> Option<&ArchiveSettings> {
        self.archive.as_ref()
    }

    /// Returns whether the caller explicitly requested a manifest.
    pub fn manifest_requested(&self) -> bool {
        self.manifest_requested
    }

    /// Returns the output directory anchored under the project root.
    pub fn resolved_output_directory(&self) -> PathBuf {
        resolve_under(&self.project_root, &self.output_directory)
    }

    /// Returns the package descriptor path anchored under the project root.
    pub fn resolved_package_path(&self) -> PathBuf {
        resolve_under(&self.project_root, &self.package_path)
    }

    /// Returns the localization tree anchored under the project root.
    pub fn resolved_i18n_dir(&self) -> PathBuf {
        resolve_under(&self.project_root, &self.i18n_dir)
    }

    /// Returns the static asset tree anchored under the project root.
    pub fn resolved_static_dir(&self) -> PathBuf {
        resolve_under(&self.project_root, &self.static_dir)
    }

    /// Returns the destination prefix for static assets.
    ///
    /// This is the static tree's own path relative to the project root, in
    /// slash form, so a file `static/img/logo.png` keeps that shape in the
    /// output directory. A static tree outside the project root contributes
    /// only its final component.
    pub fn static_prefix(&self) -> String {
        let resolved = self.resolved_static_dir();
        match resolved.strip_prefix(&self.project_root) {
            Ok(relative) => slash_path(relative),
            Err(_) => resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        project_root: PathBuf,
        output_directory: PathBuf,
        package_path: PathBuf,
        i18n_dir: PathBuf,
        static_dir: PathBuf,
        archive: Option<ArchiveSettings>,
        manifest_requested: bool,
    ) -> Self {
        Self {
            project_root,
            output_directory,
            package_path,
            i18n_dir,
            static_dir,
            archive,
            manifest_requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SettingsBuilder;
    use std::path::Path;

    #[test]
    fn relative_paths_anchor_under_project_root() {
        let settings = SettingsBuilder::new()
            .project_root("/project")
            .output_directory("dist")
            .build()
            .unwrap();
        assert_eq!(
            settings.resolved_output_directory(),
            Path::new("/project/dist")
        );
        assert_eq!(
            settings.resolved_package_path(),
            Path::new("/project/package.json")
        );
        assert_eq!(settings.resolved_i18n_dir(), Path::new("/project/i18n"));
    }

    #[test]
    fn static_prefix_is_root_relative() {
        let settings = SettingsBuilder::new()
            .project_root("/project")
            .output_directory("dist")
            .static_dir("assets/static")
            .build()
            .unwrap();
        assert_eq!(settings.static_prefix(), "assets/static");
    }

    #[test]
    fn foreign_static_tree_contributes_last_component() {
        let settings = SettingsBuilder::new()
            .project_root("/project")
            .output_directory("dist")
            .static_dir("/shared/static")
            .build()
            .unwrap();
        assert_eq!(settings.static_prefix(), "static");
    }
}
