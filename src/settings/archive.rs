//! Archive step configuration.

/// Configuration for the optional archive step.
///
/// Attaching this to [`Settings`] enables the packaging phase; leaving it
/// off skips archiving entirely.
///
/// # Examples
///
/// ```
/// use postbundle::ArchiveSettings;
///
/// let archive = ArchiveSettings {
///     file_name: Some("extension.zip".into()),
/// };
/// ```
///
/// [`Settings`]: super::Settings
#[derive(Debug, Clone, Default)]
pub struct ArchiveSettings {
    /// Archive file name, including the `.zip` extension.
    ///
    /// Default: None (derived from the descriptor `name` field, text after
    /// the last `/`, with `.zip` appended)
    pub file_name: Option<String>,
}
