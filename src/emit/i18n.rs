//! Localization tree emission policy.

use std::path::Path;

use super::TreeEmitter;
use crate::error::{Error, Result};

/// Emission policy for the localization tree.
///
/// Every file becomes `i18n/<stem>.js` in the bundle, whatever the source
/// tree was named and however deeply the file was nested. JSON dictionaries
/// are wrapped into a CommonJS module; the original text is embedded
/// verbatim, not re-serialized, so formatting and key order survive. Other
/// files are emitted unchanged.
///
/// Localization sources are text; contents that are not valid UTF-8 fail
/// the emission.
#[derive(Debug, Default, Clone, Copy)]
pub struct I18nTree;

impl TreeEmitter for I18nTree {
    fn label(&self) -> &str {
        "i18n"
    }

    fn destination(&self, relative: &Path) -> String {
        let stem = relative
            .file_stem()
            .unwrap_or_else(|| relative.as_os_str())
            .to_string_lossy();
        format!("i18n/{stem}.js")
    }

    fn transform(&self, relative: &Path, contents: Vec<u8>) -> Result<Vec<u8>> {
        let text = String::from_utf8(contents).map_err(|_| {
            Error::Generic(format!(
                "localization file {} is not valid UTF-8",
                relative.display()
            ))
        })?;
        if relative.extension().is_some_and(|ext| ext == "json") {
            Ok(format!("module.exports = {text}").into_bytes())
        } else {
            Ok(text.into_bytes())
        }
    }
}
