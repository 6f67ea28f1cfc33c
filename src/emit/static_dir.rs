//! Static tree emission policy.

use std::path::Path;

use super::TreeEmitter;
use crate::paths::slash_path;

/// Emission policy for the static asset tree.
///
/// Files are copied byte for byte and keep their relative layout, prefixed
/// with the tree's own root-relative path. A `static/img/logo.png` in the
/// project therefore stays `static/img/logo.png` in the bundle.
#[derive(Debug, Clone)]
pub struct StaticTree {
    prefix: String,
}

impl StaticTree {
    /// Creates the policy with the tree's root-relative destination prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl TreeEmitter for StaticTree {
    fn label(&self) -> &str {
        "static"
    }

    fn destination(&self, relative: &Path) -> String {
        let name = slash_path(relative);
        if self.prefix.is_empty() {
            name
        } else {
            format!("{}/{name}", self.prefix)
        }
    }
}
