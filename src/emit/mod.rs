//! Asset tree emission.
//!
//! An asset tree is a directory in the project whose files are carried into
//! the bundler output, possibly transformed on the way. Tree walking happens
//! on the blocking thread pool; per-file reads and transforms fan out as
//! concurrent tasks and the results are registered in a deterministic order.

mod i18n;
mod static_dir;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::bundle::{EmittedAsset, OutputBundle};
use crate::error::{Error, ErrorExt, Result};

pub use i18n::I18nTree;
pub use static_dir::StaticTree;

/// Per-file hook for one asset tree.
///
/// Implementations decide where a file lands in the bundle and how its
/// contents are transformed. The default transform passes bytes through
/// unchanged.
pub trait TreeEmitter: Send + Sync {
    /// Tree label used in log output.
    fn label(&self) -> &str;

    /// Maps a path relative to the tree root to a bundle destination.
    fn destination(&self, relative: &Path) -> String;

    /// Transforms file contents before registration.
    fn transform(&self, relative: &Path, contents: Vec<u8>) -> Result<Vec<u8>> {
        let _ = relative;
        Ok(contents)
    }
}

/// Emits every file under `root` into `bundle` through `emitter`.
///
/// A missing or empty tree is not an error; the call registers nothing and
/// returns zero. Files are read and transformed concurrently, one task per
/// file, and any single failure fails the whole call. Registration follows
/// the sorted enumeration order regardless of task completion order.
///
/// # Arguments
///
/// * `root` - Tree root directory
/// * `emitter` - Destination and transform policy for this tree
/// * `bundle` - Registry receiving the emitted artifacts
///
/// # Returns
///
/// The number of files emitted. A file whose destination repeats an earlier
/// one replaces it in the bundle, so this can exceed the distinct count.
pub async fn emit_tree(
    root: &Path,
    emitter: Arc<dyn TreeEmitter>,
    bundle: &mut OutputBundle,
) -> Result<usize> {
    if !root.is_dir() {
        log::warn!(
            "Skipping {} tree: {} does not exist",
            emitter.label(),
            root.display()
        );
        return Ok(0);
    }

    let files = list_files(root).await?;
    if files.is_empty() {
        log::debug!("No files under {}", root.display());
        return Ok(0);
    }

    let mut tasks: JoinSet<Result<(usize, EmittedAsset)>> = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let relative = path.strip_prefix(root)?.to_path_buf();
        let emitter = Arc::clone(&emitter);
        tasks.spawn(async move {
            let contents = tokio::fs::read(&path)
                .await
                .fs_context("reading asset", &path)?;
            let source = emitter.transform(&relative, contents)?;
            let file_name = emitter.destination(&relative);
            Ok((index, EmittedAsset::new(file_name, source)))
        });
    }

    let mut emitted = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(item)) => emitted.push(item),
            Ok(Err(err)) => return Err(err),
            Err(err) => {
                return Err(Error::Generic(format!("Asset task panicked: {err}")));
            }
        }
    }

    // Tasks complete in arbitrary order; registration follows enumeration.
    emitted.sort_by_key(|(index, _)| *index);
    let count = emitted.len();
    for (_, asset) in emitted {
        log::debug!("Emitting {}", asset.file_name);
        bundle.register(asset);
    }
    Ok(count)
}

/// Enumerates regular files under `root`, sorted by file name.
async fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();

    // Offload blocking traversal to the dedicated thread pool.
    tokio::task::spawn_blocking(move || {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    })
    .await
    .map_err(|e| Error::Generic(format!("Tree walk task panicked: {e}")))?
}
