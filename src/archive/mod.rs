//! Output directory archiving.
//!
//! The final pipeline phase packs the finished output directory into a
//! single zip file for distribution. Construction is blocking work and runs
//! on the dedicated thread pool; the async wrapper resolves only once the
//! archive bytes are on disk.

mod checksum;

use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bail;
use crate::error::{Error, ErrorExt, Result};
use crate::paths::slash_path;

pub use checksum::calculate_sha256;

/// Archives the contents of `source_dir` into a zip file at `destination`.
///
/// The directory's children become the archive's root entries; the directory
/// itself is not nested. Directory entries are recorded so extraction
/// reproduces the exact tree, and files are Deflate-compressed at the
/// maximum level. Entry names are slash-separated and sorted.
///
/// The returned future resolves only after the central directory has been
/// written, the buffered writer flushed, and the file synced to disk.
///
/// # Arguments
///
/// * `source_dir` - Directory to archive
/// * `destination` - Path of the zip file to create
pub async fn zip_dir(source_dir: &Path, destination: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        bail!("{} is not a directory", source_dir.display());
    }

    let source_dir = source_dir.to_path_buf();
    let destination = destination.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || {
        let file =
            std::fs::File::create(&destination).fs_context("creating archive", &destination)?;
        let mut writer = ZipWriter::new(std::io::BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(9));

        for entry in walkdir::WalkDir::new(&source_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.path() == destination {
                continue;
            }
            let relative = entry.path().strip_prefix(&source_dir)?;
            let name = slash_path(relative);
            log::debug!("Archiving {name}");

            if entry.file_type().is_dir() {
                writer.add_directory(name.as_str(), options)?;
            } else {
                writer.start_file(name.as_str(), options)?;
                let mut file = std::fs::File::open(entry.path())
                    .fs_context("opening file for archiving", entry.path())?;
                std::io::copy(&mut file, &mut writer)
                    .fs_context("archiving file", entry.path())?;
            }
        }

        // The archive only counts as produced once the central directory is
        // written and the bytes have reached the disk.
        let mut inner = writer.finish()?;
        inner.flush().fs_context("flushing archive", &destination)?;
        inner
            .get_ref()
            .sync_all()
            .fs_context("syncing archive", &destination)?;
        Ok(())
    })
    .await
    .map_err(|e| Error::Generic(format!("Archive task panicked: {e}")))?
}
