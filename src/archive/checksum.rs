//! Artifact checksum calculation.

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::{ErrorExt, Result};

/// Calculates the SHA-256 checksum of a file.
///
/// Reads the file in 8KB chunks to handle large archives efficiently.
///
/// # Arguments
///
/// * `path` - Path to the file to hash
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_sha256(path: &std::path::Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
