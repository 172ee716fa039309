use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Opens a conversation log for reading
///
/// The regular-file check runs against the opened handle rather than the path, so the
/// file cannot be swapped for a directory or device between the check and the read.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file metadata cannot be read
/// - The path does not point at a regular file
pub fn open_log_file(path: &Path) -> Result<File> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open conversation log: {}", path.display()))?;

    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }

    Ok(file)
}
