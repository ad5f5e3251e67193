use crate::classify::FileEntry;
use crate::statistics::Statistics;

use anyhow::Context;
use std::fs::{self, File, FileTimes};
use std::path::Path;

pub fn copy_file(entry: &FileEntry, position: usize, total: usize, output_root: &Path, statistics: &mut Statistics) {
    let destination = output_root.join(&entry.relative);

    log::info!("[copy {}/{}] Copying: {} ==> {}", position, total, entry.source.display(), destination.display());

    match copy_preserving_times(&entry.source, &destination) {
        Ok(()) => {
            log::info!("  Done: {}", entry.relative.display());
            statistics.copied_files += 1;
        }
        Err(error) => {
            log::warn!("  Failed to copy {}: {:#}", entry.source.display(), error);
            statistics.failed_copies += 1;
        }
    }
}

/// Copies contents and permissions, then carries over the access and modification times.
/// Failing to set the times only produces a warning, the copy itself already succeeded.
fn copy_preserving_times(source: &Path, destination: &Path) -> anyhow::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }

    fs::copy(source, destination).with_context(|| format!("Failed to copy to '{}'", destination.display()))?;

    if let Err(error) = copy_file_times(source, destination) {
        log::warn!("  Could not keep the timestamps of {}: {:#}", source.display(), error);
    }

    Ok(())
}

fn copy_file_times(source: &Path, destination: &Path) -> anyhow::Result<()> {
    let metadata = fs::metadata(source)?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    File::open(destination)?.set_times(times)?;

    Ok(())
}
