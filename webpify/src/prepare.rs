use anyhow::Context;
use std::fs;
use std::ops::Not;
use std::path::Path;

/// Checks that `input_dir` exists and leaves `output_dir` as an existing, empty directory.
///
/// Everything that was inside `output_dir` before is deleted and cannot be recovered.
/// The output directory is not touched when the input directory is missing.
pub fn prepare_directories(input_dir: &Path, output_dir: &Path) -> anyhow::Result<()> {
    if input_dir.is_dir().not() {
        anyhow::bail!("The input directory '{}' does not exist", input_dir.display());
    }

    if output_dir.exists() {
        log::warn!("Deleting everything inside the output directory '{}'", output_dir.display());
        empty_directory(output_dir)?;
        log::info!("Emptied the output directory '{}'", output_dir.display());
    }

    fs::create_dir_all(output_dir).with_context(|| format!("Failed to create the output directory '{}'", output_dir.display()))?;
    log::info!("Output directory '{}' is ready", output_dir.display());

    Ok(())
}

fn empty_directory(directory: &Path) -> anyhow::Result<()> {
    let entries = fs::read_dir(directory).with_context(|| format!("Failed to read the output directory '{}'", directory.display()))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read the output directory '{}'", directory.display()))?
            .path();

        // symlinks to directories are removed as links, never followed
        let is_directory = fs::symlink_metadata(&path).map(|metadata| metadata.is_dir()).unwrap_or(false);

        let removal = if is_directory {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        removal.with_context(|| format!("Failed to delete '{}'", path.display()))?;
    }

    Ok(())
}
