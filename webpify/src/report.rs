use crate::classify::has_extension;
use crate::glob::evaluate_files_below;
use crate::statistics::Statistics;

use std::path::Path;

const SEPARATOR: &str = "==================================================";

/// Sum of the sizes of all files below `root` that carry one of `extensions`.
/// Unreadable files are left out with a warning.
pub fn total_size(root: &Path, extensions: &[&str]) -> anyhow::Result<u64> {
    let (paths, errors) = evaluate_files_below(root)?;

    for error in errors.iter() {
        log::warn!("Not counted in the size total: {}", error);
    }

    let mut total = 0;

    for path in paths.iter().filter(|path| has_extension(path, extensions)) {
        match path.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(error) => log::warn!("Not counted in the size total: {}: {}", path.display(), error),
        }
    }

    Ok(total)
}

fn kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

pub fn format_report(statistics: &Statistics) -> String {
    let reduction = match statistics.reduction_percent() {
        Some(reduction) => format!("{:.2}%", reduction),
        None => String::from("not computable (size before conversion is 0)"),
    };

    [
        String::new(),
        SEPARATOR.to_string(),
        String::from("Conversion and copy finished"),
        format!(
            "Image conversion  succeeded: {} / failed: {}",
            statistics.converted_images, statistics.failed_images
        ),
        format!("File copy         succeeded: {} / failed: {}", statistics.copied_files, statistics.failed_copies),
        SEPARATOR.to_string(),
        format!("Total size before: {}", kilobytes(statistics.bytes_before)),
        format!("Total size after:  {}", kilobytes(statistics.bytes_after)),
        format!("Size reduction:    {}", reduction),
        String::new(),
    ]
    .join("\n")
}
