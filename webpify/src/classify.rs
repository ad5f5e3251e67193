use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];
pub const WEBP_EXTENSION: &str = "webp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub source: PathBuf,
    /// Path below the input root, mirrored below the output root.
    pub relative: PathBuf,
}

#[derive(Debug, Default)]
pub struct ClassifiedFiles {
    pub images: Vec<FileEntry>,
    pub passthrough: Vec<FileEntry>,
}

impl ClassifiedFiles {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.passthrough.is_empty()
    }
}

/// Case-insensitive suffix match on the file name, so a file called `.png` counts as a PNG.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(file_name) = path.file_name() else {
        return false;
    };

    let file_name = file_name.to_string_lossy().to_ascii_lowercase();

    extensions.iter().any(|extension| file_name.ends_with(&format!(".{}", extension)))
}

pub fn classify_files(root: &Path, paths: Vec<PathBuf>) -> ClassifiedFiles {
    let mut classified = ClassifiedFiles::default();

    for source in paths {
        let relative = match source.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => {
                log::warn!("Skipping {} because it is not below {}", source.display(), root.display());
                continue;
            }
        };

        let entry = FileEntry { source, relative };

        if has_extension(&entry.relative, &IMAGE_EXTENSIONS) {
            classified.images.push(entry);
        } else {
            classified.passthrough.push(entry);
        }
    }

    classified
}
