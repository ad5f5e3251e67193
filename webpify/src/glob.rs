use anyhow::Context;
use glob::{GlobError, MatchOptions, Pattern};
use std::ops::Not;
use std::path::{Path, PathBuf};

/// Every non-directory path below `root`, at any depth and including dotfiles, plus the paths that could not be read.
/// Dangling symlinks are kept so that they fail, and get counted, later on. Links to directories are walked through.
/// Both lists are sorted case-insensitively so that runs are reproducible.
pub fn evaluate_files_below(root: &Path) -> anyhow::Result<(Vec<PathBuf>, Vec<GlobError>)> {
    let match_options = MatchOptions {
        require_literal_leading_dot: false,
        ..Default::default()
    };

    let pattern = format!("{}/**/*", Pattern::escape(&root.to_string_lossy()));

    let glob_results = glob::glob_with(&pattern, match_options)
        .with_context(|| format!("Failed to list the files below '{}'", root.display()))?;

    let (mut paths, mut errors) = glob_results.fold(
        (Vec::<PathBuf>::new(), Vec::<GlobError>::new()),
        |(mut paths, mut errors), glob_result| {
            match glob_result {
                Ok(path) if path.is_dir().not() => paths.push(path),
                Ok(_) => {}
                Err(error) => errors.push(error),
            };
            (paths, errors)
        },
    );

    let lowercase_os_str_from_path_buf = |path_buf: &PathBuf| path_buf.as_os_str().to_ascii_lowercase();

    let lowercase_os_str_from_glob_error = |glob_error: &GlobError| lowercase_os_str_from_path_buf(&glob_error.path().to_path_buf());

    paths.sort_by_key(lowercase_os_str_from_path_buf);
    errors.sort_by_key(lowercase_os_str_from_glob_error);

    Ok((paths, errors))
}
