#![forbid(unsafe_code)]

use crate::classify::{IMAGE_EXTENSIONS, WEBP_EXTENSION, classify_files};
use crate::glob::evaluate_files_below;
use crate::passthrough::copy_file;
use crate::prepare::prepare_directories;
use crate::report::{format_report, total_size};
use crate::transcode::convert_image;

use std::ops::Not;
use std::path::PathBuf;
use std::process::ExitCode;

mod classify;
mod glob;
mod options;
mod passthrough;
mod prepare;
mod report;
mod statistics;
mod transcode;

pub use crate::options::{ConversionOptions, DEFAULT_METHOD, DEFAULT_QUALITY, METHOD_RANGE, QUALITY_RANGE};
pub use crate::statistics::Statistics;

pub struct WebpifyOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub conversion: ConversionOptions,
}

pub fn run(options: WebpifyOptions) -> ExitCode {
    match convert_directory(&options) {
        Ok(Some(statistics)) => {
            print!("{}", format_report(&statistics));
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole conversion and returns the statistics for the report.
///
/// `Ok(None)` means the input directory held no files at all. Errors are only returned for problems
/// with the directories themselves; every file that fails is logged and counted instead.
pub fn convert_directory(options: &WebpifyOptions) -> anyhow::Result<Option<Statistics>> {
    prepare_directories(&options.input_dir, &options.output_dir)?;

    let (paths, errors) = evaluate_files_below(&options.input_dir)?;

    if errors.is_empty().not() {
        log::warn!(
            "Some paths below '{}' could not be read and will be skipped. \
            Make sure you have the permissions for these paths and symlinks are not broken.",
            options.input_dir.display()
        );

        for error in errors.iter() {
            log::warn!("{}", error);
        }
    }

    let files = classify_files(&options.input_dir, paths);

    if files.is_empty() {
        log::info!("No files to convert or copy were found in '{}'", options.input_dir.display());
        return Ok(None);
    }

    log::info!("Images to convert: {}", files.images.len());
    log::info!("Files to copy: {}", files.passthrough.len());

    let mut statistics = Statistics::new();

    for (index, entry) in files.images.iter().enumerate() {
        convert_image(
            entry,
            index + 1,
            files.images.len(),
            &options.output_dir,
            &options.conversion,
            &mut statistics,
        );
    }

    for (index, entry) in files.passthrough.iter().enumerate() {
        copy_file(entry, index + 1, files.passthrough.len(), &options.output_dir, &mut statistics);
    }

    statistics.bytes_before = total_size(&options.input_dir, &IMAGE_EXTENSIONS)?;
    statistics.bytes_after = total_size(&options.output_dir, &[WEBP_EXTENSION])?;

    Ok(Some(statistics))
}
