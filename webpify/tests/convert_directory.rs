use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use webpify::{ConversionOptions, Statistics, WebpifyOptions, convert_directory};

fn workspace_with_input() -> (TempDir, WebpifyOptions) {
    let workspace = tempfile::tempdir().unwrap();
    let options = WebpifyOptions {
        input_dir: workspace.path().join("input"),
        output_dir: workspace.path().join("output"),
        conversion: ConversionOptions::default(),
    };
    fs::create_dir_all(&options.input_dir).unwrap();
    (workspace, options)
}

fn save_solid_image(path: &Path, format: ImageFormat) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(32, 24, Rgb([30, 120, 200])).save_with_format(path, format).unwrap();
}

fn save_noisy_image(path: &Path) {
    let mut state: u32 = 0x2545_f491;
    let mut noisy = RgbImage::new(96, 96);
    for pixel in noisy.pixels_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [red, green, blue, _] = state.to_le_bytes();
        *pixel = Rgb([red, green, blue]);
    }
    noisy.save_with_format(path, ImageFormat::Png).unwrap();
}

fn is_webp_file(path: &Path) -> bool {
    let bytes = fs::read(path).unwrap();
    bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
}

#[test]
fn missing_input_is_fatal_and_creates_no_output() {
    let workspace = tempfile::tempdir().unwrap();
    let options = WebpifyOptions {
        input_dir: workspace.path().join("input"),
        output_dir: workspace.path().join("output"),
        conversion: ConversionOptions::default(),
    };

    assert!(convert_directory(&options).is_err());
    assert!(!options.output_dir.exists());
}

#[test]
fn empty_input_ends_early_with_an_empty_output() {
    let (_workspace, options) = workspace_with_input();

    assert_eq!(convert_directory(&options).unwrap(), None);
    assert!(options.output_dir.is_dir());
}

#[test]
fn converts_png_and_copies_text_file() {
    let (_workspace, options) = workspace_with_input();
    save_solid_image(&options.input_dir.join("a.png"), ImageFormat::Png);
    fs::write(options.input_dir.join("notes.txt"), b"remember the milk\n").unwrap();

    let statistics = convert_directory(&options).unwrap().unwrap();

    assert_eq!((statistics.converted_images, statistics.copied_files), (1, 1));
    assert_eq!((statistics.failed_images, statistics.failed_copies), (0, 0));

    let webp = options.output_dir.join("a.webp");
    assert!(is_webp_file(&webp));
    assert!(!options.output_dir.join("a.png").exists());
    assert_eq!(
        fs::read(options.output_dir.join("notes.txt")).unwrap(),
        fs::read(options.input_dir.join("notes.txt")).unwrap()
    );

    assert_eq!(statistics.bytes_before, fs::metadata(options.input_dir.join("a.png")).unwrap().len());
    assert_eq!(statistics.bytes_after, fs::metadata(&webp).unwrap().len());
}

#[test]
fn previous_output_is_removed() {
    let (_workspace, options) = workspace_with_input();
    save_solid_image(&options.input_dir.join("a.png"), ImageFormat::Png);
    fs::create_dir_all(options.output_dir.join("old")).unwrap();
    fs::write(options.output_dir.join("old/stale.webp"), b"stale").unwrap();
    fs::write(options.output_dir.join("stale.txt"), b"stale").unwrap();

    let statistics = convert_directory(&options).unwrap().unwrap();

    assert!(!options.output_dir.join("old").exists());
    assert!(!options.output_dir.join("stale.txt").exists());
    assert_eq!(statistics.bytes_after, fs::metadata(options.output_dir.join("a.webp")).unwrap().len());
}

#[test]
fn nested_tree_is_mirrored_and_failures_do_not_stop_the_batch() {
    let (_workspace, options) = workspace_with_input();
    save_solid_image(&options.input_dir.join("photos/2024/Beach.JPG"), ImageFormat::Jpeg);
    save_solid_image(&options.input_dir.join("photos/icon.Png"), ImageFormat::Png);
    fs::write(options.input_dir.join("photos/broken.jpeg"), b"this is not a jpeg").unwrap();
    fs::write(options.input_dir.join("photos/2024/.DS_Store"), b"\0\0\0\x01Bud1").unwrap();

    let statistics = convert_directory(&options).unwrap().unwrap();

    assert_eq!(
        statistics,
        Statistics {
            converted_images: 2,
            failed_images: 1,
            copied_files: 1,
            failed_copies: 0,
            bytes_before: statistics.bytes_before,
            bytes_after: statistics.bytes_after,
        }
    );
    assert!(is_webp_file(&options.output_dir.join("photos/2024/Beach.webp")));
    assert!(is_webp_file(&options.output_dir.join("photos/icon.webp")));
    assert!(!options.output_dir.join("photos/broken.webp").exists());
    assert_eq!(
        fs::read(options.output_dir.join("photos/2024/.DS_Store")).unwrap(),
        b"\0\0\0\x01Bud1"
    );
}

#[test]
fn reduction_is_computed_from_the_size_totals() {
    let (_workspace, options) = workspace_with_input();
    save_noisy_image(&options.input_dir.join("noise.png"));

    let statistics = convert_directory(&options).unwrap().unwrap();

    let before = statistics.bytes_before as f64;
    let after = statistics.bytes_after as f64;
    assert_eq!(statistics.reduction_percent(), Some((before - after) / before * 100.0));
}

#[test]
fn lossless_output_is_not_smaller_than_default_lossy_output() {
    let (workspace, lossy) = workspace_with_input();
    save_noisy_image(&lossy.input_dir.join("noise.png"));

    let lossless = WebpifyOptions {
        input_dir: lossy.input_dir.clone(),
        output_dir: workspace.path().join("output-lossless"),
        conversion: ConversionOptions::new(100, 4, true).unwrap(),
    };

    let lossy_statistics = convert_directory(&lossy).unwrap().unwrap();
    let lossless_statistics = convert_directory(&lossless).unwrap().unwrap();

    assert_eq!(lossy_statistics.converted_images, 1);
    assert_eq!(lossless_statistics.converted_images, 1);
    assert!(lossless_statistics.bytes_after >= lossy_statistics.bytes_after);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_counted_as_failed_copy() {
    let (_workspace, options) = workspace_with_input();
    fs::write(options.input_dir.join("real.txt"), b"real").unwrap();
    std::os::unix::fs::symlink(options.input_dir.join("gone.txt"), options.input_dir.join("dangling.txt")).unwrap();

    let statistics = convert_directory(&options).unwrap().unwrap();

    assert_eq!(statistics.copied_files, 1);
    assert_eq!(statistics.failed_copies, 1);
    assert!(options.output_dir.join("real.txt").exists());
    assert!(fs::symlink_metadata(options.output_dir.join("dangling.txt")).is_err());
}

#[test]
fn file_named_only_by_an_image_extension_is_treated_as_an_image() {
    let (_workspace, options) = workspace_with_input();
    fs::write(options.input_dir.join(".png"), b"not really a png").unwrap();

    let statistics = convert_directory(&options).unwrap().unwrap();

    assert_eq!(statistics.converted_images, 0);
    assert_eq!(statistics.failed_images, 1);
    assert_eq!(statistics.copied_files, 0);
    assert!(!options.output_dir.join(".png").exists());
}
