//! End-to-end tests for the batch converter
//!
//! Fixtures are generated on the fly with the `image` crate inside
//! temporary directories; nothing is read from the repository.

use image::{GenericImageView, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tiffconv::converter::{convert, ConversionRequest, TargetFormat};
use tempfile::TempDir;

fn write_tiff(dir: &Path, name: &str, width: u32, height: u32) {
    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 40) as u8, (y * 40) as u8, ((x + y) * 20) as u8])
    });
    img.save(dir.join(name)).unwrap();
}

fn write_corrupt(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"this is definitely not a tiff image").unwrap();
}

fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn test_converts_every_tiff() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "first.tif", 4, 3);
    write_tiff(input.path(), "second.TIFF", 5, 2);
    write_tiff(input.path(), "third.Tif", 1, 1);
    fs::write(input.path().join("notes.txt"), "ignored").unwrap();

    let result = convert(input.path(), output.path(), TargetFormat::Png, |_| {});

    assert!(result.succeeded(), "{:?}", result.error_message());
    assert_eq!(result.error_message(), None);
    assert_eq!(
        dir_names(output.path()),
        vec!["first.png", "second.png", "third.png"]
    );
}

#[test]
fn test_every_format_uses_its_extension() {
    for format in TargetFormat::ALL {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_tiff(input.path(), "scan.tiff", 6, 4);

        let result = convert(input.path(), output.path(), format, |_| {});
        assert!(result.succeeded(), "{}: {:?}", format, result.error_message());

        let expected = format!("scan.{}", format.extension());
        assert_eq!(dir_names(output.path()), vec![expected.clone()]);

        let decoded = image::open(output.path().join(&expected)).unwrap();
        assert_eq!(decoded.dimensions(), (6, 4), "{}", format);
    }
}

#[test]
fn test_alpha_tiff_converts_to_jpeg() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let img: RgbaImage = ImageBuffer::from_pixel(3, 3, Rgba([10, 20, 30, 128]));
    img.save(input.path().join("alpha.tif")).unwrap();

    let result = convert(input.path(), output.path(), TargetFormat::Jpeg, |_| {});

    assert!(result.succeeded(), "{:?}", result.error_message());
    assert!(output.path().join("alpha.jpeg").is_file());
}

#[test]
fn test_creates_missing_output_directory() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let output = root.path().join("nested").join("converted");
    write_tiff(input.path(), "a.tif", 2, 2);

    let result = convert(input.path(), &output, TargetFormat::Bmp, |_| {});

    assert!(result.succeeded());
    assert!(output.join("a.bmp").is_file());
}

#[test]
fn test_request_run_matches_convert() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "a.tif", 2, 2);

    let request = ConversionRequest::new(input.path(), output.path(), "gif".parse().unwrap());
    let result = request.run(|_| {});

    assert!(result.succeeded());
    assert!(output.path().join("a.gif").is_file());
}

// ============================================================================
// Progress reporting
// ============================================================================

#[test]
fn test_progress_is_monotonic_and_ends_at_100() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for i in 0..7 {
        write_tiff(input.path(), &format!("img{}.tif", i), 2, 2);
    }

    let mut updates = Vec::new();
    let result = convert(input.path(), output.path(), TargetFormat::Png, |p| updates.push(p));

    assert!(result.succeeded());
    assert_eq!(updates.len(), 7);
    assert!(updates.windows(2).all(|w| w[0] <= w[1]), "{:?}", updates);
    assert_eq!(updates, vec![14, 28, 42, 57, 71, 85, 100]);
}

#[test]
fn test_skipped_files_still_report_progress() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "good.tif", 2, 2);
    write_corrupt(input.path(), "bad.tif");

    let mut updates = Vec::new();
    let result = convert(input.path(), output.path(), TargetFormat::Png, |p| updates.push(p));

    assert!(result.succeeded());
    assert_eq!(updates, vec![50, 100]);
    assert_eq!(dir_names(output.path()), vec!["good.png"]);
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_no_tiff_files() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let output = root.path().join("out");
    fs::write(input.path().join("photo.png"), b"png?").unwrap();

    let mut updates = Vec::new();
    let result = convert(input.path(), &output, TargetFormat::Png, |p| updates.push(p));

    assert!(!result.succeeded());
    assert!(result.error_message().unwrap().contains("no TIFF files found"));
    assert!(updates.is_empty());
    // The output folder is created before the input is scanned
    assert!(output.is_dir());
    assert!(dir_names(&output).is_empty());
}

#[test]
fn test_all_files_corrupt() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_corrupt(input.path(), "one.tif");
    write_corrupt(input.path(), "two.tiff");

    let mut updates = Vec::new();
    let result = convert(input.path(), output.path(), TargetFormat::Png, |p| updates.push(p));

    assert!(!result.succeeded());
    assert_eq!(
        result.error_message(),
        Some("no files converted successfully")
    );
    assert_eq!(updates, vec![50, 100]);
    assert!(dir_names(output.path()).is_empty());
}

#[test]
fn test_unreadable_input_directory() {
    let root = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let missing = root.path().join("does-not-exist");

    let result = convert(&missing, output.path(), TargetFormat::Png, |_| {});

    assert!(!result.succeeded());
    assert!(result.error_message().is_some());
}

#[test]
fn test_output_directory_cannot_be_created() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write_tiff(input.path(), "a.tif", 2, 2);
    let blocker = root.path().join("blocker");
    fs::write(&blocker, b"a file, not a folder").unwrap();

    let result = convert(input.path(), &blocker.join("out"), TargetFormat::Png, |_| {});

    assert!(!result.succeeded());
    assert!(!result.error_message().unwrap().is_empty());
}

#[test]
fn test_unexpected_write_error_aborts_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "a.tif", 2, 2);
    write_tiff(input.path(), "b.tif", 2, 2);
    write_tiff(input.path(), "c.tif", 2, 2);
    // A directory where b.png should go makes the write fail
    fs::create_dir(output.path().join("b.png")).unwrap();

    let mut updates = Vec::new();
    let result = convert(input.path(), output.path(), TargetFormat::Png, |p| updates.push(p));

    assert!(!result.succeeded());
    let message = result.error_message().unwrap();
    assert!(!message.is_empty());
    assert_ne!(message, "no files converted successfully");

    // The aborting file gets no progress update
    assert!(updates.len() < 3, "{:?}", updates);
    // Files converted before the abort stay on disk
    let converted = dir_names(output.path())
        .into_iter()
        .filter(|n| n != "b.png")
        .count();
    assert_eq!(converted, updates.len());
    assert!(output.path().join("b.png").is_dir());
}

// ============================================================================
// Round-trip and idempotence
// ============================================================================

#[test]
fn test_png_round_trip_keeps_dimensions() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "wide.tif", 17, 5);

    let result = convert(input.path(), output.path(), TargetFormat::Png, |_| {});
    assert!(result.succeeded());

    let source = image::open(input.path().join("wide.tif")).unwrap();
    let converted = image::open(output.path().join("wide.png")).unwrap();
    assert_eq!(converted.dimensions(), source.dimensions());
    assert_eq!(converted.to_rgb8(), source.to_rgb8());
}

#[test]
fn test_second_run_gives_identical_bytes() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tiff(input.path(), "a.tif", 8, 8);
    write_tiff(input.path(), "b.tif", 3, 9);

    assert!(convert(input.path(), output.path(), TargetFormat::Png, |_| {}).succeeded());
    let first_a = fs::read(output.path().join("a.png")).unwrap();
    let first_b = fs::read(output.path().join("b.png")).unwrap();

    assert!(convert(input.path(), output.path(), TargetFormat::Png, |_| {}).succeeded());
    assert_eq!(fs::read(output.path().join("a.png")).unwrap(), first_a);
    assert_eq!(fs::read(output.path().join("b.png")).unwrap(), first_b);
    assert_eq!(dir_names(output.path()), vec!["a.png", "b.png"]);
}
