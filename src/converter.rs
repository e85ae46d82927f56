//! Batch Converter - TIFF folder to PNG/JPEG/BMP/GIF
//!
//! Pure, UI-agnostic conversion routine. Walks the immediate children of an
//! input directory, re-encodes every TIFF it finds into the target format and
//! reports a percentage to a progress callback after each file.
//!
//! Failure policy:
//! - setup problems (output folder, unreadable input folder, no TIFFs) end the run
//! - missing or undecodable files are logged and skipped
//! - any other decode/encode error aborts the whole batch

use image::{DynamicImage, ImageError, ImageFormat};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info, warn};

/// Output formats offered by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    #[default]
    Png,
    Jpeg,
    Jpg,
    Bmp,
    Gif,
}

impl TargetFormat {
    /// Every supported format, in the order the UI lists them
    pub const ALL: [TargetFormat; 5] = [
        TargetFormat::Png,
        TargetFormat::Jpeg,
        TargetFormat::Jpg,
        TargetFormat::Bmp,
        TargetFormat::Gif,
    ];

    /// Uppercase label, as handed to the encoder selection
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetFormat::Png => "PNG",
            TargetFormat::Jpeg => "JPEG",
            TargetFormat::Jpg => "JPG",
            TargetFormat::Bmp => "BMP",
            TargetFormat::Gif => "GIF",
        }
    }

    /// File extension used for converted files (lowercase label, no dot)
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Jpg => "jpg",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Gif => "gif",
        }
    }

    /// Encoder used for this format. JPG is an alias of JPEG.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            TargetFormat::Png => ImageFormat::Png,
            TargetFormat::Jpeg | TargetFormat::Jpg => ImageFormat::Jpeg,
            TargetFormat::Bmp => ImageFormat::Bmp,
            TargetFormat::Gif => ImageFormat::Gif,
        }
    }

    /// Convert a decoded image into a pixel layout the encoder accepts
    fn prepare(&self, img: DynamicImage) -> DynamicImage {
        let color = img.color();
        match self.image_format() {
            ImageFormat::Jpeg => {
                if color.has_color() {
                    DynamicImage::ImageRgb8(img.to_rgb8())
                } else {
                    DynamicImage::ImageLuma8(img.to_luma8())
                }
            }
            ImageFormat::Bmp => match (color.has_color(), color.has_alpha()) {
                (_, true) => DynamicImage::ImageRgba8(img.to_rgba8()),
                (true, false) => DynamicImage::ImageRgb8(img.to_rgb8()),
                (false, false) => DynamicImage::ImageLuma8(img.to_luma8()),
            },
            ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
            _ if matches!(
                img,
                DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_)
            ) =>
            {
                DynamicImage::ImageRgba16(img.to_rgba16())
            }
            _ => img,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a format name is not one of [`TargetFormat::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported output format: {0}")]
pub struct ParseFormatError(pub String);

impl FromStr for TargetFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TargetFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

/// Everything needed for one conversion run
///
/// Built once by the wizard and consumed by [`ConversionRequest::run`].
#[derive(Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    input_directory: PathBuf,
    output_directory: PathBuf,
    target_format: TargetFormat,
}

impl ConversionRequest {
    pub fn new(
        input_directory: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
        target_format: TargetFormat,
    ) -> Self {
        Self {
            input_directory: input_directory.into(),
            output_directory: output_directory.into(),
            target_format,
        }
    }

    pub fn input_directory(&self) -> &Path {
        &self.input_directory
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    /// Run the conversion described by this request
    pub fn run(self, on_progress: impl FnMut(u8)) -> ConversionResult {
        convert(
            &self.input_directory,
            &self.output_directory,
            self.target_format,
            on_progress,
        )
    }
}

/// Terminal outcome of a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    succeeded: bool,
    error_message: Option<String>,
}

impl ConversionResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error_message: Some(message.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl From<Result<BatchSummary, ConvertError>> for ConversionResult {
    fn from(result: Result<BatchSummary, ConvertError>) -> Self {
        match result {
            Ok(_) => ConversionResult::success(),
            Err(e) => ConversionResult::failure(e.to_string()),
        }
    }
}

/// Counts for a batch that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
}

/// Errors that end a conversion run
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    CreateOutput(#[source] io::Error),

    #[error("{0}")]
    ReadInput(#[source] io::Error),

    #[error("no TIFF files found in the input directory")]
    NoTiffFiles,

    #[error("{source}")]
    Aborted {
        file: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("no files converted successfully")]
    NothingConverted,
}

/// Per-file problems that skip the file instead of aborting the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIssue {
    /// The file vanished between listing and opening
    Missing,
    /// Not a readable image
    Undecodable,
}

impl FileIssue {
    /// Returns `None` for errors that must abort the batch
    pub fn classify(err: &ImageError) -> Option<FileIssue> {
        match err {
            ImageError::IoError(e) if e.kind() == io::ErrorKind::NotFound => {
                Some(FileIssue::Missing)
            }
            ImageError::IoError(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData
                ) =>
            {
                Some(FileIssue::Undecodable)
            }
            ImageError::Decoding(_) | ImageError::Unsupported(_) => Some(FileIssue::Undecodable),
            _ => None,
        }
    }
}

/// Convert every TIFF in `input_directory` into `target_format`
///
/// `on_progress` receives a percentage (0-100) after each file attempt.
/// Never panics and never returns an error type: every outcome, good or bad,
/// is folded into the returned [`ConversionResult`].
pub fn convert(
    input_directory: &Path,
    output_directory: &Path,
    target_format: TargetFormat,
    on_progress: impl FnMut(u8),
) -> ConversionResult {
    info!(
        "Converting TIFF files in {:?} to {} into {:?}",
        input_directory, target_format, output_directory
    );

    let result = run_batch(input_directory, output_directory, target_format, on_progress);

    match &result {
        Ok(summary) => info!(
            "Conversion finished: {} of {} converted, {} skipped",
            summary.converted, summary.total, summary.skipped
        ),
        Err(e) => error!("Conversion failed: {}", e),
    }

    result.into()
}

/// The batch loop proper; see the module docs for the failure policy
pub fn run_batch(
    input_directory: &Path,
    output_directory: &Path,
    target_format: TargetFormat,
    mut on_progress: impl FnMut(u8),
) -> Result<BatchSummary, ConvertError> {
    if !output_directory.exists() {
        fs::create_dir_all(output_directory).map_err(ConvertError::CreateOutput)?;
        info!("Created output directory: {:?}", output_directory);
    }

    let files = list_tiff_files(input_directory).map_err(ConvertError::ReadInput)?;
    if files.is_empty() {
        return Err(ConvertError::NoTiffFiles);
    }

    let mut summary = BatchSummary {
        total: files.len(),
        ..Default::default()
    };

    for (index, path) in files.iter().enumerate() {
        match convert_file(path, output_directory, target_format) {
            Ok(output) => {
                info!("Converted: {:?} -> {:?}", file_name(path), file_name(&output));
                summary.converted += 1;
            }
            Err(e) => match FileIssue::classify(&e) {
                Some(FileIssue::Missing) => {
                    warn!("File not found: {:?}", path);
                    summary.skipped += 1;
                }
                Some(FileIssue::Undecodable) => {
                    warn!("Cannot identify image format of {:?}: {}", file_name(path), e);
                    summary.skipped += 1;
                }
                None => {
                    error!("Error while converting {:?}: {}", file_name(path), e);
                    return Err(ConvertError::Aborted {
                        file: path.clone(),
                        source: e,
                    });
                }
            },
        }

        on_progress(progress_percent(index + 1, summary.total));
    }

    if summary.converted == 0 {
        return Err(ConvertError::NothingConverted);
    }

    Ok(summary)
}

/// Decode one file and write it to `output_directory`; returns the written path
fn convert_file(
    input: &Path,
    output_directory: &Path,
    target_format: TargetFormat,
) -> Result<PathBuf, ImageError> {
    let img = image::open(input)?;
    let output = output_directory.join(output_file_name(input, target_format));

    target_format
        .prepare(img)
        .save_with_format(&output, target_format.image_format())?;

    Ok(output)
}

/// Immediate children of `dir` whose name ends in `.tif`/`.tiff`, any case
///
/// Order is whatever the platform's directory listing yields.
pub fn list_tiff_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if is_tiff_name(&entry.file_name()) {
            files.push(entry.path());
        }
    }
    Ok(files)
}

pub fn is_tiff_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy().to_lowercase();
    name.ends_with(".tiff") || name.ends_with(".tif")
}

/// `<stem>.<extension>`, where the stem drops only the last extension
pub fn output_file_name(input: &Path, target_format: TargetFormat) -> OsString {
    let mut name = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(target_format.extension());
    name
}

/// Floor of `processed / total * 100`
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (processed.min(total) * 100 / total) as u8
}

fn file_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::error::{DecodingError, ImageFormatHint};

    #[test]
    fn test_format_parse_is_case_insensitive() {
        assert_eq!("png".parse::<TargetFormat>(), Ok(TargetFormat::Png));
        assert_eq!("Jpeg".parse::<TargetFormat>(), Ok(TargetFormat::Jpeg));
        assert_eq!(" jpg ".parse::<TargetFormat>(), Ok(TargetFormat::Jpg));
        assert_eq!("GIF".parse::<TargetFormat>(), Ok(TargetFormat::Gif));
        assert!("webp".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_format_labels_and_extensions() {
        for format in TargetFormat::ALL {
            assert_eq!(format.extension(), format.as_str().to_lowercase());
        }
        assert_eq!(TargetFormat::default(), TargetFormat::Png);
        assert_eq!(TargetFormat::Jpg.image_format(), ImageFormat::Jpeg);
        assert_eq!(TargetFormat::Jpeg.image_format(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_tiff_name_matching() {
        assert!(is_tiff_name(OsStr::new("scan.tif")));
        assert!(is_tiff_name(OsStr::new("scan.TIFF")));
        assert!(is_tiff_name(OsStr::new("Scan.Tif")));
        assert!(!is_tiff_name(OsStr::new("scan.png")));
        assert!(!is_tiff_name(OsStr::new("scan.tif.bak")));
        assert!(!is_tiff_name(OsStr::new("tif")));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Path::new("/in/photo.TIF"), TargetFormat::Png),
            OsString::from("photo.png")
        );
        assert_eq!(
            output_file_name(Path::new("/in/archive.v2.tiff"), TargetFormat::Jpg),
            OsString::from("archive.v2.jpg")
        );
        assert_eq!(
            output_file_name(Path::new("/in/.tif"), TargetFormat::Bmp),
            OsString::from(".tif.bmp")
        );
    }

    #[test]
    fn test_progress_percent_truncates() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(1, 1), 100);
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(5, 3), 100);
    }

    #[test]
    fn test_classify_errors() {
        let missing = ImageError::IoError(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(FileIssue::classify(&missing), Some(FileIssue::Missing));

        let truncated = ImageError::IoError(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(FileIssue::classify(&truncated), Some(FileIssue::Undecodable));

        let corrupt = ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Exact(ImageFormat::Tiff),
            "bad header",
        ));
        assert_eq!(FileIssue::classify(&corrupt), Some(FileIssue::Undecodable));

        let denied = ImageError::IoError(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(FileIssue::classify(&denied), None);
    }

    #[test]
    fn test_result_from_batch_outcome() {
        let ok: ConversionResult = Ok::<_, ConvertError>(BatchSummary::default()).into();
        assert!(ok.succeeded());
        assert_eq!(ok.error_message(), None);

        let failed: ConversionResult = Err::<BatchSummary, _>(ConvertError::NoTiffFiles).into();
        assert!(!failed.succeeded());
        assert_eq!(
            failed.error_message(),
            Some("no TIFF files found in the input directory")
        );
    }

    #[test]
    fn test_jpeg_prepare_drops_alpha() {
        let rgba = DynamicImage::new_rgba8(2, 2);
        let prepared = TargetFormat::Jpeg.prepare(rgba);
        assert_eq!(prepared.color(), image::ColorType::Rgb8);

        let gray = DynamicImage::new_luma16(2, 2);
        let prepared = TargetFormat::Jpg.prepare(gray);
        assert_eq!(prepared.color(), image::ColorType::L8);
    }

    #[test]
    fn test_png_prepare_keeps_depth() {
        let deep = DynamicImage::new_rgb16(2, 2);
        let prepared = TargetFormat::Png.prepare(deep);
        assert_eq!(prepared.color(), image::ColorType::Rgb16);
    }
}
