use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::screenshot::devices::DeviceProfile;
use crate::screenshot::viewport::ScreenResolution;

/// Image format of the uploaded screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpg,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Parses a format name case-insensitively, falling back to PNG for
    /// missing or unrecognized values
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("jpg") => OutputFormat::Jpg,
            Some("jpeg") => OutputFormat::Jpeg,
            Some("webp") => OutputFormat::WebP,
            _ => OutputFormat::Png,
        }
    }

    /// File extension, as requested by the caller (`jpg` stays `jpg`)
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpg | OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the browser viewport is determined for a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureMode {
    /// Viewport, user agent and touch input come from a named device profile
    Device(&'static DeviceProfile),
    /// Viewport width is fixed, height follows the rendered body; the whole page is captured
    FullPage { width: u32 },
    /// Viewport is a standard resolution picked by aspect ratio
    Fixed(ScreenResolution),
}

/// Everything the renderer needs to produce one screenshot
#[derive(Debug, Clone)]
pub struct CaptureJob {
    pub url: String,
    pub format: OutputFormat,
    pub mode: CaptureMode,
}

/// A captured image read back from disk, ready for upload
#[derive(Debug)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Per-request scratch file for a capture, removed when dropped
#[derive(Debug)]
pub struct TempScreenshot {
    path: PathBuf,
}

impl TempScreenshot {
    /// Reserves a unique file name inside `dir`; nothing is created on disk
    pub fn new(dir: &Path, format: OutputFormat) -> Self {
        let path = dir.join(format!("screenshot_{}.{}", Uuid::new_v4(), format.extension()));
        debug!("Reserved temporary screenshot path {}", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempScreenshot {
    // Blocking, but only ever unlinks a single file
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(_) => debug!("Removed temporary screenshot {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove temporary screenshot {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing_is_lenient() {
        assert_eq!(OutputFormat::parse_lenient(None), OutputFormat::Png);
        assert_eq!(OutputFormat::parse_lenient(Some("PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::parse_lenient(Some("Jpg")), OutputFormat::Jpg);
        assert_eq!(OutputFormat::parse_lenient(Some("JPEG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse_lenient(Some("webp")), OutputFormat::WebP);
        assert_eq!(OutputFormat::parse_lenient(Some("bmp")), OutputFormat::Png);
        assert_eq!(OutputFormat::parse_lenient(Some("")), OutputFormat::Png);
    }

    #[test]
    fn test_content_type_maps_jpg_to_jpeg() {
        assert_eq!(OutputFormat::Jpg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.content_type(), "image/webp");
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
    }

    #[test]
    fn test_temp_screenshot_names_are_unique() {
        let dir = std::env::temp_dir();
        let a = TempScreenshot::new(&dir, OutputFormat::Png);
        let b = TempScreenshot::new(&dir, OutputFormat::Png);
        assert_ne!(a.path(), b.path());
        assert!(a.path().to_string_lossy().ends_with(".png"));
    }

    #[test]
    fn test_temp_screenshot_removed_on_drop() {
        let dir = std::env::temp_dir();
        let path = {
            let temp = TempScreenshot::new(&dir, OutputFormat::Jpg);
            std::fs::write(temp.path(), b"data").unwrap();
            assert!(temp.path().exists());
            temp.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
