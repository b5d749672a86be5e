use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, trace};

use crate::screenshot::model::OutputFormat;

const JPEG_QUALITY: u8 = 80;

/// Converts a WebDriver PNG screenshot into the requested output format
///
/// PNG input is passed through untouched. JPEG drops the alpha channel;
/// WebP is written losslessly.
///
/// # Arguments
/// * `png` - Raw PNG bytes as returned by the browser
/// * `format` - Target output format
///
/// # Returns
/// * `Result<Vec<u8>>` - Encoded image bytes or an error
pub fn encode_screenshot(png: Vec<u8>, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let (width, height) = match format {
        OutputFormat::Png => {
            trace!("PNG requested, passing {} bytes through", png.len());
            return Ok(png);
        }
        OutputFormat::Jpg | OutputFormat::Jpeg => {
            let image = decode_png(&png)?;
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))
                .context("Failed to encode screenshot as JPEG")?;
            (image.width(), image.height())
        }
        OutputFormat::WebP => {
            let image = decode_png(&png)?;
            DynamicImage::ImageRgba8(image.to_rgba8())
                .write_with_encoder(WebPEncoder::new_lossless(&mut buffer))
                .context("Failed to encode screenshot as WebP")?;
            (image.width(), image.height())
        }
    };

    debug!("Encoded {}x{} screenshot as {} ({} bytes)", width, height, format, buffer.len());
    Ok(buffer)
}

fn decode_png(png: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(png, ImageFormat::Png)
        .context("Failed to decode browser screenshot as PNG")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_png() -> Vec<u8> {
        let mut img = RgbaImage::new(8, 6);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 30) as u8, 80, 160, 255]);
        }
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_with_encoder(image::codecs::png::PngEncoder::new(&mut png))
            .unwrap();
        png
    }

    #[test]
    fn test_png_passthrough() {
        let png = sample_png();
        let out = encode_screenshot(png.clone(), OutputFormat::Png).unwrap();
        assert_eq!(out, png);
    }

    #[test]
    fn test_jpeg_output() {
        for format in [OutputFormat::Jpg, OutputFormat::Jpeg] {
            let out = encode_screenshot(sample_png(), format).unwrap();
            assert_eq!(&out[..3], &[0xFF, 0xD8, 0xFF]);
        }
    }

    #[test]
    fn test_webp_output() {
        let out = encode_screenshot(sample_png(), OutputFormat::WebP).unwrap();
        assert_eq!(&out[..4], b"RIFF");
        assert_eq!(&out[8..12], b"WEBP");
    }

    #[test]
    fn test_garbage_input_fails_for_transcoding() {
        assert!(encode_screenshot(b"not an image".to_vec(), OutputFormat::Jpeg).is_err());
        // Pass-through does not inspect the bytes
        assert!(encode_screenshot(b"not an image".to_vec(), OutputFormat::Png).is_ok());
    }
}
