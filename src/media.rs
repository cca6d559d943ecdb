//! License image preprocessing
//!
//! Bounds the upload payload before submission: the selected file is
//! decoded, downscaled so neither axis exceeds 800 pixels, re-encoded as
//! JPEG at a fixed quality, and embedded as a data URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

/// Largest accepted source file
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
/// Largest axis of the re-encoded image
pub const MAX_DIMENSION: u32 = 800;
/// JPEG quality factor (0-100, mirrors the backend's 0.7 expectation)
pub const JPEG_QUALITY: u8 = 70;

/// File precondition and decode failures, reported on the attachment field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("Image size must not exceed 2 MiB")]
    TooLarge,
    #[error("Please choose a valid image file")]
    NotAnImage,
    #[error("The selected file could not be read as an image")]
    Undecodable,
}

/// Guess a MIME type from the file extension
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = path
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Scale dimensions down proportionally so the larger axis equals `max`.
/// Dimensions already within bounds are returned untouched.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    if width >= height {
        let scaled = (f64::from(height) * f64::from(max) / f64::from(width)).round() as u32;
        (max, scaled.max(1))
    } else {
        let scaled = (f64::from(width) * f64::from(max) / f64::from(height)).round() as u32;
        (scaled.max(1), max)
    }
}

/// Turn a selected file into a bounded JPEG data URI.
///
/// Preconditions are checked before any decode work: files over
/// [`MAX_UPLOAD_BYTES`] and non-image MIME types short-circuit with a
/// field-level error.
pub fn prepare_license_image(bytes: &[u8], mime: &str) -> Result<String, AttachmentError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AttachmentError::TooLarge);
    }
    if !mime.starts_with("image/") {
        return Err(AttachmentError::NotAnImage);
    }

    let decoded = image::load_from_memory(bytes).map_err(|err| {
        tracing::debug!("license image decode failed: {err}");
        AttachmentError::Undecodable
    })?;

    let (width, height) = decoded.dimensions();
    let (target_w, target_h) = fit_within(width, height, MAX_DIMENSION);
    let bounded = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_w, target_h, FilterType::Triangle)
    };

    // JPEG has no alpha channel
    let rgb = bounded.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|err| {
            tracing::debug!("license image encode failed: {err}");
            AttachmentError::Undecodable
        })?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&encoded)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([120, 30, 60]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn decode_data_uri(uri: &str) -> image::DynamicImage {
        let b64 = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    mod fit {
        use super::*;

        #[test]
        fn test_wide_image_clamps_width() {
            assert_eq!(fit_within(2000, 1000, 800), (800, 400));
        }

        #[test]
        fn test_tall_image_clamps_height() {
            assert_eq!(fit_within(1000, 2000, 800), (400, 800));
        }

        #[test]
        fn test_small_image_untouched() {
            assert_eq!(fit_within(500, 400, 800), (500, 400));
            assert_eq!(fit_within(800, 800, 800), (800, 800));
        }

        #[test]
        fn test_extreme_ratio_never_hits_zero() {
            let (w, h) = fit_within(10_000, 1, 800);
            assert_eq!(w, 800);
            assert!(h >= 1);
        }
    }

    mod preconditions {
        use super::*;

        #[test]
        fn test_oversized_file_rejected_before_decode() {
            // 3 MiB of garbage: must fail on size, not on decode
            let bytes = vec![0u8; 3 * 1024 * 1024];
            assert_eq!(
                prepare_license_image(&bytes, "image/png"),
                Err(AttachmentError::TooLarge)
            );
        }

        #[test]
        fn test_non_image_mime_rejected() {
            let bytes = png_bytes(10, 10);
            assert_eq!(
                prepare_license_image(&bytes, "application/pdf"),
                Err(AttachmentError::NotAnImage)
            );
        }

        #[test]
        fn test_undecodable_bytes_rejected() {
            assert_eq!(
                prepare_license_image(b"definitely not pixels", "image/png"),
                Err(AttachmentError::Undecodable)
            );
        }
    }

    mod pipeline {
        use super::*;

        #[test]
        fn test_large_image_downscaled_to_bounded_jpeg() {
            let uri = prepare_license_image(&png_bytes(2000, 1000), "image/png").unwrap();
            assert!(uri.starts_with("data:image/jpeg;base64,"));
            let out = decode_data_uri(&uri);
            assert_eq!(out.dimensions(), (800, 400));
        }

        #[test]
        fn test_small_image_keeps_dimensions() {
            let uri = prepare_license_image(&png_bytes(120, 80), "image/png").unwrap();
            let out = decode_data_uri(&uri);
            assert_eq!(out.dimensions(), (120, 80));
        }
    }

    mod mime {
        use super::*;

        #[test]
        fn test_known_image_extensions() {
            assert_eq!(mime_for_path("scan.JPG"), "image/jpeg");
            assert_eq!(mime_for_path("/tmp/license.png"), "image/png");
            assert_eq!(mime_for_path("pic.webp"), "image/webp");
        }

        #[test]
        fn test_unknown_extension_is_not_an_image() {
            assert_eq!(mime_for_path("notes.txt"), "application/octet-stream");
            assert_eq!(mime_for_path("noextension"), "application/octet-stream");
        }
    }
}
