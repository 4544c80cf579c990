//! Format sniffing, decoding, and same-format re-encoding.
//!
//! All format decisions come from byte content, never from path extensions.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff | `image::guess_format` (magic-byte detection) |
//! | Decode | `image::ImageReader` with the sniffed format forced |
//! | Encode | `DynamicImage::write_to` into an in-memory cursor |
//! | Mimetype | `ImageFormat::to_mime_type` |
//!
//! A derivative is always re-encoded in the format its source was detected
//! as: the engine resizes, it never transcodes. A format the crate can
//! sniff but not both decode *and* encode (e.g. GIF with these features) is
//! rejected up front as unrecognized rather than failing halfway through.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};
use log::error;

use crate::error::ImageError;

/// Sniff the image format from byte content.
///
/// Fails with [`ImageError::Format`] when the bytes match no known format
/// or match a format without a compiled decoder + encoder pair.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    let format = image::guess_format(bytes).map_err(|_| {
        error!("can't parse this format");
        ImageError::Format
    })?;
    if !format.reading_enabled() || !format.writing_enabled() {
        error!("unsupported format {format:?}");
        return Err(ImageError::Format);
    }
    Ok(format)
}

/// Sniff and decode raw bytes into a pixel buffer.
///
/// Returns the buffer together with the detected format so later stages can
/// re-encode without re-sniffing.
pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), ImageError> {
    let format = sniff_format(bytes)?;
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format);
    let img = reader
        .decode()
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    Ok((img, format))
}

/// Encode a pixel buffer into an in-memory byte stream in `format`.
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ImageError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Mimetype for a detected format.
pub fn mime_type(format: ImageFormat) -> &'static str {
    format.to_mime_type()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::image_bytes as test_image_bytes;

    #[test]
    fn sniff_detects_png_and_jpeg() {
        let png = test_image_bytes(ImageFormat::Png, 8, 8);
        assert_eq!(sniff_format(&png).unwrap(), ImageFormat::Png);

        let jpeg = test_image_bytes(ImageFormat::Jpeg, 8, 8);
        assert_eq!(sniff_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn sniff_rejects_plain_text() {
        let err = sniff_format(b"this is not an image, it is prose").unwrap_err();
        assert!(matches!(err, ImageError::Format));
        assert_eq!(err.status_code(), 406);
    }

    #[test]
    fn sniff_rejects_empty_bytes() {
        assert!(matches!(sniff_format(&[]), Err(ImageError::Format)));
    }

    #[test]
    fn decode_reports_intrinsic_dimensions() {
        let bytes = test_image_bytes(ImageFormat::Png, 200, 150);
        let (img, format) = decode(&bytes).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(img.width(), 200);
        assert_eq!(img.height(), 150);
    }

    #[test]
    fn decode_truncated_png_is_decode_error() {
        let mut bytes = test_image_bytes(ImageFormat::Png, 64, 64);
        // Keep the magic bytes so sniffing succeeds, then cut the body.
        bytes.truncate(24);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
        assert_eq!(err.status_code(), 406);
    }

    #[test]
    fn encode_round_trips_same_format() {
        let bytes = test_image_bytes(ImageFormat::Jpeg, 40, 30);
        let (img, format) = decode(&bytes).unwrap();
        let re = encode(&img, format).unwrap();
        assert_eq!(sniff_format(&re).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn mime_types_match_format() {
        assert_eq!(mime_type(ImageFormat::Jpeg), "image/jpeg");
        assert_eq!(mime_type(ImageFormat::Png), "image/png");
    }
}
