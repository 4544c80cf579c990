//! Shared test fixtures for the cropstore test suite.

use image::{DynamicImage, ImageFormat, RgbImage};

/// Encode a synthetic gradient in the given format.
pub fn image_bytes(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    crate::codec::encode(&DynamicImage::ImageRgb8(img), format).unwrap()
}
