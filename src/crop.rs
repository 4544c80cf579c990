//! Crop-region and target-dimension resolution, plus sub-region extraction.
//!
//! All dimension math lives in pure functions testable without images.
//! Requests arrive as raw integers with sentinel semantics: a non-positive
//! width/height means "full source extent on that axis". Nothing here
//! rejects a rectangle; everything clamps into validity, down to a
//! zero-extent region for origins at or past the source edge.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Requested crop rectangle, as received from the request layer.
///
/// Non-positive `width`/`height` select the full source extent on that
/// axis. Negative origins clamp to the source edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CropRegion {
    /// The full-source sentinel: `(0, 0, 0, 0)`.
    pub fn full() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
}

/// One requested derivative size.
///
/// A non-positive dimension resolves to the *source image's* intrinsic
/// extent on that axis, not the cropped region's. That asymmetry is
/// long-standing consumer-visible behavior and is kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeSpec {
    pub width: i32,
    pub height: i32,
}

/// Crop rectangle after sentinel resolution and clamping to source bounds.
///
/// Invariants: `x + width <= source_w` and `y + height <= source_h`. A
/// degenerate request resolves to a zero extent rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolve a requested crop against the source dimensions.
///
/// Resolution order: non-positive width/height become the full source
/// extent, then the rectangle is clamped so it never reaches past the
/// source. Clamping is silent; no rectangle is rejected.
pub fn resolve_crop(region: CropRegion, source_w: u32, source_h: u32) -> EffectiveCrop {
    let x = region.x.max(0) as u32;
    let y = region.y.max(0) as u32;

    let mut width = if region.width <= 0 {
        source_w
    } else {
        region.width as u32
    };
    let mut height = if region.height <= 0 {
        source_h
    } else {
        region.height as u32
    };

    // Clamp; an origin at or past the edge yields a zero extent.
    let x = x.min(source_w);
    let y = y.min(source_h);
    if x + width > source_w {
        width = source_w - x;
    }
    if y + height > source_h {
        height = source_h - y;
    }

    EffectiveCrop {
        x,
        y,
        width,
        height,
    }
}

/// Resolve a derivative spec's target size against the source intrinsics.
pub fn resolve_target(spec: DerivativeSpec, source_w: u32, source_h: u32) -> (u32, u32) {
    let width = if spec.width <= 0 {
        source_w
    } else {
        spec.width as u32
    };
    let height = if spec.height <= 0 {
        source_h
    } else {
        spec.height as u32
    };
    (width, height)
}

/// Extract the effective region from a decoded buffer as a new buffer.
pub fn crop_image(img: &DynamicImage, region: EffectiveCrop) -> DynamicImage {
    img.crop_imm(region.x, region.y, region.width, region.height)
}
