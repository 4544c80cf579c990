//! Progressive-halving downscaler.
//!
//! A single resample from a large source straight to a small target loses
//! detail (the filter window covers too few source pixels per output pixel)
//! and is slower than it looks. Instead the working buffer is halved per
//! pass with bilinear filtering until both axes sit exactly on target, the
//! classic multi-step `drawImage` technique. Each pass owns its buffer;
//! the previous one is dropped as soon as it is superseded.

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

/// Scale a buffer to the target size by repeated halving.
///
/// Per-axis behavior: an axis whose target meets or exceeds the current
/// extent is never halved and keeps its extent, because this scaler only shrinks.
/// Every other axis halves per pass (clamped up to its target so it never
/// overshoots below) with bilinear filtering. Zero passes means the input
/// dimensions already satisfy both targets and a buffer of the original
/// size is returned.
pub fn scale(img: &DynamicImage, target_w: u32, target_h: u32) -> DynamicImage {
    let (mut w, mut h) = (img.width(), img.height());
    // An axis is never grown, so its goal is capped at the current extent.
    let goal_w = target_w.min(w);
    let goal_h = target_h.min(h);

    if w == goal_w && h == goal_h {
        return img.clone();
    }

    let mut current: Option<DynamicImage> = None;
    while w > goal_w || h > goal_h {
        w = (w / 2).max(goal_w);
        h = (h / 2).max(goal_h);
        debug!("scaling pass -> {w}x{h}");
        let source = current.as_ref().unwrap_or(img);
        // Triangle is bilinear; resize_exact filters over the full source
        // area, so each halving pass is antialiased.
        current = Some(source.resize_exact(w, h, FilterType::Triangle));
    }

    // The loop always runs at least once here, so current is set.
    current.unwrap_or_else(|| img.clone())
}
