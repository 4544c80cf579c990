//! # Cropstore
//!
//! An image-derivative engine for hierarchical content stores: given a
//! source image addressed by path, a crop rectangle, and a list of target
//! sizes, it decodes the image, crops it, produces one correctly-scaled
//! rendition per size, and writes each back into the store under a
//! deterministic path.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! raw bytes → decoded buffer → cropped buffer → N scaled buffers
//!           → N encoded streams → N stored paths
//! ```
//!
//! One decode and one crop per request; every requested size then gets its
//! own scale → encode → write pass over the shared read-only cropped
//! buffer. The entry point is [`pipeline::generate_derivatives`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrator: sequences decode, crop, and the per-size scale/encode/write loop |
//! | [`codec`] | Content sniffing, decoding, and same-format re-encoding via the `image` crate |
//! | [`crop`] | Crop/target resolution math (sentinels, clamping) and sub-region extraction |
//! | [`scale`] | Progressive-halving multi-pass downscaler |
//! | [`writer`] | Persists an encoded derivative with mimetype and timestamp properties |
//! | [`store`] | The [`store::ContentStore`] seam plus the in-memory reference store |
//! | [`naming`] | Path normalization and the `<base><w>x<h>_<name>` convention |
//! | [`error`] | Error taxonomy with HTTP-style status codes |
//!
//! # Design Decisions
//!
//! ## Format Preserved, Never Transcoded
//!
//! A derivative is re-encoded in the format its source was sniffed as.
//! Formats are detected from byte content with `image::guess_format`;
//! extensions lie, magic bytes don't. Bytes that sniff to nothing (or to a
//! format without both a decoder and an encoder compiled in) are rejected
//! with a 406-style error before any pixel work happens.
//!
//! ## Multi-Pass Scaling
//!
//! Downscales run as repeated bilinear halvings instead of one big
//! resample; see [`scale`] for why. Targets at or above the source extent
//! on an axis leave that axis alone; the scaler only shrinks.
//!
//! ## Clamp, Don't Reject
//!
//! Crop rectangles are never refused. Sentinel (non-positive) sizes select
//! the full source extent, overshooting rectangles clamp to the source
//! bounds, and an origin past the edge collapses to a zero-extent region
//! (which then surfaces as a 406 at encode time, since no supported format
//! encodes zero pixels).
//!
//! ## Non-Atomic Multi-Write
//!
//! Each derivative commits independently. A request that fails on its
//! third size keeps the first two derivatives in the store. Consumers
//! observe and depend on this; see [`pipeline`] before "fixing" it.
//!
//! ## The Store Is a Trait
//!
//! The engine only sees [`store::ContentStore`]. Session handling,
//! authentication, and the real repository live behind the seam;
//! [`store::MemoryStore`] is a complete reference implementation that the
//! test suite and embedders can run against.

pub mod codec;
pub mod crop;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod scale;
pub mod store;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crop::{CropRegion, DerivativeSpec, EffectiveCrop};
pub use error::ImageError;
pub use pipeline::generate_derivatives;
pub use store::{ContentStore, MemoryStore};
