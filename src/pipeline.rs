//! The derivative pipeline: decode once, crop once, then scale, encode, and
//! persist one derivative per requested size.
//!
//! ```text
//! raw bytes → decoded buffer → cropped buffer → N scaled buffers
//!           → N encoded streams → N stored paths
//! ```
//!
//! Execution is synchronous and sequential. Each derivative is written and
//! committed independently: a failure on the third size aborts the request
//! but does *not* roll back the first two. Consumers rely on that
//! non-atomic behavior; batching all writes into one commit would be the
//! atomic alternative, but it would change what partial failures leave
//! behind.

use log::{debug, error};

use crate::codec;
use crate::crop::{CropRegion, DerivativeSpec, crop_image, resolve_crop, resolve_target};
use crate::error::ImageError;
use crate::naming::derivative_path;
use crate::scale::scale;
use crate::store::{CONTENT_CHILD, ContentStore, NodeType, parent_path};
use crate::writer::save_derivative;

/// Where a source's binary payload lives and what the derivative naming
/// should call it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedSource {
    /// Path of the node carrying the binary payload.
    data_path: String,
    /// Logical file name used in derivative paths.
    name: String,
}

/// Locate the binary payload and logical name for the item at `path`.
///
/// A file node keeps its own name and descends into its content child for
/// the payload. A resource node carries the payload itself and borrows its
/// parent's name when the parent is a file node. Anything else is not an
/// image item.
fn resolve_source(store: &impl ContentStore, path: &str) -> Result<ResolvedSource, ImageError> {
    if !store.item_exists(path) {
        return Err(ImageError::NotFound(path.to_string()));
    }
    let node = store.get_item(path)?;

    match node.node_type {
        NodeType::File => Ok(ResolvedSource {
            data_path: format!("{}/{CONTENT_CHILD}", node.path),
            name: node.name,
        }),
        NodeType::Resource => {
            let name = parent_path(&node.path)
                .and_then(|pp| store.get_item(pp).ok())
                .filter(|parent| parent.node_type == NodeType::File)
                .map(|parent| parent.name)
                .unwrap_or_else(|| node.name.clone());
            Ok(ResolvedSource {
                data_path: node.path,
                name,
            })
        }
        NodeType::Other => Err(ImageError::InvalidInput(path.to_string())),
    }
}

/// Generate one derivative per spec for the image at `source_path`.
///
/// The source is decoded once and cropped once (sentinels resolved and
/// bounds clamped per [`resolve_crop`]); each spec's target then resolves
/// against the *source* intrinsics, the cropped buffer is multi-pass
/// scaled, re-encoded in the detected format, and written under
/// `<dest_base><width>x<height>_<name>`.
///
/// Returns the stored paths in spec order. The first failure aborts the
/// request; derivatives already written stay written.
pub fn generate_derivatives(
    store: &mut impl ContentStore,
    crop: CropRegion,
    specs: &[DerivativeSpec],
    source_path: &str,
    dest_base: &str,
) -> Result<Vec<String>, ImageError> {
    let source = resolve_source(store, source_path)?;
    // A file node whose content child went missing is still a missing
    // image (400), not a store failure; the From impl keeps Io at 500.
    let bytes = store.read_binary(&source.data_path)?;

    let (img, format) = codec::decode(&bytes).inspect_err(|e| {
        error!("can't decode {source_path}: {e}");
    })?;
    let (source_w, source_h) = (img.width(), img.height());
    let mimetype = codec::mime_type(format);

    let effective = resolve_crop(crop, source_w, source_h);
    debug!(
        "cropping {source_path} ({source_w}x{source_h}) to {}x{} at ({}, {})",
        effective.width, effective.height, effective.x, effective.y
    );
    let cropped = crop_image(&img, effective);
    drop(img);

    let mut paths = Vec::with_capacity(specs.len());
    for spec in specs {
        let (width, height) = resolve_target(*spec, source_w, source_h);
        let scaled = scale(&cropped, width, height);
        let encoded = codec::encode(&scaled, format)?;

        let path = derivative_path(dest_base, width, height, &source.name);
        let stored = save_derivative(store, &path, mimetype, encoded)?;
        debug!("stored derivative {stored}");
        paths.push(stored);
    }

    Ok(paths)
}
