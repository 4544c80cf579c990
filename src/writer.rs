//! Persisting an encoded derivative into the content store.
//!
//! Mirrors the file/content convention from [`crate::store`]: the target
//! path gets a file node (deep-created with any missing ancestors), its
//! content child gets the payload, mimetype, and a fresh last-modified
//! timestamp, and the session is committed only when the store reports
//! pending changes.

use chrono::Utc;
use log::warn;

use crate::error::ImageError;
use crate::naming::normalize_path;
use crate::store::{
    CONTENT_CHILD, ContentStore, NodeType, PROP_DATA, PROP_LAST_MODIFIED, PROP_MIMETYPE,
    PropertyValue,
};

/// Write an encoded derivative at `path` with the given mimetype.
///
/// Returns the normalized path the derivative was stored under. Any store
/// failure wraps as [`ImageError::Io`] (500).
pub fn save_derivative(
    store: &mut impl ContentStore,
    path: &str,
    mimetype: &str,
    data: Vec<u8>,
) -> Result<String, ImageError> {
    let path = normalize_path(path);

    store
        .deep_get_or_create(&path, NodeType::File)
        .map_err(io_err)?;

    let content_path = format!("{path}/{CONTENT_CHILD}");
    store
        .deep_get_or_create(&content_path, NodeType::Resource)
        .map_err(io_err)?;

    store
        .set_property(&content_path, PROP_DATA, PropertyValue::Binary(data))
        .map_err(io_err)?;
    store
        .set_property(
            &content_path,
            PROP_MIMETYPE,
            PropertyValue::Text(mimetype.to_string()),
        )
        .map_err(io_err)?;
    store
        .set_property(
            &content_path,
            PROP_LAST_MODIFIED,
            PropertyValue::Timestamp(Utc::now()),
        )
        .map_err(io_err)?;

    if store.has_pending_changes() {
        store.save().map_err(io_err)?;
    }

    Ok(path)
}

fn io_err(err: crate::store::StoreError) -> ImageError {
    warn!("store failure while saving derivative: {err}");
    ImageError::Io(err.to_string())
}
