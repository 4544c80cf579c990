//! Pipeline error taxonomy.
//!
//! Every failure in the derivative pipeline maps to an HTTP-style status code
//! so the embedding request layer can answer without inspecting variants:
//!
//! | Variant | Status | Meaning |
//! |---|---|---|
//! | [`ImageError::NotFound`] | 400 | source path does not exist in the store |
//! | [`ImageError::InvalidInput`] | 500 | addressed item is neither a file nor a resource node |
//! | [`ImageError::Format`] | 406 | byte content is not a recognized image format |
//! | [`ImageError::Decode`] | 406 | recognized format, malformed bytes |
//! | [`ImageError::Encode`] | 406 | buffer cannot be re-encoded in the detected format |
//! | [`ImageError::Io`] | 500 | store read, write, or commit failure |
//!
//! The `InvalidInput` → 500 mapping looks odd next to `NotFound` → 400 but is
//! deliberate: a non-image node at the source path is treated the same as an
//! unreadable repository, and callers depend on that distinction.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("no image found at {0}")]
    NotFound(String),

    #[error("invalid image item: {0}")]
    InvalidInput(String),

    #[error("can't parse this format")]
    Format,

    #[error("can't decode this image: {0}")]
    Decode(String),

    #[error("can't encode this image: {0}")]
    Encode(String),

    #[error("store failure: {0}")]
    Io(String),
}

impl ImageError {
    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ImageError::NotFound(_) => 400,
            ImageError::Format | ImageError::Decode(_) | ImageError::Encode(_) => 406,
            ImageError::InvalidInput(_) | ImageError::Io(_) => 500,
        }
    }
}

impl From<StoreError> for ImageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => ImageError::NotFound(path),
            StoreError::Io(msg) => ImageError::Io(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ImageError::NotFound("/a".into()).status_code(), 400);
        assert_eq!(ImageError::Format.status_code(), 406);
        assert_eq!(ImageError::Decode("bad".into()).status_code(), 406);
        assert_eq!(ImageError::Encode("bad".into()).status_code(), 406);
        assert_eq!(ImageError::InvalidInput("x".into()).status_code(), 500);
        assert_eq!(ImageError::Io("x".into()).status_code(), 500);
    }

    #[test]
    fn store_not_found_becomes_400() {
        let err: ImageError = StoreError::NotFound("/img/a".into()).into();
        assert!(matches!(err, ImageError::NotFound(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn store_io_becomes_500() {
        let err: ImageError = StoreError::Io("disk on fire".into()).into();
        assert!(matches!(err, ImageError::Io(_)));
        assert_eq!(err.status_code(), 500);
    }
}
