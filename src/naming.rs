//! Store path normalization and the derivative naming convention.
//!
//! Every derivative lands at `<base><width>x<height>_<name>`, where `name`
//! is the logical name of the decoded source and width/height are the
//! *resolved* target dimensions. The base path is taken as given: callers
//! decide whether it ends in a separator.

/// Normalize a store path: force a leading `/`, collapse duplicate
/// separators, and strip any trailing `/` (the root stays `/`).
///
/// Idempotent: normalizing an already-normal path returns it unchanged.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Build the derivative path for a target size: `<base><width>x<height>_<name>`.
pub fn derivative_path(base: &str, width: u32, height: u32, name: &str) -> String {
    format!("{base}{width}x{height}_{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_duplicate_separators() {
        assert_eq!(normalize_path("a//b"), "/a/b");
        assert_eq!(normalize_path("//a///b//c"), "/a/b/c");
    }

    #[test]
    fn normalize_adds_leading_slash() {
        assert_eq!(normalize_path("img/a"), "/img/a");
    }

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/img/a/"), "/img/a");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_path("/files//photos/a");
        assert_eq!(normalize_path(&once), once);
    }

    #[test]
    fn normalize_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn derivative_path_convention() {
        assert_eq!(derivative_path("/thumbs/", 100, 75, "a"), "/thumbs/100x75_a");
        assert_eq!(
            derivative_path("/files/breadcrumb_", 50, 600, "portrait.jpg"),
            "/files/breadcrumb_50x600_portrait.jpg"
        );
    }
}
