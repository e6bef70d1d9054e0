//! Module specifier to package name resolution.

/// Returns true if the specifier names an npm package rather than a path.
pub fn is_package_specifier(specifier: &str) -> bool {
    !specifier.is_empty() && !specifier.starts_with('.') && !specifier.starts_with('/')
}

/// Maps a module specifier to the package it belongs to.
///
/// Relative and absolute paths never name a package. Scoped specifiers keep
/// their first two segments, everything else keeps the first one. Whether the
/// result is a declared dependency is decided by the caller.
///
/// # Example
///
/// ```
/// use usagescope::analysis::resolve_package_name;
///
/// assert_eq!(resolve_package_name("lodash/fp/merge"), Some("lodash"));
/// assert_eq!(resolve_package_name("@babel/core/lib/x"), Some("@babel/core"));
/// assert_eq!(resolve_package_name("./utils"), None);
/// ```
pub fn resolve_package_name(specifier: &str) -> Option<&str> {
    if !is_package_specifier(specifier) {
        return None;
    }

    // @scope/package/subpath -> @scope/package
    if specifier.starts_with('@') {
        let mut slashes = specifier.match_indices('/').map(|(idx, _)| idx);
        return match (slashes.next(), slashes.next()) {
            (Some(_), Some(second)) => Some(&specifier[..second]),
            _ => Some(specifier),
        };
    }

    // package/subpath -> package
    match specifier.find('/') {
        Some(idx) => Some(&specifier[..idx]),
        None => Some(specifier),
    }
}
