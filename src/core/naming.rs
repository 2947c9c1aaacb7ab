//! core::naming
//!
//! Dotted-path construction and privacy classification.
//!
//! # Rules
//!
//! - A path is the dot-joined sequence of names from the root to an entity
//! - A name is private when it starts with the `_` marker
//! - Privacy propagates: one private segment anywhere makes the whole path
//!   private

/// The naming convention marking an identifier as non-public.
pub const PRIVACY_MARKER: char = '_';

/// Join accumulated path segments and a final name into a dotted path.
///
/// # Example
///
/// ```
/// use surfacer::core::naming::join_path;
///
/// let path = vec!["pkg".to_string(), "sub".to_string()];
/// assert_eq!(join_path(&path, "attr"), "pkg.sub.attr");
/// assert_eq!(join_path(&[], "pkg"), "pkg");
/// ```
pub fn join_path(path: &[String], name: &str) -> String {
    if path.is_empty() {
        return name.to_string();
    }
    let mut joined = path.join(".");
    joined.push('.');
    joined.push_str(name);
    joined
}

/// Whether a single name carries the privacy marker.
pub fn is_private_name(name: &str) -> bool {
    name.starts_with(PRIVACY_MARKER)
}

/// Classify a full path: private when any accumulated segment, or the
/// item's own name, starts with the privacy marker.
///
/// # Example
///
/// ```
/// use surfacer::core::naming::is_private_path;
///
/// let public_parent = vec!["pkg".to_string(), "public_mod".to_string()];
/// assert!(is_private_path(&public_parent, "_leaf"));
///
/// let private_parent = vec!["pkg".to_string(), "_internal".to_string()];
/// assert!(is_private_path(&private_parent, "helper"));
///
/// assert!(!is_private_path(&["pkg".to_string()], "open"));
/// ```
pub fn is_private_path(path: &[String], name: &str) -> bool {
    path.iter().any(|segment| is_private_name(segment)) || is_private_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn join_empty_path_is_just_the_name() {
        assert_eq!(join_path(&[], "root"), "root");
    }

    #[test]
    fn join_concatenates_with_dots() {
        assert_eq!(join_path(&segs(&["a", "b"]), "c"), "a.b.c");
    }

    #[test]
    fn public_path_with_public_name_is_public() {
        assert!(!is_private_path(&segs(&["pkg", "mod"]), "value"));
    }

    #[test]
    fn private_leaf_name_makes_path_private() {
        assert!(is_private_path(&segs(&["pkg", "public_mod"]), "_leaf"));
    }

    #[test]
    fn private_middle_segment_propagates() {
        assert!(is_private_path(&segs(&["pkg", "_internal"]), "helper"));
    }

    #[test]
    fn marker_must_be_leading() {
        // Underscores inside a name do not mark it private.
        assert!(!is_private_path(&segs(&["pkg"]), "snake_case"));
        assert!(!is_private_path(&segs(&["my_pkg"]), "value"));
    }

    #[test]
    fn dunder_names_are_private() {
        assert!(is_private_path(&segs(&["pkg"]), "__init__"));
    }
}
