//! Layout failure taxonomy.
//!
//! Measurement and layout fail fast: the first invalid node aborts the
//! call, siblings after it are not processed, and no cache entry is written
//! for the failing subtree. Rendering never produces these — paint is
//! best-effort by design.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A constraint or prop failed validation. `path` locates the offending
    /// node from the root (`root.children[2].children[0]`).
    #[error("invalid props at {path}: {detail}")]
    InvalidProps { path: String, detail: String },
}

impl LayoutError {
    pub fn invalid(path: &[usize], detail: impl Into<String>) -> Self {
        LayoutError::InvalidProps {
            path: format_path(path),
            detail: detail.into(),
        }
    }
}

/// Render a child-index path as a locator string.
pub fn format_path(path: &[usize]) -> String {
    let mut out = String::from("root");
    for idx in path {
        out.push_str(".children[");
        out.push_str(&idx.to_string());
        out.push(']');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_formatting() {
        assert_eq!(format_path(&[]), "root");
        assert_eq!(format_path(&[2, 0]), "root.children[2].children[0]");
    }

    #[test]
    fn error_display_carries_locator() {
        let e = LayoutError::invalid(&[1], "negative width");
        assert_eq!(
            e.to_string(),
            "invalid props at root.children[1]: negative width"
        );
    }
}
