use crate::pointer;

/// Base path against which relative references resolve.
///
/// Scopes nest: descending into a repeated collection item produces a child
/// scope whose base is the parent's base joined with the item segment. The
/// scope is always passed explicitly; there is no ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    base: Option<String>,
}

impl Scope {
    /// Scope with no base path; relative references resolve from the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn at(base: impl Into<String>) -> Self {
        Self {
            base: Some(pointer::normalize_path(&base.into())),
        }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Child scope for one collection item or nested object.
    pub fn child(&self, segment: &str) -> Self {
        let base = self.base.as_deref().unwrap_or("/");
        Self {
            base: Some(pointer::join_paths(base, &pointer::escape_segment(segment))),
        }
    }

    /// Resolve a path reference against this scope.
    pub fn resolve(&self, path: &str) -> String {
        pointer::resolve_path(path, self.base())
    }
}
