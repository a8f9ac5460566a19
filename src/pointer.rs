//! JSON-Pointer-like path handling.
//!
//! Paths are `/`-delimited; `~1` escapes a literal `/` and `~0` a literal
//! `~` within a segment. Absolute paths start with `/`; relative paths are
//! resolved against a base path (the scope).

/// Split a pointer into unescaped segments.
///
/// The empty path and `"/"` both address the root and yield no segments.
/// Unescaping is applied left-to-right over each raw segment, `~1` before
/// `~0`, so `~01` decodes to `~1` and not `/`.
pub fn parse_json_pointer(path: &str) -> Vec<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Vec::new();
    }
    trimmed
        .strip_prefix('/')
        .unwrap_or(trimmed)
        .split('/')
        .map(unescape_segment)
        .collect()
}

fn unescape_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('1') => out.push('/'),
                Some('0') => out.push('~'),
                Some(other) => {
                    out.push('~');
                    out.push(other);
                }
                None => out.push('~'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape one segment for embedding in a pointer string.
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Canonical form: leading `/`, no trailing `/` (except the root itself),
/// surrounding whitespace dropped. Empty input normalizes to `/`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    let mut out = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Resolve `path` against an optional base. Absolute paths ignore the base
/// entirely; relative paths are joined onto it (`None` means root).
pub fn resolve_path(path: &str, base: Option<&str>) -> String {
    if is_absolute_path(path.trim()) {
        return normalize_path(path);
    }
    join_paths(base.unwrap_or("/"), path)
}

/// Join a relative fragment onto a base path, with exactly one `/` between
/// them. An empty fragment returns the normalized base unchanged.
pub fn join_paths(base: &str, relative: &str) -> String {
    let base = normalize_path(base);
    let fragment = relative.trim().trim_matches('/');
    if fragment.is_empty() {
        return base;
    }
    if base == "/" {
        format!("/{fragment}")
    } else {
        format!("{base}/{fragment}")
    }
}
