//! Request-target parsing.
//!
//! Pure string utilities shared by the engine: splitting the raw URL into
//! path / query / search, resolving the first path segment used as the
//! scoped-middleware key, and prefix normalization for registration.

/// The parsed pieces of a raw request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path portion of the URL.
    pub path: String,
    /// Query string without the leading `?`, if any.
    pub query: Option<String>,
    /// Query string including the leading `?`, if any.
    pub search: Option<String>,
}

/// Split a raw target URL at the first `?` found at byte index 1 or later.
///
/// A `?` at index 0 is not treated as a query delimiter, and a target with
/// no `?` yields `None` for both query and search.
pub fn parse_target(url: &str) -> Target {
    match url.get(1..).and_then(|rest| rest.find('?')) {
        Some(i) => {
            let idx = i + 1;
            Target {
                path: url[..idx].to_string(),
                query: Some(url[idx + 1..].to_string()),
                search: Some(url[idx..].to_string()),
            }
        }
        None => Target {
            path: url.to_string(),
            query: None,
            search: None,
        },
    }
}

/// The substring of `path` up to, but excluding, the second `/`, or the
/// whole path when there is no second slash. This segment is the lookup key
/// for scoped middleware.
pub fn first_segment(path: &str) -> &str {
    match path.get(1..).and_then(|rest| rest.find('/')) {
        Some(i) if i > 0 => &path[..i + 1],
        _ => path,
    }
}

/// Normalize a registration prefix to start with `/`.
pub fn ensure_leading_slash(prefix: &str) -> String {
    if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    }
}
