//! Per-request context.

use http::{Extensions, Method};
use std::collections::HashMap;

/// The ephemeral context for one in-flight request.
///
/// Created by the transport layer with the raw URL, filled in by the engine
/// during chain assembly (`path`, `query`, `search`, `params`), mutated by
/// rebase handlers when the request enters a scoped prefix, and discarded
/// once the response is finalized. No cross-request state lives here.
#[derive(Debug)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// The raw request target (path plus optional query string). Scoped
    /// middleware rebases this in place, so an embedded router observes the
    /// URL relative to its mount prefix.
    pub url: String,
    /// The path portion of `url`, set during chain assembly and rebased
    /// alongside it.
    pub path: String,
    /// The query string without the leading `?`. Derived lazily from `url`
    /// unless already supplied upstream, in which case the upstream value
    /// wins and is never overwritten.
    pub query: Option<String>,
    /// The query string including the leading `?`. Same upstream-wins rule
    /// as `query`.
    pub search: Option<String>,
    /// Route parameters. Defaults to empty; on a route match the matched
    /// params overlay any pre-existing entries, and on a miss pre-existing
    /// entries are preserved unchanged.
    pub params: HashMap<String, String>,
    /// Typed per-request scratch storage for middleware.
    pub extensions: Extensions,
}

impl Request {
    /// Create a request for the given method and raw target URL.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            path: String::new(),
            query: None,
            search: None,
            params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }

    /// Look up a route parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Strip the first `prefix_len` bytes from `url` and `path`, substituting
    /// `/` when the remainder is empty. Used by the synthetic rebase handler
    /// at the head of every scoped-middleware list.
    pub fn rebase(&mut self, prefix_len: usize) {
        self.url = rebased(&self.url, prefix_len);
        self.path = rebased(&self.path, prefix_len);
    }
}

fn rebased(s: &str, prefix_len: usize) -> String {
    match s.get(prefix_len..) {
        Some("") | None => "/".to_string(),
        Some(rest) => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebase_strips_prefix_from_url_and_path() {
        let mut req = Request::new(Method::GET, "/assets/app.js?v=2");
        req.path = "/assets/app.js".to_string();
        req.rebase("/assets".len());
        assert_eq!(req.url, "/app.js?v=2");
        assert_eq!(req.path, "/app.js");
    }

    #[test]
    fn rebase_substitutes_root_for_empty_remainder() {
        let mut req = Request::new(Method::GET, "/assets");
        req.path = "/assets".to_string();
        req.rebase("/assets".len());
        assert_eq!(req.url, "/");
        assert_eq!(req.path, "/");
    }
}
