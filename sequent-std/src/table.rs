//! Matchit-backed route table.
//!
//! The dispatch engine treats route resolution as an external collaborator
//! with an opaque `find(method, path)` contract; this module is the standard
//! adapter satisfying it. One `matchit::Router` per HTTP method, with
//! Express-style `:name` / trailing `*` patterns converted to matchit syntax
//! at registration time.

use http::Method;
use sequent_core::{ConfigError, HandlerRef};
use std::collections::HashMap;

/// The result of resolving a request against the table.
pub struct RouteMatch {
    /// Parameters captured from the matched path pattern.
    pub params: HashMap<String, String>,
    /// The handlers registered for the matched route, in declaration order.
    pub handlers: Vec<HandlerRef>,
}

/// Method + path → ordered handler list, resolved via matchit.
///
/// Entries are registered during single-threaded setup and immutable for
/// the remainder of the process. Duplicate registration of the same method
/// and path is a configuration error raised here, at registration time.
#[derive(Default)]
pub struct RouteTable {
    methods: HashMap<Method, matchit::Router<Vec<HandlerRef>>>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handlers` for the given method and path pattern.
    ///
    /// Patterns accept `:name` segments and a trailing `*` catch-all in
    /// addition to native matchit `{name}` syntax.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        handlers: Vec<HandlerRef>,
    ) -> Result<(), ConfigError> {
        let pattern = to_matchit_pattern(path);
        let router = self
            .methods
            .entry(method.clone())
            .or_insert_with(matchit::Router::new);
        router.insert(pattern, handlers).map_err(|e| match e {
            matchit::InsertError::Conflict { .. } => ConfigError::DuplicateRoute {
                method,
                path: path.to_string(),
            },
            other => ConfigError::InvalidPattern {
                path: path.to_string(),
                reason: other.to_string(),
            },
        })
    }

    /// Resolve a request to its params and handlers, or `None` on a miss.
    ///
    /// The HEAD→GET fallback is the engine's concern, not the table's: this
    /// lookup consults exactly the method it is given.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let router = self.methods.get(method)?;
        match router.at(path) {
            Ok(m) => Some(RouteMatch {
                params: m
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                handlers: m.value.clone(),
            }),
            Err(_) => None,
        }
    }
}

/// Convert `:name` segments and a bare `*` catch-all segment to matchit's
/// `{name}` / `{*splat}` syntax. Segments already in matchit syntax pass
/// through untouched.
fn to_matchit_pattern(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                format!("{{{name}}}")
            } else if segment == "*" {
                "{*splat}".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
