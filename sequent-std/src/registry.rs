//! Middleware registry.
//!
//! Two collections built during setup and read-only afterwards: a global
//! ordered list applied to every request, and per-prefix lists applied when
//! the request's first path segment matches the prefix. The first entry of
//! every scoped list is a synthetic rebase handler that strips the prefix
//! from the request before the user-supplied handlers run.

use sequent_core::{Completion, Flow, Handler, HandlerRef, Request, Response, ensure_leading_slash};
use std::collections::HashMap;
use std::sync::Arc;

/// Synthetic first handler of a scoped list. Rewrites the request's URL and
/// path relative to the mount prefix, then unconditionally proceeds; it
/// never finalizes the response and never errors.
struct RebaseHandler {
    prefix_len: usize,
}

impl Handler for RebaseHandler {
    fn call(&self, mut req: Request, res: Response) -> Completion {
        req.rebase(self.prefix_len);
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}

/// Global and path-scoped middleware lists.
///
/// Registration happens during single-threaded setup; the dispatch engine
/// only ever reads. Scoped lists are keyed by the literal normalized prefix,
/// and the engine looks them up by the request's first path segment, so
/// callers are expected to register whole first-segment prefixes (documented
/// constraint, not enforced).
#[derive(Default)]
pub struct MiddlewareRegistry {
    global: Vec<HandlerRef>,
    scoped: HashMap<String, Vec<HandlerRef>>,
}

impl MiddlewareRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append handlers to the global list, preserving call order across
    /// invocations. `None` entries are skipped, which lets call sites
    /// register conditionally without branching.
    pub fn register_global<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        self.global.extend(handlers.into_iter().flatten());
    }

    /// Append handlers to the list for `prefix`, normalizing it to start
    /// with `/`. A prefix of `/` behaves as [`register_global`]. On first
    /// use of a prefix the rebase handler is inserted ahead of the supplied
    /// handlers, exactly once; later calls for the same prefix accumulate
    /// after the existing entries.
    ///
    /// [`register_global`]: MiddlewareRegistry::register_global
    pub fn register_scoped<I>(&mut self, prefix: &str, handlers: I)
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        if prefix == "/" {
            self.register_global(handlers);
            return;
        }
        let filtered: Vec<HandlerRef> = handlers.into_iter().flatten().collect();
        if filtered.is_empty() {
            return;
        }
        let prefix = ensure_leading_slash(prefix);
        let prefix_len = prefix.len();
        let list = self.scoped.entry(prefix).or_insert_with(|| {
            vec![Arc::new(RebaseHandler { prefix_len }) as HandlerRef]
        });
        list.extend(filtered);
    }

    /// The global list.
    pub fn global(&self) -> &[HandlerRef] {
        &self.global
    }

    /// The scoped list whose prefix equals `segment`, if any.
    pub fn scoped(&self, segment: &str) -> Option<&[HandlerRef]> {
        self.scoped.get(segment).map(Vec::as_slice)
    }
}
