//! Router construction and registration surface.

use http::Method;
use sequent_core::{Completion, ConfigError, Handler, HandlerRef, Request, Response, TerminalHandler};
use sequent_std::registry::MiddlewareRegistry;
use sequent_std::table::RouteTable;
use std::sync::Arc;

/// Every verb `all` registers under.
pub(crate) const HTTP_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
    Method::TRACE,
    Method::CONNECT,
];

/// The request-dispatch engine.
///
/// A router composes three handler categories into one chain per request:
/// global middleware, path-scoped middleware, and route handlers, always in
/// that order regardless of registration order. Registration runs during
/// single-threaded setup; afterwards the router is shared immutably and
/// [`dispatch`] is invoked once per request.
///
/// The terminal handler is supplied at construction, so a router without
/// one cannot exist.
///
/// ```rust,ignore
/// let mut router = Router::new(StatusTerminal);
/// router.get("/greetings/:name", [Some(greet)])?;
/// router.middleware([Some(logger)]);
///
/// let (req, res) = router.dispatch(req, res).await;
/// ```
///
/// [`dispatch`]: Router::dispatch
pub struct Router {
    pub(crate) table: RouteTable,
    pub(crate) middleware: MiddlewareRegistry,
    pub(crate) terminal: Arc<dyn TerminalHandler>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl Router {
    /// Create a router with the given terminal handler.
    pub fn new<T: TerminalHandler>(terminal: T) -> Self {
        Self {
            table: RouteTable::new(),
            middleware: MiddlewareRegistry::new(),
            terminal: Arc::new(terminal),
        }
    }

    /// Register global middleware, applied to every request ahead of any
    /// scoped middleware or route handlers. `None` entries are skipped.
    pub fn middleware<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        self.middleware.register_global(handlers);
        self
    }

    /// Register middleware under a path prefix, applied when the request's
    /// first path segment equals the prefix. A prefix of `/` behaves as
    /// [`middleware`]. The prefix is stripped from the request before the
    /// supplied handlers run.
    ///
    /// [`middleware`]: Router::middleware
    pub fn middleware_at<I>(&mut self, prefix: &str, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        self.middleware.register_scoped(prefix, handlers);
        self
    }

    /// Register a route. Registering the same method and path twice is a
    /// [`ConfigError::DuplicateRoute`]; an empty (post-filter) handler list
    /// is a no-op.
    pub fn route<I>(&mut self, method: Method, path: &str, handlers: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        let fns: Vec<HandlerRef> = handlers.into_iter().flatten().collect();
        if fns.is_empty() {
            return Ok(self);
        }
        self.table.register(method, path, fns)?;
        Ok(self)
    }

    /// Register a route under every HTTP method.
    pub fn all<I>(&mut self, path: &str, handlers: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = Option<HandlerRef>>,
    {
        let fns: Vec<HandlerRef> = handlers.into_iter().flatten().collect();
        if fns.is_empty() {
            return Ok(self);
        }
        for method in HTTP_METHODS {
            self.table.register(method, path, fns.clone())?;
        }
        Ok(self)
    }

    /// Turn this router into a handler, so it can run embedded in another
    /// router's chain (typically mounted via [`middleware_at`]). When the
    /// embedded router finds no match, or one of its handlers signals skip,
    /// control falls through to the parent chain's next entry.
    ///
    /// [`middleware_at`]: Router::middleware_at
    pub fn into_handler(self) -> HandlerRef {
        Arc::new(EmbeddedRouter {
            inner: Arc::new(self),
        })
    }
}

macro_rules! verb {
    ($(#[$doc:meta] $name:ident => $method:ident),* $(,)?) => {
        impl Router {
            $(
                #[$doc]
                pub fn $name<I>(&mut self, path: &str, handlers: I) -> Result<&mut Self, ConfigError>
                where
                    I: IntoIterator<Item = Option<HandlerRef>>,
                {
                    self.route(Method::$method, path, handlers)
                }
            )*
        }
    };
}

verb! {
    /// Register a `GET` route.
    get => GET,
    /// Register a `POST` route.
    post => POST,
    /// Register a `PUT` route.
    put => PUT,
    /// Register a `PATCH` route.
    patch => PATCH,
    /// Register a `DELETE` route.
    delete => DELETE,
    /// Register a `HEAD` route.
    head => HEAD,
    /// Register an `OPTIONS` route.
    options => OPTIONS,
    /// Register a `TRACE` route.
    trace => TRACE,
    /// Register a `CONNECT` route.
    connect => CONNECT,
}

/// A router mounted inside a parent chain.
struct EmbeddedRouter {
    inner: Arc<Router>,
}

impl Handler for EmbeddedRouter {
    fn call(&self, req: Request, res: Response) -> Completion {
        let inner = Arc::clone(&self.inner);
        Completion::Pending(Box::pin(async move { inner.drive(req, res, true).await }))
    }
}
