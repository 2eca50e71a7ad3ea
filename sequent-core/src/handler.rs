//! # Handler Layer
//!
//! The unit of work in a dispatch chain.
//!
//! Handlers receive the request/response pair by value and hand it back
//! through a [`Completion`], so ownership threads cleanly through the chain
//! with no shared mutable state. A handler that wants to do asynchronous
//! work returns `Completion::Pending` with a boxed future; everything else
//! completes synchronously via `Completion::Ready`.
//!
//! # Control Flow
//!
//! The [`Flow`] enum replaces the continuation-style `next(err)` callback of
//! classic middleware stacks with an explicit return value:
//!
//! - [`Flow::Proceed`] advances to the next chain entry.
//! - [`Flow::Skip`] is a distinguished control signal, not an error: it tells
//!   the engine to stop evaluating this router's own chain and defer to the
//!   enclosing context. At the top level (no enclosing router) it degrades to
//!   "no match".
//!
//! Errors are ordinary `Err(BoxError)` outcomes and are forwarded to the
//! router's [`TerminalHandler`].

use crate::error::BoxError;
use crate::request::Request;
use crate::response::Response;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Control signal returned by a handler that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance to the next entry in the chain.
    Proceed,
    /// Abandon the remainder of this chain and defer to the enclosing
    /// router. With no enclosing router, treated as "no match".
    Skip,
}

/// What a handler decided: advance, skip outward, or fail.
pub type Outcome = Result<Flow, BoxError>;

/// The result of invoking a handler: either a synchronous outcome or a
/// future that resolves to one.
///
/// This explicit union is what the engine's synchronous-iteration budget
/// keys on: `Ready` completions count against the budget, `Pending` ones
/// reset it (awaiting already yields to the scheduler).
pub enum Completion {
    /// The handler finished synchronously.
    Ready(Request, Response, Outcome),
    /// The handler suspended; the engine awaits this future.
    Pending(BoxFuture<'static, (Request, Response, Outcome)>),
}

/// A single unit in a dispatch chain: global middleware, scoped middleware,
/// and route endpoints all implement this one trait.
///
/// Handlers are stored as [`HandlerRef`] and are never mutated after
/// registration; any per-request state belongs in [`Request::extensions`]
/// or behind the handler's own synchronization.
pub trait Handler: Send + Sync + 'static {
    /// Process the request, returning the pair together with an [`Outcome`].
    fn call(&self, req: Request, res: Response) -> Completion;
}

/// Shared, immutable reference to a registered handler.
pub type HandlerRef = Arc<dyn Handler>;

/// The caller-supplied sink invoked when no route matches (`error = None`)
/// or when an unrecovered error reaches the end of the chain.
///
/// The terminal handler decides the actual status code and body; the engine
/// never retries after invoking it. An embedded router's terminal handler
/// runs before control returns to the parent chain, whose finalized-response
/// check prevents double handling.
pub trait TerminalHandler: Send + Sync + 'static {
    /// Consume the request with the given failure, if any.
    fn call(&self, error: Option<BoxError>, req: Request, res: Response) -> Completion;
}

struct SyncHandler<F>(F);

impl<F> Handler for SyncHandler<F>
where
    F: Fn(&mut Request, &mut Response) -> Outcome + Send + Sync + 'static,
{
    fn call(&self, mut req: Request, mut res: Response) -> Completion {
        let outcome = (self.0)(&mut req, &mut res);
        Completion::Ready(req, res, outcome)
    }
}

/// Wrap a synchronous closure as a [`HandlerRef`].
///
/// ```rust,ignore
/// let mw = sync_fn(|req, _res| {
///     req.params.insert("seen".into(), "yes".into());
///     Ok(Flow::Proceed)
/// });
/// ```
pub fn sync_fn<F>(f: F) -> HandlerRef
where
    F: Fn(&mut Request, &mut Response) -> Outcome + Send + Sync + 'static,
{
    Arc::new(SyncHandler(f))
}

struct FutureHandler<F>(F);

impl<F, Fut> Handler for FutureHandler<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (Request, Response, Outcome)> + Send + 'static,
{
    fn call(&self, req: Request, res: Response) -> Completion {
        Completion::Pending(Box::pin((self.0)(req, res)))
    }
}

/// Wrap an async closure as a [`HandlerRef`].
///
/// The closure takes the pair by value and returns it alongside the
/// [`Outcome`]:
///
/// ```rust,ignore
/// let endpoint = async_fn(|req, mut res| async move {
///     res.send_text("hello");
///     (req, res, Ok(Flow::Proceed))
/// });
/// ```
pub fn async_fn<F, Fut>(f: F) -> HandlerRef
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (Request, Response, Outcome)> + Send + 'static,
{
    Arc::new(FutureHandler(f))
}

struct SyncTerminal<F>(F);

impl<F> TerminalHandler for SyncTerminal<F>
where
    F: Fn(Option<BoxError>, &mut Request, &mut Response) + Send + Sync + 'static,
{
    fn call(&self, error: Option<BoxError>, mut req: Request, mut res: Response) -> Completion {
        (self.0)(error, &mut req, &mut res);
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}

/// Wrap a synchronous closure as a [`TerminalHandler`].
pub fn terminal_fn<F>(f: F) -> impl TerminalHandler
where
    F: Fn(Option<BoxError>, &mut Request, &mut Response) + Send + Sync + 'static,
{
    SyncTerminal(f)
}
