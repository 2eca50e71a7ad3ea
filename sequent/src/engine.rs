//! The dispatch engine: chain assembly and the execution loop.
//!
//! # Chain assembly
//!
//! For each request the engine parses the raw URL, resolves the route, and
//! concatenates `global middleware ++ scoped middleware ++ route handlers`
//! into one fixed-length chain. The category order is decided here, at
//! dispatch time, which is why registration order across categories is
//! irrelevant: a route declared before its middleware still runs after it.
//!
//! # Execution loop
//!
//! The chain is executed iteratively, one handler at a time, never
//! concurrently, even across suspension points. Before every invocation the
//! loop checks whether the response was finalized; once it is, remaining
//! handlers never run and the terminal handler is not consulted.
//!
//! An unbroken run of synchronous completions is bounded by a budget of
//! [`SYNC_ITERATION_LIMIT`]: when exceeded, the loop yields to the scheduler
//! once before continuing. This only breaks up long executor turns; ordering
//! is unaffected.

use crate::router::Router;
use http::Method;
use sequent_core::{
    BoxError, Completion, Flow, Outcome, Request, Response, first_segment, parse_target,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, error};

/// How many consecutive synchronous handler completions run within one
/// executor turn before the loop yields.
pub const SYNC_ITERATION_LIMIT: u32 = 100;

impl Router {
    /// Run the full dispatch for one request: assemble the chain, execute
    /// it, and fall back to the terminal handler on a miss or an error.
    /// Returns the pair once the chain has terminated.
    pub async fn dispatch(&self, req: Request, res: Response) -> (Request, Response) {
        let (req, res, _outcome) = self.drive(req, res, false).await;
        (req, res)
    }

    /// The dispatch state machine. `embedded` is true when this router runs
    /// as a handler inside a parent chain; skip and exhaustion then defer to
    /// the parent instead of invoking the terminal handler.
    pub(crate) async fn drive(
        &self,
        mut req: Request,
        mut res: Response,
        embedded: bool,
    ) -> (Request, Response, Outcome) {
        let target = parse_target(&req.url);
        req.path = target.path;
        // Upstream-supplied query/search win over the parsed values.
        if req.search.is_none() {
            req.search = target.search;
        }
        if req.query.is_none() {
            req.query = target.query;
        }

        let segment = first_segment(&req.path).to_string();

        let mut matched = self.table.find(&req.method, &req.path);
        if matched.is_none() && req.method == Method::HEAD {
            matched = self.table.find(&Method::GET, &req.path);
        }

        let route_handlers = match matched {
            Some(m) => {
                // Route params overlay any pre-existing entries.
                for (k, v) in m.params {
                    req.params.insert(k, v);
                }
                m.handlers
            }
            None => Vec::new(),
        };

        let global = self.middleware.global();
        let scoped = self.middleware.scoped(&segment).unwrap_or(&[]);

        debug!(
            method = %req.method,
            path = %req.path,
            global = global.len(),
            scoped = scoped.len(),
            route = route_handlers.len(),
            embedded,
            "chain assembled"
        );

        let mut chain = Vec::with_capacity(global.len() + scoped.len() + route_handlers.len());
        chain.extend_from_slice(global);
        chain.extend_from_slice(scoped);
        chain.extend(route_handlers);

        let mut index = 0usize;
        let mut sync_budget = 0u32;

        while index < chain.len() {
            if res.finalized() {
                return (req, res, Ok(Flow::Proceed));
            }

            let handler = Arc::clone(&chain[index]);
            index += 1;

            let (r, s, outcome) = match handler.call(req, res) {
                Completion::Ready(r, s, outcome) => {
                    sync_budget += 1;
                    if sync_budget > SYNC_ITERATION_LIMIT {
                        sync_budget = 0;
                        yield_now().await;
                    }
                    (r, s, outcome)
                }
                Completion::Pending(fut) => {
                    sync_budget = 0;
                    fut.await
                }
            };
            req = r;
            res = s;

            match outcome {
                Ok(Flow::Proceed) => {}
                Ok(Flow::Skip) => {
                    if embedded {
                        // Hand control back to the parent chain, which
                        // resumes at its own next entry.
                        debug!(path = %req.path, "skip: deferring to parent chain");
                        return (req, res, Ok(Flow::Proceed));
                    }
                    // No enclosing router: a top-level skip degrades to
                    // "no match" and lands in the terminal handler.
                    debug!(path = %req.path, "skip at top level, treating as no match");
                    index = chain.len();
                }
                Err(err) => return self.finish(Some(err), req, res).await,
            }
        }

        if res.finalized() || embedded {
            return (req, res, Ok(Flow::Proceed));
        }
        self.finish(None, req, res).await
    }

    /// Invoke the terminal handler exactly once and normalize its result.
    /// This is final: the engine never retries a failed handler, and a
    /// failing terminal handler is only logged.
    async fn finish(
        &self,
        err: Option<BoxError>,
        req: Request,
        res: Response,
    ) -> (Request, Response, Outcome) {
        let (req, res, outcome) = match self.terminal.call(err, req, res) {
            Completion::Ready(req, res, outcome) => (req, res, outcome),
            Completion::Pending(fut) => fut.await,
        };
        if let Err(terminal_err) = outcome {
            error!(error = %terminal_err, "terminal handler failed");
        }
        (req, res, Ok(Flow::Proceed))
    }
}

/// Yield to the scheduler once: pending on the first poll, ready on the
/// next. Keeps the engine runtime-agnostic.
fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
