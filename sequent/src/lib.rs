//! # sequent - Layered Request Dispatch
//!
//! `sequent` composes three categories of handlers — global middleware,
//! path-scoped middleware, and route handlers — into one deterministic
//! execution chain per incoming request, and runs that chain to completion
//! or failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sequent::{Flow, Request, Response, Router, async_fn, sync_fn, terminal_fn};
//! use http::{Method, StatusCode};
//!
//! let mut router = Router::new(terminal_fn(|err, _req, res| match err {
//!     Some(e) => { res.set_status(StatusCode::INTERNAL_SERVER_ERROR); res.send_text(e.to_string()); }
//!     None => { res.set_status(StatusCode::NOT_FOUND); res.send_text("Not Found"); }
//! }));
//!
//! router.get("/greetings/:name", [Some(async_fn(|req, mut res| async move {
//!     let name = req.param("name").unwrap_or("stranger").to_string();
//!     res.send_text(format!("Hello, {name}"));
//!     (req, res, Ok(Flow::Proceed))
//! }))])?;
//!
//! let (_, res) = router
//!     .dispatch(Request::new(Method::GET, "/greetings/kiko"), Response::new())
//!     .await;
//! assert_eq!(res.body_text(), "Hello, kiko");
//! ```
//!
//! ## Chain order
//!
//! The chain for a request is always `global ++ scoped ++ route`, decided
//! at dispatch time — registration order across categories is irrelevant,
//! while order within a category is preserved.
//!
//! ## Nesting
//!
//! A router is itself usable as a handler ([`Router::into_handler`]) inside
//! another router's chain; on no-match or an explicit [`Flow::Skip`] it
//! falls through to the parent chain's next entry.

#![warn(missing_docs)]

mod engine;
mod router;

pub use engine::SYNC_ITERATION_LIMIT;
pub use router::Router;

pub use sequent_core::{
    BoxError, Completion, ConfigError, Flow, Handler, HandlerRef, Outcome, Request, Response,
    Target, TerminalHandler, async_fn, ensure_leading_slash, first_segment, parse_target, sync_fn,
    terminal_fn,
};

/// Route-table and middleware-registry implementations.
pub mod std_impl {
    pub use sequent_std::registry::MiddlewareRegistry;
    pub use sequent_std::table::{RouteMatch, RouteTable};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use sequent_std::testing::*;
}

/// Prelude module - common imports for sequent.
///
/// # Usage
///
/// ```rust,ignore
/// use sequent::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Completion, ConfigError, Flow, Handler, HandlerRef, Outcome, Request, Response,
        Router, TerminalHandler, async_fn, sync_fn, terminal_fn,
    };
}
