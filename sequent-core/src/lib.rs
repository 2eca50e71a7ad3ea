//! # sequent-core
//!
//! Core traits and types for the sequent request-dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! middleware and handler crates that don't need the full `sequent-std`
//! implementations.
//!
//! # Execution Model
//!
//! A request travels through an ordered chain of [`Handler`]s. Each handler
//! takes ownership of the [`Request`] / [`Response`] pair and returns a
//! [`Completion`]: either a synchronous result or a future that yields one.
//! The [`Outcome`] inside a completion tells the engine what to do next:
//!
//! - `Ok(Flow::Proceed)` — advance to the next chain entry
//! - `Ok(Flow::Skip)` — abandon this chain and defer to the enclosing router
//! - `Err(e)` — forward the error to the [`TerminalHandler`]
//!
//! Finalizing the response ([`Response::end`] and friends) terminates the
//! chain without involving the terminal handler.

#![warn(missing_docs)]

mod error;
mod handler;
mod request;
mod response;
mod target;

pub use error::{BoxError, ConfigError};
pub use handler::{
    Completion, Flow, Handler, HandlerRef, Outcome, TerminalHandler, async_fn, sync_fn,
    terminal_fn,
};
pub use request::Request;
pub use response::Response;
pub use target::{Target, ensure_leading_slash, first_segment, parse_target};
