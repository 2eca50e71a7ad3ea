//! # sequent-std
//!
//! Standard implementations for the sequent request-dispatch engine.
//!
//! This crate provides:
//! - **Route resolution**: [`RouteTable`], a matchit-backed adapter behind
//!   the engine's opaque `find(method, path)` contract
//! - **Middleware storage**: [`MiddlewareRegistry`], the global and
//!   path-scoped handler lists with synthetic prefix rebasing
//! - **Testing utilities**: recording and failing handlers, a simple
//!   status-mapping terminal handler
//!
//! [`RouteTable`]: table::RouteTable
//! [`MiddlewareRegistry`]: registry::MiddlewareRegistry

#![warn(missing_docs)]

pub use sequent_core;

pub mod registry;
pub mod table;
pub mod testing;
