//! Error types for sequent.
//!
//! Configuration errors are raised synchronously at registration time and
//! are never recoverable at request time. Handler-level failures travel as
//! plain [`BoxError`] values through the execution loop instead.

use http::Method;
use thiserror::Error;

/// A boxed error type for handler failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while configuring a router, before any request is served.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A route for this method and path (or one that conflicts with it) has
    /// already been registered.
    #[error("route already registered for {method} {path}")]
    DuplicateRoute {
        /// The HTTP method of the offending registration.
        method: Method,
        /// The path pattern of the offending registration.
        path: String,
    },

    /// The path pattern could not be compiled by the route table.
    #[error("invalid route pattern {path}: {reason}")]
    InvalidPattern {
        /// The rejected path pattern.
        path: String,
        /// What the route table objected to.
        reason: String,
    },
}
