//! Testing utilities for sequent.
//!
//! Small handlers with observable side effects, for asserting chain order
//! and failure propagation without a transport layer:
//!
//! - [`RecordingHandler`]: appends its name to a shared log, then proceeds
//! - [`CountingHandler`]: counts invocations, then proceeds
//! - [`EndHandler`]: finalizes the response with a fixed body
//! - [`FailingHandler`]: always returns an error outcome
//! - [`SkipHandler`]: always returns the skip signal
//! - [`StatusTerminal`]: a terminal handler mapping errors to 500 and
//!   no-match to 404

use sequent_core::{
    BoxError, Completion, Flow, Handler, HandlerRef, Request, Response, TerminalHandler,
};
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A handler that records its name into a shared log and proceeds.
pub struct RecordingHandler {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandler {
    /// Create a recording handler writing `name` into `log` on every call.
    pub fn new(name: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> HandlerRef {
        Arc::new(Self {
            name: name.into(),
            log,
        })
    }
}

impl Handler for RecordingHandler {
    fn call(&self, req: Request, res: Response) -> Completion {
        self.log.lock().unwrap().push(self.name.clone());
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}

/// A handler that counts invocations and proceeds.
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a counting handler incrementing `count` on every call.
    pub fn new(count: Arc<AtomicUsize>) -> HandlerRef {
        Arc::new(Self { count })
    }
}

impl Handler for CountingHandler {
    fn call(&self, req: Request, res: Response) -> Completion {
        self.count.fetch_add(1, Ordering::SeqCst);
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}

/// A handler that finalizes the response with a fixed text body.
pub struct EndHandler {
    body: String,
}

impl EndHandler {
    /// Create a handler sending `body` and finalizing the response.
    pub fn new(body: impl Into<String>) -> HandlerRef {
        Arc::new(Self { body: body.into() })
    }
}

impl Handler for EndHandler {
    fn call(&self, req: Request, mut res: Response) -> Completion {
        res.send_text(self.body.clone());
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}

/// A handler that always fails with the given message.
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> HandlerRef {
        Arc::new(Self {
            message: message.into(),
        })
    }
}

impl Handler for FailingHandler {
    fn call(&self, req: Request, res: Response) -> Completion {
        let err: BoxError = self.message.clone().into();
        Completion::Ready(req, res, Err(err))
    }
}

/// A handler that always signals skip.
pub struct SkipHandler;

impl SkipHandler {
    /// Create a skip handler.
    pub fn new() -> HandlerRef {
        Arc::new(Self)
    }
}

impl Handler for SkipHandler {
    fn call(&self, req: Request, res: Response) -> Completion {
        Completion::Ready(req, res, Ok(Flow::Skip))
    }
}

/// A terminal handler mapping handler errors to a 500 response carrying the
/// error's message, and no-match to a 404 with a fixed body.
pub struct StatusTerminal;

impl TerminalHandler for StatusTerminal {
    fn call(&self, error: Option<BoxError>, req: Request, mut res: Response) -> Completion {
        match error {
            Some(err) => {
                res.set_status(StatusCode::INTERNAL_SERVER_ERROR);
                res.send_text(err.to_string());
            }
            None => {
                res.set_status(StatusCode::NOT_FOUND);
                res.send_text("Not Found");
            }
        }
        Completion::Ready(req, res, Ok(Flow::Proceed))
    }
}
