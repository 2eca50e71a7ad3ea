//! Per-request response accumulator.

use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

/// The response under construction for one request.
///
/// The `finalized` flag is the engine's termination signal: the execution
/// loop checks it before every handler invocation and at chain exhaustion,
/// and stops the instant it is set. Handlers after that point never run and
/// the terminal handler is not consulted.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    finalized: bool,
}

impl Response {
    /// Create an empty 200 response.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            finalized: false,
        }
    }

    /// Current status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Set the status code. Has no effect on finalization.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Insert a header, replacing any existing value for the name.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// The body written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body written so far, lossily decoded for assertions and logs.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether the response has been finalized.
    pub fn finalized(&self) -> bool {
        self.finalized
    }

    /// Finalize with a plain-text body.
    pub fn send_text(&mut self, body: impl Into<String>) {
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = body.into().into_bytes();
        self.finalized = true;
    }

    /// Finalize with a raw byte body, leaving headers untouched.
    pub fn send_bytes(&mut self, body: Vec<u8>) {
        self.body = body;
        self.finalized = true;
    }

    /// Finalize with whatever has been written so far.
    pub fn end(&mut self) {
        self.finalized = true;
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
