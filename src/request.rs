//! Request-side types: the request alias, its cancellation context and the
//! lookup helpers handlers use to reach matched parameters.
//!
//! The router keeps per-request state in [`http::Extensions`]: the host
//! server inserts a [`RequestContext`] carrying the request's cancellation
//! signal, and a successful match inserts the [`Params`] it bound.

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::params::{ParamError, Params};

/// Request type routed by this crate
pub type Request = http::Request<Vec<u8>>;

/// Why a request context is no longer live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The request was cancelled explicitly (e.g. the client went away)
    Cancelled,
    /// The request's deadline passed
    DeadlineExceeded,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Cancelled => f.write_str("request context cancelled"),
            ContextError::DeadlineExceeded => f.write_str("request deadline exceeded"),
        }
    }
}

impl StdError for ContextError {}

/// Cancellation signal attached to a request by the host server
///
/// Clones share the same token, so the host can keep one handle and cancel
/// the request from elsewhere while the dispatcher polls another.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A live context with no deadline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing token
    #[must_use]
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Expire the context at `deadline`
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Expire the context `timeout` from now.
    ///
    /// A timeout too large to represent as an [`Instant`] sets no deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Cancel the request. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The underlying cancellation token
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if any
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `Some` once the context is cancelled or past its deadline
    #[must_use]
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// True once the context is cancelled or expired
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }
}

/// Router helpers on [`http::Request`]
pub trait RequestExt {
    /// Parameters bound by the matching route, if the request was matched
    fn params(&self) -> Option<&Params>;

    /// The request's cancellation context, if the host attached one
    fn context(&self) -> Option<&RequestContext>;

    /// Look up a bound path parameter
    fn param(&self, name: &str) -> Option<&str> {
        self.params().and_then(|p| p.get(name))
    }

    /// Parse a bound path parameter
    ///
    /// # Errors
    ///
    /// [`ParamError::Missing`] when the name is unbound (or the request was
    /// never matched), [`ParamError::Parse`] when the value does not parse.
    fn param_as<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        match self.params() {
            Some(params) => params.get_parsed(name),
            None => Err(ParamError::Missing {
                name: name.to_string(),
            }),
        }
    }

    /// True once the request's context is cancelled or expired.
    /// A request without a context is never cancelled.
    fn is_cancelled(&self) -> bool {
        self.context().is_some_and(RequestContext::is_done)
    }
}

impl<B> RequestExt for http::Request<B> {
    fn params(&self) -> Option<&Params> {
        self.extensions().get::<Params>()
    }

    fn context(&self) -> Option<&RequestContext> {
        self.extensions().get::<RequestContext>()
    }
}
