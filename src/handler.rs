//! The single capability shared by handlers and middleware.
//!
//! A route handler and a middleware entry are the same thing to the router:
//! something that can serve a request by writing to its response. What makes
//! one a middleware is only where it is registered (`add_before` /
//! `add_after`) and therefore when the dispatcher runs it.

use std::sync::Arc;

use crate::request::Request;
use crate::response::ResponseWriter;

/// Serves a request by writing to its response
///
/// Implemented for any `Fn(&mut Request, &mut ResponseWriter)` closure or
/// function that is `Send + Sync`, so plain functions register directly:
///
/// ```rust
/// use segrouter::{Request, ResponseWriter, Router};
///
/// fn hello(_req: &mut Request, res: &mut ResponseWriter) {
///     res.write_str("Hello test!");
/// }
///
/// let mut router = Router::new("/");
/// router.add("/", hello);
/// ```
///
/// Implementations run synchronously on the request's own thread and must
/// not assume anything about other requests being served concurrently.
pub trait Handler: Send + Sync {
    /// Handle `req`, writing status, headers and body to `res`.
    ///
    /// Matched path parameters and the request's cancellation context are
    /// reachable through [`RequestExt`](crate::RequestExt).
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter);
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync,
{
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) {
        self(req, res)
    }
}

/// Pin a closure to the handler signature.
///
/// Closures handed straight to `add` need their argument types spelled out;
/// wrapping them here lets the compiler infer them instead.
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync,
{
    f
}

/// Shared, type-erased handler as stored by routers and dispatchers
pub type SharedHandler = Arc<dyn Handler>;

/// Middleware is a handler registered around the route handler
pub type Middleware = SharedHandler;

/// Run `chain` in order, polling `cancelled` before each entry.
///
/// Returns `false` as soon as cancellation is observed; the remaining
/// entries are skipped.
pub(crate) fn run_chain(
    chain: &[SharedHandler],
    req: &mut Request,
    res: &mut ResponseWriter,
    cancelled: impl Fn(&Request) -> bool,
) -> bool {
    for entry in chain {
        if cancelled(req) {
            return false;
        }
        entry.serve(req, res);
    }
    true
}
