//! Dispatcher core module - hot path for request dispatch.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::StatusCode;
use tracing::{debug, debug_span, warn};

use crate::handler::{run_chain, Handler, Middleware};
use crate::request::{Request, RequestContext, RequestExt};
use crate::response::ResponseWriter;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;

/// How a dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A route matched and every stage ran
    Handled,
    /// No router matched; nothing ran
    NotFound,
    /// The request context was cancelled or expired part way through
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    DispatcherBefore,
    RouterBefore,
    Handler,
    RouterAfter,
    DispatcherAfter,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::DispatcherBefore => "dispatcher_before",
            Stage::RouterBefore => "router_before",
            Stage::Handler => "handler",
            Stage::RouterAfter => "router_after",
            Stage::DispatcherAfter => "dispatcher_after",
        }
    }
}

/// Entry point composing several routers and global middleware
pub struct Dispatcher {
    /// Tried in registration order; first match wins
    routers: Vec<Router>,
    /// Run before every matched request, ahead of router middleware
    before: Vec<Middleware>,
    /// Run after every matched request, behind router middleware
    after: Vec<Middleware>,
    slow_match_threshold: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routers", &self.routers)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("slow_match_threshold", &self.slow_match_threshold)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with no routers and default runtime settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::default())
    }

    /// Create a dispatcher with no routers
    #[must_use]
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Dispatcher {
            routers: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            slow_match_threshold: config.slow_match_threshold,
        }
    }

    /// Create a dispatcher over `routers`, keeping their order
    #[must_use]
    pub fn build(routers: impl IntoIterator<Item = Router>) -> Self {
        Self::build_with_config(routers, &RuntimeConfig::default())
    }

    /// Like [`Dispatcher::build`], with settings from `config`
    #[must_use]
    pub fn build_with_config(
        routers: impl IntoIterator<Item = Router>,
        config: &RuntimeConfig,
    ) -> Self {
        let mut dispatcher = Self::with_config(config);
        for router in routers {
            dispatcher.add(router);
        }
        dispatcher
    }

    /// Append a router; it is tried after every router added before it
    pub fn add(&mut self, router: Router) -> &mut Self {
        debug!(
            prefix = %router.prefix(),
            routes_count = router.routes().len(),
            position = self.routers.len(),
            "Router added to dispatcher"
        );
        self.routers.push(router);
        self
    }

    /// Append middleware that runs before every matched request
    pub fn add_before<H>(&mut self, middleware: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.before.push(Arc::new(middleware));
        self
    }

    /// Append middleware that runs after every matched request
    pub fn add_after<H>(&mut self, middleware: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.after.push(Arc::new(middleware));
        self
    }

    /// Routers in matching order
    #[must_use]
    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    /// Settings this dispatcher was built with
    #[must_use]
    pub fn config(&self) -> RuntimeConfig {
        RuntimeConfig {
            slow_match_threshold: self.slow_match_threshold,
        }
    }

    #[must_use]
    pub fn before(&self) -> &[Middleware] {
        &self.before
    }

    #[must_use]
    pub fn after(&self) -> &[Middleware] {
        &self.after
    }

    /// Route and serve one request.
    ///
    /// Side effects are the writes made to `res` by whatever ran, and the
    /// matched parameters installed into `req`. Use [`Dispatcher::dispatch`]
    /// to learn how the request ended.
    pub fn serve(&self, req: &mut Request, res: &mut ResponseWriter) {
        let _outcome = self.dispatch(req, res);
    }

    /// Route and serve one request, reporting the outcome
    #[must_use]
    pub fn dispatch(&self, req: &mut Request, res: &mut ResponseWriter) -> DispatchOutcome {
        let span = debug_span!("dispatch", path = %req.uri().path());
        let _enter = span.enter();

        let match_start = Instant::now();
        let mut matched = None;
        for router in &self.routers {
            if let Some((handler, pattern)) = router.match_route(req) {
                matched = Some((router, handler, pattern));
                break;
            }
        }
        let match_duration = match_start.elapsed();

        let Some((router, handler, pattern)) = matched else {
            debug!(
                routers = self.routers.len(),
                duration_us = match_duration.as_micros() as u64,
                "No route matched"
            );
            return DispatchOutcome::NotFound;
        };

        if match_duration > self.slow_match_threshold {
            warn!(
                prefix = %router.prefix(),
                route_pattern = %pattern,
                duration_us = match_duration.as_micros() as u64,
                "Slow route matching detected"
            );
        } else {
            debug!(
                prefix = %router.prefix(),
                route_pattern = %pattern,
                path_params = ?req.params(),
                duration_us = match_duration.as_micros() as u64,
                "Route matched"
            );
        }

        if !run_stage(Stage::DispatcherBefore, &self.before, req, res)
            || is_cancelled(Stage::RouterBefore, req)
            || !run_stage(Stage::RouterBefore, router.before(), req, res)
            || is_cancelled(Stage::Handler, req)
        {
            return DispatchOutcome::Cancelled;
        }

        handler.serve(req, res);

        if !run_stage(Stage::RouterAfter, router.after(), req, res)
            || !run_stage(Stage::DispatcherAfter, &self.after, req, res)
        {
            return DispatchOutcome::Cancelled;
        }

        DispatchOutcome::Handled
    }

    /// Dispatch an owned request and build the response for it.
    ///
    /// Unmatched requests get an empty `404 Not Found`; everything else is
    /// returned as the handlers and middleware left it.
    #[must_use]
    pub fn respond(&self, mut req: Request) -> http::Response<Vec<u8>> {
        let mut res = ResponseWriter::new();
        if self.dispatch(&mut req, &mut res) == DispatchOutcome::NotFound {
            res.set_status(StatusCode::NOT_FOUND);
        }
        res.into_response()
    }
}

/// A dispatcher can itself be mounted as a handler, e.g. under another
/// router's wildcard route.
impl Handler for Dispatcher {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) {
        Dispatcher::serve(self, req, res);
    }
}

fn run_stage(
    stage: Stage,
    chain: &[Middleware],
    req: &mut Request,
    res: &mut ResponseWriter,
) -> bool {
    run_chain(chain, req, res, |req| is_cancelled(stage, req))
}

fn is_cancelled(stage: Stage, req: &Request) -> bool {
    match req.context().and_then(RequestContext::err) {
        Some(reason) => {
            debug!(
                stage = stage.as_str(),
                reason = %reason,
                "Request cancelled, skipping remaining stages"
            );
            true
        }
        None => false,
    }
}
