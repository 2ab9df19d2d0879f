//! Router core module - route registration and per-request matching.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::handler::{Handler, Middleware, SharedHandler};
use crate::params::Params;
use crate::path::{join, normalize};
use crate::request::Request;
use crate::tree::{RoutePattern, RouteTree};

/// Result of matching a path against a [`Router`]
pub struct RouteMatch<'r> {
    /// Handler registered for the matched route
    pub handler: &'r SharedHandler,
    /// Parameters bound by the match
    pub params: Params,
    /// Registered pattern of the matched route, e.g. `/v1/users/:id`
    pub pattern: RoutePattern<'r, SharedHandler>,
}

impl fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish()
    }
}

/// Routes under a common prefix plus the middleware wrapped around them
///
/// Build it at startup, then hand it to a [`Dispatcher`](crate::Dispatcher).
/// Once serving starts the router is only read, so matching from many
/// threads at once needs no locking.
pub struct Router {
    /// Prefix joined onto every route added to this router
    prefix: String,
    tree: RouteTree<SharedHandler>,
    /// Run before the handler, in registration order
    before: Vec<Middleware>,
    /// Run after the handler, in registration order
    after: Vec<Middleware>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("routes", &self.tree.routes())
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

impl Router {
    /// Create an empty router for `prefix`
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize(prefix),
            tree: RouteTree::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Register `handler` for `path` below this router's prefix.
    ///
    /// Registering the same path twice replaces the earlier handler.
    ///
    /// # Panics
    ///
    /// Panics if the path contains a parameter segment with no name (`:`).
    pub fn add<H>(&mut self, path: &str, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.add_shared(path, Arc::new(handler))
    }

    /// Register an already shared handler, e.g. one reused across routers
    ///
    /// # Panics
    ///
    /// See [`Router::add`].
    pub fn add_shared(&mut self, path: &str, handler: SharedHandler) -> &mut Self {
        let route = join(&self.prefix, path);
        if self.tree.insert(&route, handler).is_some() {
            warn!(
                prefix = %self.prefix,
                route = %route,
                "Replaced existing route handler"
            );
        } else {
            debug!(
                prefix = %self.prefix,
                route = %route,
                total_routes = self.tree.len(),
                "Route registered"
            );
        }
        self
    }

    /// Append middleware that runs before the matched handler
    pub fn add_before<H>(&mut self, middleware: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.before.push(Arc::new(middleware));
        self
    }

    /// Append middleware that runs after the matched handler
    pub fn add_after<H>(&mut self, middleware: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.after.push(Arc::new(middleware));
        self
    }

    /// Normalized prefix of this router
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Middleware run before the handler
    #[must_use]
    pub fn before(&self) -> &[Middleware] {
        &self.before
    }

    /// Middleware run after the handler
    #[must_use]
    pub fn after(&self) -> &[Middleware] {
        &self.after
    }

    /// Full patterns of every registered route
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.tree.routes()
    }

    /// Log the routing table at `info` level
    pub fn log_routes(&self) {
        info!(
            prefix = %self.prefix,
            routes_count = self.tree.len(),
            routes = ?self.tree.routes(),
            "Routing table loaded"
        );
    }

    /// Match `path` without touching any request
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - handler, bound parameters and pattern
    /// * `None` - nothing matches
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<'_>> {
        let found = self.tree.find(path)?;
        Some(RouteMatch {
            handler: found.value,
            params: found.params,
            pattern: self.tree.pattern(found.node),
        })
    }

    /// Match `req` and, on success, install the bound parameters into its
    /// extensions before returning the handler.
    ///
    /// A request that does not match is left untouched.
    pub fn match_request(&self, req: &mut Request) -> Option<&SharedHandler> {
        self.match_route(req).map(|(handler, _)| handler)
    }

    pub(crate) fn match_route(
        &self,
        req: &mut Request,
    ) -> Option<(&SharedHandler, RoutePattern<'_, SharedHandler>)> {
        let found = self.lookup(req.uri().path())?;
        req.extensions_mut().insert(found.params);
        Some((found.handler, found.pattern))
    }
}
