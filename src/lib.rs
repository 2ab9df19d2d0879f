//! # segrouter
//!
//! **segrouter** is a segment-tree HTTP request router with prefix groups,
//! before/after middleware chains and a multi-router dispatcher.
//!
//! ## Overview
//!
//! Routes are registered as slash-separated patterns. Each segment is either
//! a literal (`users`), a named parameter (`:id`) or a trailing wildcard
//! (`*`). Matching walks the tree one segment at a time, preferring literal
//! children over parameters and parameters over the wildcard, and backtracks
//! when a preferred branch dead-ends.
//!
//! ## Architecture
//!
//! - **[`path`]** - Path splitting and normalization
//! - **[`tree`]** - The segment tree shared by all routers
//! - **[`router`]** - Prefix groups with their own middleware
//! - **[`dispatcher`]** - Ordered router composition and the request pipeline
//! - **[`params`]** - Bound path parameters and typed accessors
//! - **[`request`]** - Request type, per-request context and cancellation
//! - **[`response`]** - Buffered response writer
//! - **[`handler`]** - The handler/middleware capability
//! - **[`runtime_config`]** - Environment-driven tuning
//! - **[`logging`]** - Optional `tracing` subscriber setup
//!
//! ## Request Handling Flow
//!
//! ```text
//! host server
//!   └─ Dispatcher::dispatch
//!        ├─ routers tried in order, first match wins
//!        ├─ dispatcher before middleware
//!        ├─ router before middleware
//!        ├─ handler
//!        ├─ router after middleware
//!        └─ dispatcher after middleware
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use segrouter::{DispatchOutcome, Dispatcher, Request, RequestExt, ResponseWriter, Router};
//!
//! fn get_user(req: &mut Request, res: &mut ResponseWriter) {
//!     let id: u64 = req.param_as("id").unwrap_or_default();
//!     res.write_str(&format!("user {id}"));
//! }
//!
//! fn log_request(_req: &mut Request, res: &mut ResponseWriter) {
//!     res.write_str("> ");
//! }
//!
//! let mut v1 = Router::new("/v1");
//! v1.add("/users/:id", get_user).add_before(log_request);
//!
//! let dispatcher = Dispatcher::build([v1]);
//!
//! let mut req = http::Request::builder()
//!     .uri("/v1/users/42")
//!     .body(Vec::new())
//!     .unwrap();
//! let mut res = ResponseWriter::new();
//! assert_eq!(dispatcher.dispatch(&mut req, &mut res), DispatchOutcome::Handled);
//! assert_eq!(res.body_text(), "> user 42");
//! ```

pub mod dispatcher;
pub mod handler;
pub mod logging;
pub mod params;
pub mod path;
pub mod request;
pub mod response;
pub mod router;
pub mod runtime_config;
pub mod tree;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use handler::{handler_fn, Handler, Middleware, SharedHandler};
pub use params::{ParamError, Params};
pub use request::{ContextError, Request, RequestContext, RequestExt};
pub use response::ResponseWriter;
pub use router::{RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
pub use tree::RouteTree;
