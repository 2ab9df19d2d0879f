//! # Dispatcher Module
//!
//! The dispatcher is the single entry point the host server calls for every
//! request. It owns an ordered list of [`Router`](crate::Router)s plus its own
//! before/after middleware, which run around every router.
//!
//! ## Request Flow
//!
//! 1. Routers are tried in registration order; the first match wins
//! 2. Dispatcher `before` middleware
//! 3. Cancellation check
//! 4. Router `before` middleware
//! 5. The matched handler, exactly once
//! 6. Router `after` middleware
//! 7. Dispatcher `after` middleware
//!
//! Every stage runs synchronously on the calling thread. The request's
//! [`RequestContext`](crate::RequestContext) is polled before each
//! middleware entry and before the handler; once it is cancelled or expired
//! nothing further runs. Code that is already running is never interrupted,
//! and whatever it wrote to the response stays there.
//!
//! A request no router matches produces [`DispatchOutcome::NotFound`]
//! without running any middleware. The host decides how to answer it;
//! [`Dispatcher::respond`] maps it to an empty `404`.
//!
//! ## Sharing
//!
//! Build the dispatcher before serving, then share it behind an `Arc`.
//! Matching only reads the route trees and keeps parameter bindings local to
//! each request, so concurrent dispatches never see each other's state.

mod core;

pub use self::core::{DispatchOutcome, Dispatcher};
