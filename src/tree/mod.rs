//! # Route Tree
//!
//! A prefix tree over path segments. Every node stands for one `/`-delimited
//! segment of a registered route and is one of:
//!
//! - **static**: literal text, matched exactly (`users`)
//! - **parameter**: `:name`, matches any single segment and binds it
//! - **wildcard**: `*`, matches all remaining segments and ends the branch
//!
//! ## Match precedence
//!
//! At every level the tree tries static children first, then parameter
//! children in registration order, then the wildcard. The walk is
//! depth-first with backtracking: a static branch that fails further down
//! falls back to the parameter branches of the same level.
//!
//! ```text
//! /users/admin      -> static wins
//! /users/:id        -> used for any other /users/<x>
//! /files/*          -> /files/a/b/c
//! ```
//!
//! Parameter bindings are collected in a store local to the lookup and only
//! handed back once a terminal handler is reached, so concurrent lookups on a
//! shared tree never observe each other's bindings.
//!
//! Nodes live in an arena and refer to each other by index; the parent index
//! is only used to render a node's full pattern for diagnostics.

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{Match, NodeId, RoutePattern, RouteTree, PARAM_SIGIL, WILDCARD};
