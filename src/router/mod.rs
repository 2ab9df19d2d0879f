//! # Router Module
//!
//! A [`Router`] binds a path prefix to a [route tree](crate::tree) and owns
//! the middleware that runs around every handler it matches.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Joining its prefix with each registered route path
//! - Matching incoming request paths against its tree
//! - Installing the bound [`Params`](crate::Params) into the request
//! - Holding its before/after middleware in registration order
//!
//! One router usually covers one logical API surface, such as a versioned
//! group of endpoints; several of them are composed by a
//! [`Dispatcher`](crate::Dispatcher).
//!
//! ## Example
//!
//! ```rust
//! use segrouter::{Request, RequestExt, ResponseWriter, Router};
//!
//! fn hello(req: &mut Request, res: &mut ResponseWriter) {
//!     let name = req.param("name").unwrap_or("stranger").to_string();
//!     res.write_str(&format!("Hello {name}"));
//! }
//!
//! let mut router = Router::new("/v1");
//! router.add("/hello/:name", hello);
//!
//! let mut req = http::Request::builder()
//!     .uri("/v1/hello/joe")
//!     .body(Vec::new())
//!     .unwrap();
//! assert!(router.match_request(&mut req).is_some());
//! assert_eq!(req.param("name"), Some("joe"));
//! ```

mod core;

pub use self::core::{RouteMatch, Router};
