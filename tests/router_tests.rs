//! Route matching through the public router API
//!
//! Covers literal, parameter and wildcard routes, precedence between them,
//! path normalization and repeatability of lookups.

use segrouter::{handler_fn, Request, ResponseWriter, RouteMatch, Router, SharedHandler};

fn run(handler: &SharedHandler) -> String {
    let mut req: Request = http::Request::builder().uri("/").body(Vec::new()).unwrap();
    let mut res = ResponseWriter::new();
    handler.serve(&mut req, &mut res);
    res.body_text().into_owned()
}

fn label(m: Option<RouteMatch<'_>>) -> Option<String> {
    m.map(|m| run(m.handler))
}

fn zoo() -> Router {
    let mut router = Router::new("/");
    router
        .add("/", handler_fn(|_req, res| res.write_str("root")))
        .add("/zoo/animals", handler_fn(|_req, res| res.write_str("animals")))
        .add("/zoo/animals/:id", handler_fn(|_req, res| res.write_str("animal")))
        .add("/zoo/animals/new", handler_fn(|_req, res| res.write_str("new")))
        .add(
            "/zoo/animals/:id/toys/:toy_id",
            handler_fn(|_req, res| res.write_str("toy")),
        )
        .add("/files/*", handler_fn(|_req, res| res.write_str("files")))
        .add("/hello/:name", handler_fn(|_req, res| res.write_str("hello")));
    router
}

#[test]
fn test_literal_routes_bind_nothing() {
    let router = zoo();
    for (path, expected) in [("/", "root"), ("/zoo/animals", "animals"), ("/zoo/animals/new", "new")] {
        let found = router.lookup(path).unwrap();
        assert!(found.params.is_empty(), "{path} bound {:?}", found.params);
        assert_eq!(run(found.handler), expected);
    }
}

#[test]
fn test_param_route_and_trailing_slash() {
    let router = zoo();
    let found = router.lookup("/hello/joe").unwrap();
    assert_eq!(found.params.get("name"), Some("joe"));
    assert_eq!(found.pattern.to_string(), "/hello/:name");

    let with_slash = router.lookup("/hello/joe/").unwrap();
    assert_eq!(with_slash.params, found.params);

    // `/hello/` and `/hello` normalize to the same path
    assert_eq!(label(router.lookup("/hello/")), label(router.lookup("/hello")));
    assert_eq!(label(router.lookup("/hello")), None);
}

#[test]
fn test_static_beats_param() {
    let mut router = Router::new("/");
    router
        .add("/users/:id", handler_fn(|_req, res| res.write_str("param")))
        .add("/users/admin", handler_fn(|_req, res| res.write_str("admin")));

    let admin = router.lookup("/users/admin").unwrap();
    assert_eq!(run(admin.handler), "admin");
    assert!(admin.params.is_empty());

    let other = router.lookup("/users/bob").unwrap();
    assert_eq!(run(other.handler), "param");
    assert_eq!(other.params.get("id"), Some("bob"));
}

#[test]
fn test_wildcard_binds_nothing() {
    let router = zoo();
    let found = router.lookup("/files/a/b/c").unwrap();
    assert_eq!(run(found.handler), "files");
    assert!(found.params.is_empty());
    assert!(router.lookup("/files").is_none());
}

#[test]
fn test_nested_params() {
    let router = zoo();
    let found = router.lookup("/zoo/animals/7/toys/ball").unwrap();
    assert_eq!(run(found.handler), "toy");
    assert_eq!(found.params.get("id"), Some("7"));
    assert_eq!(found.params.get("toy_id"), Some("ball"));
    assert_eq!(found.params.get_u64("id").unwrap(), 7);
    assert!(found.params.get_u64("toy_id").is_err());
}

#[test]
fn test_backtracks_out_of_dead_static_branch() {
    let mut router = Router::new("/");
    router
        .add("/a/b/c", handler_fn(|_req, res| res.write_str("abc")))
        .add("/a/:x/d", handler_fn(|_req, res| res.write_str("axd")));

    let found = router.lookup("/a/b/d").unwrap();
    assert_eq!(run(found.handler), "axd");
    assert_eq!(found.params.get("x"), Some("b"));
    assert_eq!(found.params.len(), 1);
}

#[test]
fn test_no_match() {
    let router = zoo();
    assert!(router.lookup("/does/not/exist").is_none());
    assert!(router.lookup("/zoo/animals/7/toys").is_none());
}

#[test]
fn test_lookup_is_idempotent() {
    let router = zoo();
    let first = router.lookup("/zoo/animals/9/toys/rope").unwrap();
    for _ in 0..10 {
        let again = router.lookup("/zoo/animals/9/toys/rope").unwrap();
        assert!(std::sync::Arc::ptr_eq(first.handler, again.handler));
        assert_eq!(again.params, first.params);
    }
}

#[test]
fn test_dot_segments_are_resolved() {
    let router = zoo();
    let found = router.lookup("/zoo/./animals/../animals/5").unwrap();
    assert_eq!(run(found.handler), "animal");
    assert_eq!(found.params.get("id"), Some("5"));
    assert_eq!(label(router.lookup("//zoo//animals//")), Some("animals".to_string()));
}
