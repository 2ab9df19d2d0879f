use super::RouteTree;

fn tree(routes: &[(&str, &'static str)]) -> RouteTree<&'static str> {
    let mut tree = RouteTree::new();
    for (path, name) in routes {
        tree.insert(path, *name);
    }
    tree
}

#[test]
fn test_literal_routes_match_without_params() {
    let routes = [
        ("/", "root"),
        ("/health", "health"),
        ("/api/v1/users", "users"),
        ("/api/v1/users/list", "list"),
    ];
    let tree = tree(&routes);

    for (path, name) in routes {
        let m = tree.find(path).expect("literal route should match");
        assert_eq!(*m.value, name);
        assert!(m.params.is_empty());
    }
}

#[test]
fn test_param_binding() {
    let tree = tree(&[("/hello/:name", "hello")]);

    let m = tree.find("/hello/joe").unwrap();
    assert_eq!(*m.value, "hello");
    assert_eq!(m.params.get("name"), Some("joe"));
}

#[test]
fn test_trailing_slash_is_equivalent() {
    let tree = tree(&[("/hello", "hello"), ("/hello/:name", "named")]);

    assert_eq!(*tree.find("/hello/").unwrap().value, "hello");
    assert_eq!(*tree.find("/hello").unwrap().value, "hello");
    assert_eq!(*tree.find("/hello/joe/").unwrap().value, "named");
}

#[test]
fn test_static_wins_over_param() {
    // Registration order must not matter
    let tree = tree(&[("/users/:id", "by_id"), ("/users/admin", "admin")]);

    let m = tree.find("/users/admin").unwrap();
    assert_eq!(*m.value, "admin");
    assert!(m.params.is_empty());

    let m = tree.find("/users/42").unwrap();
    assert_eq!(*m.value, "by_id");
    assert_eq!(m.params.get("id"), Some("42"));
}

#[test]
fn test_backtracks_from_static_branch() {
    // `/users/admin` exists only as a prefix of a longer route, so matching
    // `/users/admin` itself has to fall back to the parameter branch.
    let tree = tree(&[("/users/:id", "by_id"), ("/users/admin/settings", "settings")]);

    let m = tree.find("/users/admin").unwrap();
    assert_eq!(*m.value, "by_id");
    assert_eq!(m.params.get("id"), Some("admin"));

    let m = tree.find("/users/admin/settings").unwrap();
    assert_eq!(*m.value, "settings");
    assert!(m.params.is_empty());
}

#[test]
fn test_failed_param_branch_leaves_no_bindings() {
    let tree = tree(&[
        ("/users/:user_id/posts", "posts"),
        ("/users/:id/comments", "comments"),
    ]);

    let m = tree.find("/users/7/comments").unwrap();
    assert_eq!(*m.value, "comments");
    assert_eq!(m.params.get("id"), Some("7"));
    assert_eq!(m.params.get("user_id"), None);
    assert_eq!(m.params.len(), 1);
}

#[test]
fn test_same_param_name_shares_node() {
    let tree = tree(&[("/users/:id", "user"), ("/users/:id/posts", "posts")]);

    let m = tree.find("/users/9/posts").unwrap();
    assert_eq!(*m.value, "posts");
    assert_eq!(m.params.get("id"), Some("9"));
    assert_eq!(
        tree.routes(),
        vec!["/users/:id".to_string(), "/users/:id/posts".to_string()]
    );
}

#[test]
fn test_multiple_params() {
    let tree = tree(&[("/hello/:first-name/:middle-name/:last-name", "full")]);

    let m = tree.find("/hello/joe/x/smith").unwrap();
    assert_eq!(m.params.get("first-name"), Some("joe"));
    assert_eq!(m.params.get("middle-name"), Some("x"));
    assert_eq!(m.params.get("last-name"), Some("smith"));
    let names: Vec<&str> = m.params.iter().map(|(k, _)| k).collect();
    assert_eq!(names, ["first-name", "middle-name", "last-name"]);
}

#[test]
fn test_wildcard_consumes_remainder() {
    let tree = tree(&[("/files/*", "files")]);

    let m = tree.find("/files/a/b/c").unwrap();
    assert_eq!(*m.value, "files");
    assert!(m.params.is_empty());

    assert_eq!(*tree.find("/files/readme").unwrap().value, "files");
    assert!(tree.find("/files").is_none());
}

#[test]
fn test_wildcard_is_last_resort() {
    let tree = tree(&[
        ("/files/*", "any"),
        ("/files/:name", "named"),
        ("/files/special", "special"),
    ]);

    assert_eq!(*tree.find("/files/special").unwrap().value, "special");
    assert_eq!(*tree.find("/files/report").unwrap().value, "named");
    assert_eq!(*tree.find("/files/report/2024").unwrap().value, "any");
}

#[test]
fn test_segments_after_wildcard_are_ignored() {
    let tree = tree(&[("/static/*/ignored", "static")]);

    assert_eq!(tree.routes(), vec!["/static/*".to_string()]);
    assert_eq!(*tree.find("/static/css/site.css").unwrap().value, "static");
}

#[test]
fn test_root_route() {
    let tree = tree(&[("/", "root"), ("/*", "fallback")]);

    assert_eq!(*tree.find("").unwrap().value, "root");
    assert_eq!(*tree.find("/").unwrap().value, "root");
    assert_eq!(*tree.find("/anything/else").unwrap().value, "fallback");
}

#[test]
fn test_root_without_handler_does_not_match() {
    let tree = tree(&[("/a", "a")]);
    assert!(tree.find("/").is_none());
}

#[test]
fn test_no_match() {
    let tree = tree(&[("/users/:id", "user"), ("/health", "health")]);

    assert!(tree.find("/does/not/exist").is_none());
    assert!(tree.find("/users").is_none());
    assert!(tree.find("/users/1/extra").is_none());
}

#[test]
fn test_intermediate_node_without_handler() {
    let tree = tree(&[("/a/b/c", "deep")]);
    assert!(tree.find("/a/b").is_none());
    assert!(tree.find("/a").is_none());
}

#[test]
fn test_reinsert_overwrites() {
    let mut tree = RouteTree::new();
    assert_eq!(tree.insert("/test", "first"), None);
    assert_eq!(tree.insert("test/", "second"), Some("first"));

    assert_eq!(*tree.find("/test").unwrap().value, "second");
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_match_is_idempotent() {
    let tree = tree(&[("/a/:x/b/:y", "ab")]);

    let first = tree.find("/a/1/b/2").unwrap();
    for _ in 0..10 {
        let again = tree.find("/a/1/b/2").unwrap();
        assert_eq!(again.value, first.value);
        assert_eq!(again.params, first.params);
        assert_eq!(again.node, first.node);
    }
}

#[test]
fn test_dot_segments_in_request() {
    let tree = tree(&[("/b/:id", "b")]);

    let m = tree.find("/a/../b/./5").unwrap();
    assert_eq!(*m.value, "b");
    assert_eq!(m.params.get("id"), Some("5"));
}

#[test]
fn test_pattern_rendering() {
    let tree = tree(&[("/", "root"), ("/users/:id/files/*", "files")]);

    let m = tree.find("/users/3/files/x/y").unwrap();
    assert_eq!(tree.pattern(m.node).to_string(), "/users/:id/files/*");

    let root = tree.find("/").unwrap();
    assert_eq!(tree.pattern(root.node).to_string(), "/");
}

#[test]
fn test_len_and_is_empty() {
    let mut tree: RouteTree<u8> = RouteTree::new();
    assert!(tree.is_empty());
    tree.insert("/a", 1);
    tree.insert("/a/b", 2);
    tree.insert("/a", 3);
    assert_eq!(tree.len(), 2);
    assert!(!tree.is_empty());
}

#[test]
#[should_panic(expected = "empty name")]
fn test_empty_param_name_panics() {
    let mut tree = RouteTree::new();
    tree.insert("/users/:", "bad");
}
