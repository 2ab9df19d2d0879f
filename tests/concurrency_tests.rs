//! Concurrent dispatch against a shared, frozen dispatcher
//!
//! Many threads dispatch requests with distinct parameter values at the same
//! time; each request must see only its own bindings.

use segrouter::{
    handler_fn, DispatchOutcome, Dispatcher, RequestContext, RequestExt, ResponseWriter, Router,
};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const REQUESTS_PER_THREAD: usize = 500;

fn echo_dispatcher() -> Dispatcher {
    let mut users = Router::new("/users");
    users
        .add(
            "/:id/posts/:post",
            handler_fn(|req, res| {
                let id = req.param("id").unwrap_or("?").to_string();
                let post = req.param("post").unwrap_or("?").to_string();
                res.write_str(&format!("{id}/{post}"));
            }),
        )
        .add(
            "/:id",
            handler_fn(|req, res| res.write_str(req.param("id").unwrap_or("?"))),
        );
    Dispatcher::build([users])
}

#[test]
fn test_concurrent_dispatch_keeps_params_separate() {
    let dispatcher = Arc::new(echo_dispatcher());

    thread::scope(|scope| {
        for t in 0..THREADS {
            let dispatcher = Arc::clone(&dispatcher);
            scope.spawn(move || {
                for i in 0..REQUESTS_PER_THREAD {
                    let (uri, expected) = if i % 2 == 0 {
                        (format!("/users/{t}-{i}"), format!("{t}-{i}"))
                    } else {
                        (
                            format!("/users/{t}/posts/{i}"),
                            format!("{t}/{i}"),
                        )
                    };
                    let mut req = http::Request::builder()
                        .uri(uri.as_str())
                        .body(Vec::new())
                        .unwrap();
                    req.extensions_mut().insert(RequestContext::new());
                    let mut res = ResponseWriter::new();

                    let outcome = dispatcher.dispatch(&mut req, &mut res);
                    assert_eq!(outcome, DispatchOutcome::Handled);
                    assert_eq!(res.body_text(), expected, "uri {uri}");
                }
            });
        }
    });
}

#[test]
fn test_concurrent_cancellation_is_per_request() {
    let mut router = Router::new("/");
    router.add("/work/:n", handler_fn(|_req, res| res.write_str("done")));
    let dispatcher = Arc::new(Dispatcher::build([router]));

    thread::scope(|scope| {
        for t in 0..THREADS {
            let dispatcher = Arc::clone(&dispatcher);
            scope.spawn(move || {
                let ctx = RequestContext::new();
                let cancel = t % 2 == 0;
                if cancel {
                    ctx.cancel();
                }
                let mut req = http::Request::builder()
                    .uri(format!("/work/{t}"))
                    .body(Vec::new())
                    .unwrap();
                req.extensions_mut().insert(ctx);
                let mut res = ResponseWriter::new();

                let outcome = dispatcher.dispatch(&mut req, &mut res);
                if cancel {
                    assert_eq!(outcome, DispatchOutcome::Cancelled);
                    assert!(res.body().is_empty());
                } else {
                    assert_eq!(outcome, DispatchOutcome::Handled);
                    assert_eq!(res.body_text(), "done");
                }
            });
        }
    });
}
