//! Route selection, anchoring and method-independent matching.

mod common;
use common::*;

use route_matcher::{Dispatch, Method, Request, Response, Route, RouteMatcher, Router};

#[test]
fn matches_registered_routes() {
    let matcher = get_matcher(&[
        "/hello/world",
        "/hello/dan",
        "/api/:version",
        "/servers/json",
        "/servers/:host/logs",
    ]);

    assert_eq!(resolve(&matcher, "/hello/world"), Some("/hello/world"));
    assert_eq!(resolve(&matcher, "/hello/dan"), Some("/hello/dan"));
    assert_eq!(resolve(&matcher, "/hello/world/dan"), None);
    assert_eq!(resolve(&matcher, "/api/v1"), Some("/api/:version"));
    assert_eq!(resolve(&matcher, "/api/v2"), Some("/api/:version"));
    assert_eq!(resolve(&matcher, "/api/v1/v1"), None);
    assert_eq!(resolve(&matcher, "/api/api"), Some("/api/:version"));
    assert_eq!(resolve(&matcher, "/servers/json"), Some("/servers/json"));
    assert_eq!(resolve(&matcher, "/servers/notjson"), None);
    assert_eq!(
        resolve(&matcher, "/servers/notjson/logs"),
        Some("/servers/:host/logs")
    );
    assert_eq!(
        resolve(&matcher, "/servers/json/logs"),
        Some("/servers/:host/logs")
    );
}

#[test]
fn anchors_both_ends() {
    let matcher = get_matcher(&["/hello/world"]);

    assert!(resolve(&matcher, "/hello/world").is_some());
    assert!(resolve(&matcher, "/hello/world/extra").is_none());
    assert!(resolve(&matcher, "/extrahello/world").is_none());
    assert!(resolve(&matcher, "/extra/hello/world").is_none());
    assert!(resolve(&matcher, "hello/world").is_none());
}

#[test]
fn accepts_trailing_slash() {
    let matcher = get_matcher(&["/hello/world"]);

    assert!(resolve(&matcher, "/hello/world").is_some());
    assert!(resolve(&matcher, "/hello/world/").is_some());
    assert!(resolve(&matcher, "/hello/world//").is_none());
}

#[test]
fn first_registered_route_wins() {
    let static_first = get_matcher(&["/servers/json", "/servers/:host"]);
    assert_eq!(resolve(&static_first, "/servers/json"), Some("/servers/json"));
    assert_eq!(resolve(&static_first, "/servers/db1"), Some("/servers/:host"));

    let param_first = get_matcher(&["/servers/:host", "/servers/json"]);
    assert_eq!(resolve(&param_first, "/servers/json"), Some("/servers/:host"));
}

#[test]
fn same_path_registered_twice_uses_first() {
    let matcher = RouteMatcher::new([
        Route::new("/hello/world").get(ok),
        Route::new("/hello/world").post(ok),
    ])
    .unwrap();

    let found = matcher.match_route(Method::Post, "/hello/world").unwrap();
    assert_eq!(found.index(), 0);
    assert_eq!(found.dispatch(), Dispatch::Fallback);
}

#[test]
fn path_match_ignores_method() {
    let matcher = RouteMatcher::new([
        Route::new("/hello/world").get(ok),
        Route::new("/hello/world123").post(ok),
    ])
    .unwrap();

    let found = matcher.match_route(Method::Get, "/hello/world123").unwrap();
    assert_eq!(found.template(), "/hello/world123");
    assert_eq!(found.dispatch(), Dispatch::Fallback);

    let found = matcher.match_route(Method::Post, "/hello/world123").unwrap();
    assert_eq!(found.dispatch(), Dispatch::Handler);
}

#[test]
fn unregistered_path_never_matches() {
    let matcher = get_matcher(&["/hello/world", "/:greeting/:location"]);

    for _ in 0..5 {
        assert!(matcher.match_route(Method::Get, "/a/b/c").is_none());
        assert!(matcher.match_route(Method::Delete, "/").is_none());
    }
    assert_eq!(matcher.len(), 2);
    assert_eq!(resolve(&matcher, "/hey/there"), Some("/:greeting/:location"));
}

#[test]
fn dispatches_by_method_within_route() {
    let router = Router::builder()
        .route(
            Route::new("/hello/world")
                .get(|_req: Request| async { Response::text("get request") })
                .post(|_req: Request| async { Response::text("post request") }),
        )
        .build()
        .unwrap();

    assert_eq!(body(&router, Request::get("/hello/world")), "get request");
    assert_eq!(body(&router, Request::post("/hello/world")), "post request");
}

#[test]
fn fallback_handles_unregistered_method() {
    let router = Router::builder()
        .route(
            Route::new("/hello/world123")
                .post(|_req: Request| async { Response::text("post request 2") })
                .fallback(|req: Request| async move {
                    Response::new(405).body(format!("{} not allowed", req.method))
                }),
        )
        .build()
        .unwrap();

    let res = futures::executor::block_on(router.handle(Request::get("/hello/world123")));
    assert_eq!(res.status, 405);
    assert_eq!(res.body_string().as_deref(), Some("GET not allowed"));
    assert_eq!(
        body(&router, Request::post("/hello/world123")),
        "post request 2"
    );
}
