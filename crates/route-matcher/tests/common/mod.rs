#![allow(dead_code)]

use route_matcher::{Method, PathParams, Request, Response, Route, RouteMatcher, Router};

pub async fn ok(_req: Request) -> Response {
    Response::ok()
}

/// Builds a matcher with one GET route per template, in order.
pub fn get_matcher(templates: &[&str]) -> RouteMatcher {
    RouteMatcher::new(templates.iter().map(|t| Route::new(*t).get(ok)))
        .unwrap_or_else(|e| panic!("Failed to build matcher for {templates:?}: {e}"))
}

/// Returns the template that `path` resolves to, if any.
pub fn resolve<'a>(matcher: &'a RouteMatcher, path: &str) -> Option<&'a str> {
    matcher
        .match_route(Method::Get, path)
        .map(|found| found.template())
}

pub fn params(matcher: &RouteMatcher, path: &str) -> PathParams {
    matcher
        .match_route(Method::Get, path)
        .unwrap_or_else(|| panic!("Expected a match for {path}"))
        .into_params()
}

pub fn body(router: &Router, request: Request) -> String {
    let res = futures::executor::block_on(router.handle(request));
    res.body_string()
        .unwrap_or_else(|| panic!("Response body is not UTF-8: {res:?}"))
}
