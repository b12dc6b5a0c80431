//! Request dispatch on top of the route matcher.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::Result;
use crate::matcher::RouteMatcher;
use crate::middleware::{run_chain, Middleware};
use crate::path::TrailingSlash;
use crate::request::{PathParams, Request};
use crate::response::Response;
use crate::route::Route;

/// A group of routes with a common prefix and middleware.
pub struct RouteGroup {
    /// URL prefix for all routes in this group.
    prefix: String,
    /// Routes in this group.
    routes: Vec<Route>,
    /// Middleware for this group.
    middleware: Vec<Arc<dyn Middleware>>,
}

impl RouteGroup {
    /// Creates a new route group with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Adds a route; its path is taken relative to the prefix.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds middleware run before the middleware of every route in the group.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(mw));
        self
    }

    /// Returns the routes with the prefix and group middleware applied.
    pub fn into_routes(self) -> Vec<Route> {
        let Self {
            prefix,
            routes,
            middleware,
        } = self;

        routes
            .into_iter()
            .map(|route| route.with_prefix(&prefix).prepend_middleware(&middleware))
            .collect()
    }
}

/// Collects routes and middleware, then compiles them into a [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
    middleware: Vec<Arc<dyn Middleware>>,
    trailing_slash: TrailingSlash,
}

impl RouterBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Earlier routes take precedence over later ones.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Appends all routes of a group at the current position.
    #[must_use]
    pub fn group(mut self, group: RouteGroup) -> Self {
        self.routes.extend(group.into_routes());
        self
    }

    /// Adds global middleware, run before route matching.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(mw));
        self
    }

    /// Sets the trailing slash policy for every route.
    #[must_use]
    pub fn trailing_slash(mut self, policy: TrailingSlash) -> Self {
        self.trailing_slash = policy;
        self
    }

    /// Compiles every route.
    ///
    /// # Errors
    ///
    /// Fails if any route template is malformed.
    pub fn build(self) -> Result<Router> {
        let matcher = RouteMatcher::with_trailing_slash(self.routes, self.trailing_slash)?;
        Ok(Router {
            matcher,
            middleware: self.middleware,
        })
    }
}

/// The main router for handling HTTP requests.
pub struct Router {
    matcher: RouteMatcher,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Router {
    /// Starts building a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Returns the compiled route table.
    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }

    /// Generates a path for a registered template.
    pub fn url_for(&self, template: &str, params: &PathParams) -> Option<String> {
        self.matcher
            .find_template(template)
            .and_then(|compiled| compiled.pattern().reverse(params))
    }

    /// Handles an incoming request.
    ///
    /// Global middleware runs first. The matched route then receives the
    /// request with its path parameters filled in. A path matching no route is
    /// answered with `404 Not Found`.
    pub fn handle(&self, request: Request) -> BoxFuture<'_, Response> {
        run_chain(&self.middleware, request, move |req| self.dispatch(req))
    }

    fn dispatch(&self, mut req: Request) -> BoxFuture<'_, Response> {
        let Some(found) = self.matcher.match_route(req.method, &req.path) else {
            return async { Response::not_found() }.boxed();
        };

        let route = found.route();
        req.params = found.into_params();
        route.respond(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    async fn hello_handler(_req: Request) -> Response {
        Response::text("Hello, World!")
    }

    async fn host_handler(req: Request) -> Response {
        let host = req.params.get("host").unwrap_or("unknown");
        Response::text(format!("host {host}"))
    }

    #[tokio::test]
    async fn test_basic_routing() {
        let router = Router::builder()
            .route(Route::new("/").get(hello_handler))
            .route(Route::new("/servers/:host/logs").get(host_handler))
            .build()
            .unwrap();

        let res = router.handle(Request::get("/")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("Hello, World!".to_string()));
    }

    #[tokio::test]
    async fn test_path_params_injected() {
        let router = Router::builder()
            .route(Route::new("/servers/:host/logs").get(host_handler))
            .build()
            .unwrap();

        let res = router.handle(Request::get("/servers/db1/logs?tail=5")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("host db1".to_string()));
    }

    #[tokio::test]
    async fn test_not_found() {
        let router = Router::builder()
            .route(Route::new("/").get(hello_handler))
            .build()
            .unwrap();

        let res = router.handle(Request::get("/nonexistent")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let router = Router::builder()
            .route(Route::new("/").get(hello_handler))
            .build()
            .unwrap();

        let res = router.handle(Request::post("/")).await;
        assert_eq!(res.status, 405);
        assert_eq!(res.get_header("Allow"), Some("GET"));
    }

    #[tokio::test]
    async fn test_route_group() {
        let api = RouteGroup::new("/api/v1")
            .route(Route::new("/servers").get(hello_handler))
            .route(Route::new("/servers/:host/logs").get(host_handler));

        let router = Router::builder().group(api).build().unwrap();

        let res = router.handle(Request::get("/api/v1/servers/web2/logs")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("host web2".to_string()));
        assert_eq!(router.handle(Request::get("/servers")).await.status, 404);
    }

    #[test]
    fn test_url_for() {
        let router = Router::builder()
            .route(Route::new("/servers/:host/logs").get(host_handler))
            .build()
            .unwrap();

        let params: PathParams = [("host", "db1")].into_iter().collect();
        assert_eq!(
            router.url_for("/servers/:host/logs", &params),
            Some("/servers/db1/logs".to_string())
        );
        assert_eq!(router.url_for("/missing", &params), None);
    }

    #[test]
    fn test_build_rejects_bad_template() {
        let result = Router::builder()
            .route(Route::new("/users/:").on(Method::Get, hello_handler))
            .build();
        assert!(result.is_err());
    }
}
