//! # route-matcher
//!
//! Ordered, first-match URL path routing with named parameters.
//!
//! This crate provides:
//! - Compilation of path templates such as `/servers/:host/logs` into
//!   anchored patterns
//! - First-match route selection in registration order
//! - Path parameter extraction
//! - Per-method handlers with a fallback handler
//! - Route and global middleware
//!
//! ## Quick Start
//!
//! ```
//! use route_matcher::{Method, Request, Response, Route, RouteMatcher};
//!
//! async fn logs(req: Request) -> Response {
//!     Response::text(format!("logs for {}", req.params.get("host").unwrap_or("?")))
//! }
//!
//! let matcher = RouteMatcher::new([
//!     Route::new("/servers/json").get(logs),
//!     Route::new("/servers/:host/logs").get(logs),
//! ])
//! .unwrap();
//!
//! let found = matcher.match_route(Method::Get, "/servers/db1/logs").unwrap();
//! assert_eq!(found.template(), "/servers/:host/logs");
//! assert_eq!(found.params().get("host"), Some("db1"));
//!
//! assert!(matcher.match_route(Method::Get, "/servers/db1").is_none());
//! ```
//!
//! ## Template Syntax
//!
//! A segment starting with `:` followed by alphanumeric characters is a named
//! parameter. It matches one or more of `A-Z a-z 0-9 _ -`. Everything else is
//! matched literally. Patterns are anchored, so `/hello/world` does not match
//! `/hello/world/extra`.
//!
//! ## Precedence
//!
//! Routes are tried in the order they were registered and the first match
//! wins. There is no specificity ranking: register `/servers/json` before
//! `/servers/:host` if the static route should take precedence.
//!
//! ## Dispatch
//!
//! Matching only looks at the path. Once a route matches, the handler for the
//! request method runs, or the route's fallback handler if the method has none.
//! [`Router`] ties this together and injects the extracted parameters into
//! [`Request::params`]:
//!
//! ```
//! use route_matcher::{Request, Response, Route, Router};
//!
//! # futures::executor::block_on(async {
//! let router = Router::builder()
//!     .route(Route::new("/:greeting/:location").get(|req: Request| async move {
//!         let greeting = req.params.get("greeting").unwrap_or_default();
//!         let location = req.params.get("location").unwrap_or_default();
//!         Response::text(format!("{greeting} {location}"))
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let res = router.handle(Request::get("/hey/australia")).await;
//! assert_eq!(res.body_string().as_deref(), Some("hey australia"));
//!
//! let res = router.handle(Request::post("/hey/australia")).await;
//! assert_eq!(res.status, 405);
//! # });
//! ```

mod config;
mod error;
mod matcher;
mod middleware;
mod path;
mod request;
mod response;
mod route;
mod router;

pub use config::{RouteConfig, RouteTableConfig};
pub use error::{Result, RouterError};
pub use matcher::{CompiledRoute, RouteMatch, RouteMatcher};
pub use middleware::{LoggingMiddleware, Middleware, MiddlewareResult};
pub use path::{PathPattern, TrailingSlash};
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use route::{handler, Dispatch, Handler, Route};
pub use router::{RouteGroup, Router, RouterBuilder};
