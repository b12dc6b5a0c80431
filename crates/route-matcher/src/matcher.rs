//! First-match route selection over an ordered, compiled route table.
//!
//! Every route is compiled once when the matcher is built. Matching walks the
//! table in registration order and stops at the first route whose anchored
//! pattern accepts the whole path. Registration order is the only tiebreaker:
//! a parametric `/servers/:host` registered before `/servers/json` shadows it.
//!
//! Matching looks at the path only. The request method decides afterwards
//! whether the matched route's handler or its fallback runs.

use tracing::{debug, trace};

use crate::error::Result;
use crate::path::{PathPattern, TrailingSlash};
use crate::request::{Method, PathParams};
use crate::route::{Dispatch, Route};

/// A route together with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    route: Route,
    pattern: PathPattern,
}

impl CompiledRoute {
    /// Compiles the route's template.
    ///
    /// # Errors
    ///
    /// Fails if the template is malformed, see [`PathPattern::compile_with`].
    pub fn new(route: Route, trailing_slash: TrailingSlash) -> Result<Self> {
        let pattern = PathPattern::compile_with(route.path(), trailing_slash)?;
        Ok(Self { route, pattern })
    }

    /// Returns the source route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the compiled pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the parameter names in template order.
    pub fn param_names(&self) -> &[String] {
        self.pattern.param_names()
    }
}

/// The outcome of a successful match.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    compiled: &'a CompiledRoute,
    index: usize,
    method: Method,
    params: PathParams,
}

impl<'a> RouteMatch<'a> {
    /// Returns the matched route.
    pub fn route(&self) -> &'a Route {
        &self.compiled.route
    }

    /// Returns the template of the matched route.
    pub fn template(&self) -> &'a str {
        self.compiled.pattern.template()
    }

    /// Returns the position of the matched route in registration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the request method the match was made for.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Tells whether the route's handler or its fallback serves the method.
    pub fn dispatch(&self) -> Dispatch {
        self.compiled.route.dispatch(self.method)
    }

    /// Returns the extracted path parameters.
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Consumes the match, returning the extracted path parameters.
    pub fn into_params(self) -> PathParams {
        self.params
    }
}

/// An immutable, ordered table of compiled routes.
///
/// The matcher holds no interior mutability, so a shared reference can be
/// used from any number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct RouteMatcher {
    routes: Vec<CompiledRoute>,
}

impl RouteMatcher {
    /// Compiles `routes` with the default trailing slash policy.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed template.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self> {
        Self::with_trailing_slash(routes, TrailingSlash::default())
    }

    /// Compiles `routes`, keeping their order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed template. A route table with a bad
    /// template is never partially built.
    pub fn with_trailing_slash(
        routes: impl IntoIterator<Item = Route>,
        trailing_slash: TrailingSlash,
    ) -> Result<Self> {
        let routes = routes
            .into_iter()
            .map(|route| CompiledRoute::new(route, trailing_slash))
            .collect::<Result<Vec<_>>>()?;

        debug!(routes = routes.len(), ?trailing_slash, "Route table compiled");

        Ok(Self { routes })
    }

    /// Finds the first route whose pattern matches `path` in full.
    ///
    /// `path` must not carry a query string or fragment. The method does not
    /// take part in selection; it is recorded so the caller can dispatch.
    /// Returns `None` when no route matches.
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        for (index, compiled) in self.routes.iter().enumerate() {
            if let Some(params) = compiled.pattern.match_path(path) {
                trace!(
                    %method,
                    path,
                    template = compiled.pattern.template(),
                    index,
                    "Route matched"
                );
                return Some(RouteMatch {
                    compiled,
                    index,
                    method,
                    params,
                });
            }
        }

        debug!(%method, path, "No route matched");
        None
    }

    /// Returns the compiled route registered with `template`, if any.
    pub fn find_template(&self, template: &str) -> Option<&CompiledRoute> {
        self.routes
            .iter()
            .find(|compiled| compiled.pattern.template() == template)
    }

    /// Returns the compiled routes in registration order.
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
