//! Route tables described as JSON.
//!
//! ```json
//! {
//!   "trailing_slash": "optional",
//!   "routes": [
//!     { "path": "/servers/json", "methods": ["GET"] },
//!     { "path": "/servers/:host/logs", "methods": ["GET", "DELETE"] }
//!   ]
//! }
//! ```
//!
//! Every configured method gets a handler that answers with the route's
//! template, which is enough to inspect how a table resolves paths.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::matcher::RouteMatcher;
use crate::path::TrailingSlash;
use crate::request::{Method, Request};
use crate::response::Response;
use crate::route::Route;

/// A route table definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTableConfig {
    /// Trailing slash policy applied to every route.
    #[serde(default)]
    pub trailing_slash: TrailingSlash,
    /// Routes in precedence order.
    pub routes: Vec<RouteConfig>,
}

/// One entry of a route table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Path template.
    pub path: String,
    /// Methods with a handler. Any other method hits the fallback.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl RouteTableConfig {
    /// Parses a route table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouterError::Config`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a route table file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a config error if
    /// it is not a valid route table.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Compiles the table into a matcher.
    ///
    /// # Errors
    ///
    /// Fails on an unknown method token or a malformed template.
    pub fn build_matcher(&self) -> Result<RouteMatcher> {
        let routes = self
            .routes
            .iter()
            .map(RouteConfig::to_route)
            .collect::<Result<Vec<_>>>()?;

        RouteMatcher::with_trailing_slash(routes, self.trailing_slash)
    }
}

impl RouteConfig {
    fn to_route(&self) -> Result<Route> {
        let mut route = Route::new(self.path.as_str());
        for token in &self.methods {
            let method: Method = token.parse()?;
            let body = format!("{method} {}", self.path);
            route = route.on(method, move |_req: Request| {
                let body = body.clone();
                async move { Response::text(body) }
            });
        }
        Ok(route)
    }
}
