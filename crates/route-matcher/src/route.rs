//! Route definitions: a path template with its per-method handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::middleware::{run_chain, Middleware};
use crate::request::{Method, Request};
use crate::response::Response;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wraps an async function into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req| f(req).boxed())
}

/// Which handler of a route serves a given method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The route registered a handler for the method.
    Handler,
    /// The method is not registered; the fallback handler runs.
    Fallback,
}

impl Dispatch {
    /// Returns a lowercase label for this dispatch kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handler => "handler",
            Self::Fallback => "fallback",
        }
    }
}

/// A route template: a path, its handlers, a fallback and middleware.
///
/// The path uses `/`-separated segments where `:name` introduces a named
/// parameter, e.g. `/servers/:host/logs`.
#[derive(Clone)]
pub struct Route {
    path: String,
    actions: BTreeMap<Method, Handler>,
    fallback: Option<Handler>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Route {
    /// Creates a route with no handlers.
    ///
    /// Until a fallback is set, requests with an unregistered method are
    /// answered with `405 Method Not Allowed`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            actions: BTreeMap::new(),
            fallback: None,
            middleware: Vec::new(),
        }
    }

    /// Registers a handler for `method`, replacing any previous one.
    #[must_use]
    pub fn on<F, Fut>(mut self, method: Method, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.actions.insert(method, handler(f));
        self
    }

    /// Adds a GET handler.
    #[must_use]
    pub fn get<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on(Method::Get, f)
    }

    /// Adds a POST handler.
    #[must_use]
    pub fn post<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on(Method::Post, f)
    }

    /// Adds a PUT handler.
    #[must_use]
    pub fn put<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on(Method::Put, f)
    }

    /// Adds a DELETE handler.
    #[must_use]
    pub fn delete<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on(Method::Delete, f)
    }

    /// Sets the handler used when the request method has no handler.
    #[must_use]
    pub fn fallback<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.fallback = Some(handler(f));
        self
    }

    /// Appends middleware that runs before this route's handlers.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(mw));
        self
    }

    /// Returns the path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the methods with a registered handler, in a stable order.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.actions.keys().copied()
    }

    /// Returns the handler registered for `method`, if any.
    pub fn handler_for(&self, method: Method) -> Option<&Handler> {
        self.actions.get(&method)
    }

    /// Tells whether `method` is served by a handler or by the fallback.
    pub fn dispatch(&self, method: Method) -> Dispatch {
        if self.actions.contains_key(&method) {
            Dispatch::Handler
        } else {
            Dispatch::Fallback
        }
    }

    /// Runs the route's middleware and then the handler for the request's
    /// method, or the fallback handler when none is registered.
    ///
    /// The request is expected to carry its path parameters already.
    pub fn respond(&self, request: Request) -> BoxFuture<'_, Response> {
        run_chain(&self.middleware, request, move |req| self.call(req))
    }

    fn call(&self, req: Request) -> BoxFuture<'_, Response> {
        if let Some(action) = self.actions.get(&req.method) {
            return action(req);
        }
        if let Some(fallback) = &self.fallback {
            return fallback(req);
        }

        let allow: Vec<&str> = self.methods().map(Method::as_str).collect();
        let res = Response::method_not_allowed(&allow);
        async move { res }.boxed()
    }

    pub(crate) fn with_prefix(mut self, prefix: &str) -> Self {
        self.path = format!("{}{}", prefix.trim_end_matches('/'), self.path);
        self
    }

    pub(crate) fn prepend_middleware(mut self, outer: &[Arc<dyn Middleware>]) -> Self {
        if !outer.is_empty() {
            let inner = std::mem::take(&mut self.middleware);
            self.middleware = outer.iter().cloned().chain(inner).collect();
        }
        self
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("methods", &self.actions.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
