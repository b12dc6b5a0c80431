//! Middleware support for request/response processing.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::info;

use crate::request::Request;
use crate::response::Response;

/// Result of middleware processing.
pub enum MiddlewareResult {
    /// Continue to the next middleware/handler.
    Continue(Request),
    /// Stop processing and return this response.
    Response(Response),
}

/// Trait for middleware that processes requests and responses.
///
/// Middleware runs in registration order before the handler and in reverse
/// order after it. Route middleware sees the request with its path
/// parameters already filled in.
///
/// # Example
///
/// ```
/// use futures::future::BoxFuture;
/// use futures::FutureExt;
/// use route_matcher::{Middleware, MiddlewareResult, Request, Response};
///
/// struct RequireHost;
///
/// impl Middleware for RequireHost {
///     fn before(&self, req: Request) -> BoxFuture<'_, MiddlewareResult> {
///         async move {
///             if req.params.get("host").is_some() {
///                 MiddlewareResult::Continue(req)
///             } else {
///                 MiddlewareResult::Response(Response::new(400))
///             }
///         }
///         .boxed()
///     }
/// }
/// ```
pub trait Middleware: Send + Sync {
    /// Called before the request handler.
    ///
    /// Can modify the request or short-circuit with a response.
    fn before(&self, req: Request) -> BoxFuture<'_, MiddlewareResult>;

    /// Called after the request handler.
    fn after(&self, res: Response) -> BoxFuture<'_, Response> {
        async move { res }.boxed()
    }
}

/// Middleware that logs requests and their responses.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn before(&self, req: Request) -> BoxFuture<'_, MiddlewareResult> {
        async move {
            info!(method = %req.method, path = %req.path, "-->");
            MiddlewareResult::Continue(req)
        }
        .boxed()
    }

    fn after(&self, res: Response) -> BoxFuture<'_, Response> {
        async move {
            info!(status = res.status, "<--");
            res
        }
        .boxed()
    }
}

/// Runs `before` hooks in order, then `inner`, then `after` hooks in reverse.
///
/// A short-circuiting middleware skips `inner` and the `before` hooks after
/// it; only the middleware that were entered see the response.
pub(crate) fn run_chain<'a, F>(
    middleware: &'a [Arc<dyn Middleware>],
    request: Request,
    inner: F,
) -> BoxFuture<'a, Response>
where
    F: FnOnce(Request) -> BoxFuture<'a, Response> + Send + 'a,
{
    async move {
        let mut entered = 0;
        let mut outcome = MiddlewareResult::Continue(request);

        for mw in middleware {
            let req = match outcome {
                MiddlewareResult::Continue(req) => req,
                MiddlewareResult::Response(_) => break,
            };
            entered += 1;
            outcome = mw.before(req).await;
        }

        let mut response = match outcome {
            MiddlewareResult::Continue(req) => inner(req).await,
            MiddlewareResult::Response(res) => res,
        };

        for mw in middleware[..entered].iter().rev() {
            response = mw.after(response).await;
        }

        response
    }
    .boxed()
}
