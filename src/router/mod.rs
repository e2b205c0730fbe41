use crate::middleware::{Handler, HandlerResult, Middleware, Next};
use crate::pattern::RoutePattern;
use crate::request::Request;
use crate::response::ResponseBuilder;
use serde::Deserialize;
use std::fmt::{self, Debug, Formatter};

mod dispatch;

/// The request verbs with a routing table of their own.
///
/// An incoming method string that parses to none of these is tolerated:
/// lookup simply uses an empty table and the dispatch falls through to the
/// NOT_FOUND terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub(crate) fn parse(method: &str) -> Option<Verb> {
        if method.eq_ignore_ascii_case("get") {
            Some(Verb::Get)
        } else if method.eq_ignore_ascii_case("post") {
            Some(Verb::Post)
        } else if method.eq_ignore_ascii_case("delete") {
            Some(Verb::Delete)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server construction options.
///
/// `debug` attaches fault diagnostics to unexpected-error responses and
/// enables extra dispatch logging; leave it off anywhere responses can
/// reach an untrusted caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    pub debug: bool,
}

/// An observer invoked after an error response has been finalized. Each
/// observer receives the fault and the request; a failing observer is
/// logged and never affects the response.
pub type ErrorObserver =
    Box<dyn Fn(&crate::RouteError, &Request) -> crate::Result<()> + Send + Sync + 'static>;

type IdentityFn = Box<dyn Fn() -> String + Send + Sync + 'static>;

pub(crate) struct Route {
    pub(crate) pattern: RoutePattern,
    pub(crate) handlers: Vec<Handler>,
}

/// The router: owns the per-verb route tables, the global middleware list
/// and the error observer list, and dispatches one request at a time.
///
/// Registration mutates the server in place and happens before any
/// dispatch; the tables are read-only while a request runs.
///
/// ```
/// use routelet::{Request, Server, Status};
/// use serde_json::json;
///
/// let mut server = Server::new();
/// server.get("/users/:id", |req, res, _next| {
///     res.status(Status::Success).send(json!({ "id": req.params["id"] }));
///     Ok(())
/// });
///
/// let response = server.dispatch(Request::get("/users/42"));
/// assert!(response.status.is_success());
/// ```
pub struct Server {
    options: Options,
    middleware: Vec<Middleware>,
    gets: Vec<Route>,
    posts: Vec<Route>,
    deletes: Vec<Route>,
    observers: Vec<ErrorObserver>,
    identity: IdentityFn,
}

impl Server {
    pub fn new() -> Server {
        Server::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Server {
        Server {
            options,
            middleware: Vec::new(),
            gets: Vec::new(),
            posts: Vec::new(),
            deletes: Vec::new(),
            observers: Vec::new(),
            identity: Box::new(String::new),
        }
    }

    /// Appends a global middleware gated by a path pattern: `"*"` applies
    /// everywhere, anything else is a regular expression tested against the
    /// bare request path. Fails if the pattern does not compile.
    ///
    /// Middleware runs ahead of every route chain in registration order. A
    /// middleware that returns without calling `next.run(..)`
    /// short-circuits the whole chain.
    ///
    /// ```
    /// use routelet::{Server, Status};
    /// use serde_json::json;
    ///
    /// let mut server = Server::new();
    /// server.middleware("*", |req, res, next| {
    ///     if req.headers.contains_key("x-api-key") {
    ///         next.run(req, res)
    ///     } else {
    ///         res.status(Status::Unauthorized).send(json!({ "message": "missing key" }));
    ///         Ok(())
    ///     }
    /// })?;
    /// # Ok::<(), routelet::RouteError>(())
    /// ```
    pub fn middleware<P, H>(&mut self, pattern: P, handler: H) -> crate::Result<&mut Self>
    where
        P: Into<String>,
        H: Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.middleware
            .push(Middleware::new(pattern, Box::new(handler))?);
        Ok(self)
    }

    /// Registers a handler chain for a verb and route pattern. The pattern
    /// may contain named-parameter segments (`/users/:id`). Registering the
    /// same pattern again fully replaces the previous chain (last write
    /// wins, table position preserved).
    pub fn route<P>(&mut self, verb: Verb, pattern: P, handlers: Vec<Handler>) -> &mut Self
    where
        P: Into<String>,
    {
        let pattern = RoutePattern::parse(pattern);
        let table = self.table_mut(verb);
        match table
            .iter_mut()
            .find(|route| route.pattern.as_str() == pattern.as_str())
        {
            Some(existing) => existing.handlers = handlers,
            None => table.push(Route { pattern, handlers }),
        }
        self
    }

    /// Registers a single GET handler. Sugar for [`Server::route`].
    pub fn get<P, H>(&mut self, pattern: P, handler: H) -> &mut Self
    where
        P: Into<String>,
        H: Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.route(Verb::Get, pattern, vec![Box::new(handler) as Handler])
    }

    /// Registers a single POST handler. Sugar for [`Server::route`].
    pub fn post<P, H>(&mut self, pattern: P, handler: H) -> &mut Self
    where
        P: Into<String>,
        H: Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.route(Verb::Post, pattern, vec![Box::new(handler) as Handler])
    }

    /// Registers a single DELETE handler. Sugar for [`Server::route`].
    pub fn delete<P, H>(&mut self, pattern: P, handler: H) -> &mut Self
    where
        P: Into<String>,
        H: Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.route(Verb::Delete, pattern, vec![Box::new(handler) as Handler])
    }

    /// Appends an error observer, invoked in registration order after an
    /// error response has been finalized.
    pub fn error_observer<H>(&mut self, observer: H) -> &mut Self
    where
        H: Fn(&crate::RouteError, &Request) -> crate::Result<()> + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Sets the caller-identity provider consulted at the start of every
    /// dispatch (e.g. resolving the active host session). The default
    /// provider returns an empty identity.
    pub fn identity_provider<F>(&mut self, provider: F) -> &mut Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.identity = Box::new(provider);
        self
    }

    /// Returns a human-readable dump of the registered route patterns
    /// grouped by verb. Diagnostic only, with no parsing contract, but the
    /// output is a pure function of the tables, so repeated calls without
    /// intervening registrations are identical.
    pub fn inspect(&self) -> String {
        let mut details = String::from("routelet inspect:\n\n");
        for (title, table) in [
            ("GET ROUTES", &self.gets),
            ("POST ROUTES", &self.posts),
            ("DELETE ROUTES", &self.deletes),
        ] {
            details.push_str(title);
            details.push('\n');
            details.push_str("---------------------\n");
            for route in table {
                details.push_str(route.pattern.as_str());
                details.push('\n');
            }
            details.push_str("---------------------\n\n");
        }
        details
    }

    pub(crate) fn global_middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    pub(crate) fn observers(&self) -> &[ErrorObserver] {
        &self.observers
    }

    pub(crate) fn resolve_identity(&self) -> String {
        (self.identity)()
    }

    pub(crate) fn table(&self, verb: Verb) -> &[Route] {
        match verb {
            Verb::Get => &self.gets,
            Verb::Post => &self.posts,
            Verb::Delete => &self.deletes,
        }
    }

    fn table_mut(&mut self, verb: Verb) -> &mut Vec<Route> {
        match verb {
            Verb::Get => &mut self.gets,
            Verb::Post => &mut self.posts,
            Verb::Delete => &mut self.deletes,
        }
    }
}

impl Default for Server {
    fn default() -> Server {
        Server::new()
    }
}

impl Debug for Server {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ middleware: {}, gets: {}, posts: {}, deletes: {}, observers: {} }}",
            self.middleware.len(),
            self.gets.len(),
            self.posts.len(),
            self.deletes.len(),
            self.observers.len()
        )
    }
}
