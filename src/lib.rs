//! `routelet` is a lightweight, synchronous, embeddable request router with
//! middleware support, for host environments that deliver one request at a
//! time and expect one response value back: no sockets, no async runtime.
//!
//! Core features:
//!
//! - 🌀 Ordered middleware with an explicit `next` continuation; a handler
//!   that doesn't advance the chain short-circuits it
//! - 🧩 Named route parameters (`/users/:id`) with segment-wise matching,
//!   so adjacent parameters (`/pair/:a/:b`) are unambiguous
//! - 🍺 A fluent response builder with status/type/header/body setters, a
//!   per-request `locals` bag, and template rendering
//! - ❗ A uniform error pipeline: deliberate [`DomainError`]s keep their
//!   status and message, anything else becomes a generic server error, and
//!   registered error observers are notified in isolation
//!
//! ## Basic example
//!
//! ```
//! use routelet::{Request, Server, Status};
//! use serde_json::json;
//!
//! let mut server = Server::new();
//!
//! // A global middleware: stamp every response, then continue the chain.
//! server.middleware("*", |req, res, next| {
//!     res.headers([("x-served-by", "routelet")]);
//!     next.run(req, res)
//! })?;
//!
//! // A route with a named parameter.
//! server.get("/users/:id", |req, res, _next| {
//!     let id = req.params.get("id").cloned().unwrap_or_default();
//!     res.status(Status::Success).send(json!({ "id": id }));
//!     Ok(())
//! });
//!
//! let response = server.dispatch(Request::get("/users/42"));
//! assert_eq!(response.status, Status::Success);
//!
//! // Unregistered routes fall through to the NOT_FOUND terminal.
//! let response = server.dispatch(Request::get("/missing"));
//! assert_eq!(response.status, Status::NotFound);
//! # Ok::<(), routelet::RouteError>(())
//! ```
//!
//! ## Route chains
//!
//! A route may register several handlers; each receives the request, the
//! shared response builder and its continuation, exactly like a global
//! middleware:
//!
//! ```
//! use routelet::{handler, Request, Server, Status, Verb};
//! use serde_json::json;
//!
//! let mut server = Server::new();
//! server.route(
//!     Verb::Post,
//!     "/tasks",
//!     vec![
//!         handler(|req, res, next| {
//!             if req.body.is_empty() {
//!                 res.status(Status::BadRequest).send(json!({ "message": "a payload is required" }));
//!                 return Ok(());
//!             }
//!             next.run(req, res)
//!         }),
//!         handler(|_req, res, _next| {
//!             res.status(Status::Created).send(json!({ "saved": true }));
//!             Ok(())
//!         }),
//!     ],
//! );
//!
//! let response = server.dispatch(Request::post("/tasks"));
//! assert_eq!(response.status, Status::BadRequest);
//! ```
//!
//! ## Output negotiation
//!
//! The host adapter asks the finished [`Response`] for its negotiated
//! [`Output`]: JSON-typed responses serialize the whole envelope to text,
//! RAW-typed responses pass their body through opaquely, and everything
//! else stays a structured envelope (e.g. rendered markup).

pub use self::error::{DomainError, Error, RouteError};
pub use self::middleware::{handler, Handler, HandlerResult, Middleware, Next};
pub use self::request::{Body, Request};
pub use self::response::{Mime, Output, Response, ResponseBuilder, Status, Template};
pub use self::router::{ErrorObserver, Options, Server, Verb};

mod constants;
mod error;
mod helpers;
mod middleware;
mod pattern;
mod request;
mod response;
mod router;

/// A Result type often returned from methods that can have routelet errors.
pub type Result<T> = std::result::Result<T, RouteError>;
