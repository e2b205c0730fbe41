use super::{Server, Verb};
use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::error::DomainError;
use crate::helpers;
use crate::middleware::{Chain, Handler};
use crate::request::Request;
use crate::response::{Response, ResponseBuilder, Status};
use crate::RouteError;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, error};

impl Server {
    /// Dispatches one request through the global middleware and the
    /// resolved route chain and returns the finalized response.
    ///
    /// Every synchronous fault raised along the way is caught here and
    /// converted into an error response; this method never fails.
    pub fn dispatch(&self, mut req: Request) -> Response {
        let started = Instant::now();

        let response = match self.run(&mut req) {
            Ok(response) => response,
            Err(fault) => self.fail(fault, &req),
        };

        debug!(
            method = %req.method,
            route = %req.raw_route,
            status = %response.status,
            elapsed = ?started.elapsed(),
            "dispatch complete"
        );

        response
    }

    fn run(&self, req: &mut Request) -> crate::Result<Response> {
        req.identity = self.resolve_identity();
        req.auth.clear();
        req.raw_route = req.route.clone();

        // Carve the query string off the route and merge the decoded pairs
        // into params; later keys win. The route itself is rewritten to the
        // bare path from here on.
        let (path, query) = helpers::split_route(&req.raw_route);
        if let Some(query) = query {
            for (key, value) in helpers::parse_query(query)? {
                req.params.insert(key, value);
            }
        }
        req.route = path.to_owned();

        let no_handlers: &[Handler] = &[];
        let handlers = match Verb::parse(&req.method) {
            Some(verb) => self.resolve_chain(verb, req)?,
            None => no_handlers,
        };

        let mut builder = ResponseBuilder::new();
        Chain::new(self.global_middleware(), handlers).run(req, &mut builder)?;

        let mut response = builder.into_response();
        if response.status == Status::Unset {
            // The sentinel must never reach a caller; a chain that sent a
            // body without picking a status is treated as a success.
            debug!(route = %req.route, "status left unset by the handler chain; defaulting to success");
            response.status = Status::Success;
        }
        Ok(response)
    }

    /// Exact pattern match first; otherwise the first registered tokenized
    /// pattern that matches wins and its extracted parameters are merged
    /// into `params` (overriding query parameters of the same name). No
    /// match resolves to an empty chain.
    fn resolve_chain<'s>(&'s self, verb: Verb, req: &mut Request) -> crate::Result<&'s [Handler]> {
        let table = self.table(verb);

        if let Some(route) = table
            .iter()
            .find(|route| route.pattern.as_str() == req.route)
        {
            return Ok(&route.handlers);
        }

        for route in table.iter().filter(|route| route.pattern.has_params()) {
            if route.pattern.matches(&req.route) {
                let extracted = route.pattern.params(&req.route)?;
                req.params.extend(extracted);
                return Ok(&route.handlers);
            }
        }

        Ok(&[])
    }

    /// The error pipeline: builds a fresh error response (any partially
    /// accumulated response is discarded), then notifies every observer,
    /// each inside its own fault boundary.
    fn fail(&self, fault: RouteError, req: &Request) -> Response {
        error!(error = %fault, route = %req.raw_route, "request failed");

        let mut builder = ResponseBuilder::new();
        match fault.downcast_ref::<DomainError>() {
            Some(domain) => {
                builder
                    .status(domain.status)
                    .send(json!({ "message": domain.message.clone() }));
            }
            None => {
                let mut body = json!({ "message": GENERIC_ERROR_MESSAGE });
                if self.options.debug {
                    body["detail"] = Value::String(format!("{:?}", fault));
                }
                builder.status(Status::ServerError).send(body);
            }
        }

        for observer in self.observers() {
            if let Err(inner) = observer(&fault, req) {
                error!(error = %inner, "an error observer failed; ignoring");
            }
        }

        if self.options.debug {
            debug!(request = ?req, "request state at failure");
        }

        builder.into_response()
    }
}
