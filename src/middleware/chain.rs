use super::{Handler, HandlerResult, Middleware};
use crate::error::Error;
use crate::request::Request;
use crate::response::{ResponseBuilder, Status};
use serde_json::json;
use std::cmp::Ordering;

/// One element of a resolved handler chain: a gated global middleware or a
/// route handler.
pub(crate) enum Link<'s> {
    Gate(&'s Middleware),
    Route(&'s Handler),
}

/// The ordered execution chain for one dispatch: every global middleware
/// followed by the route-specific handlers.
pub(crate) struct Chain<'s> {
    links: Vec<Link<'s>>,
}

impl<'s> Chain<'s> {
    pub(crate) fn new(middleware: &'s [Middleware], handlers: &'s [Handler]) -> Chain<'s> {
        let links = middleware
            .iter()
            .map(Link::Gate)
            .chain(handlers.iter().map(Link::Route))
            .collect();
        Chain { links }
    }

    pub(crate) fn run(&self, req: &mut Request, res: &mut ResponseBuilder) -> HandlerResult {
        Next {
            links: &self.links,
            cursor: 0,
        }
        .run(req, res)
    }
}

/// The continuation handed to each chain element.
///
/// `run` consumes the continuation, so an element can advance the chain at
/// most once; dropping it without calling `run` short-circuits the chain
/// (the response accumulated so far is the terminal response). Running off
/// the end of the chain (no route matched, or every element advanced)
/// produces the NOT_FOUND terminal response.
pub struct Next<'c> {
    links: &'c [Link<'c>],
    cursor: usize,
}

impl<'c> Next<'c> {
    /// Advances execution to the next chain element.
    pub fn run(self, req: &mut Request, res: &mut ResponseBuilder) -> HandlerResult {
        match self.cursor.cmp(&self.links.len()) {
            // The cursor can never be constructed past the terminal index;
            // reject loudly rather than mask a composer bug.
            Ordering::Greater => Err(Error::new(format!(
                "the handler chain advanced past its terminal index: {}",
                self.cursor
            ))
            .into()),
            Ordering::Equal => {
                res.status(Status::NotFound)
                    .send(json!({ "message": format!("{} not a valid route!", req.route) }));
                Ok(())
            }
            Ordering::Less => {
                let next = Next {
                    links: self.links,
                    cursor: self.cursor + 1,
                };
                match &self.links[self.cursor] {
                    Link::Gate(mw) => {
                        if mw.applies_to(&req.route) {
                            (mw.handler)(req, res, next)
                        } else {
                            next.run(req, res)
                        }
                    }
                    Link::Route(handler) => handler(req, res, next),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Chain, Next};
    use crate::middleware::{handler, Middleware};
    use crate::request::Request;
    use crate::response::{ResponseBuilder, Status};

    #[test]
    fn empty_chain_is_a_routing_miss() {
        let chain = Chain::new(&[], &[]);
        let mut req = Request::get("/nowhere");
        let mut res = ResponseBuilder::new();

        chain.run(&mut req, &mut res).unwrap();
        assert_eq!(res.response().status, Status::NotFound);
    }

    #[test]
    fn gated_middleware_is_skipped_transparently() {
        let mw = Middleware::new(
            "^/admin",
            Box::new(|_req, res, _next| {
                res.status(Status::Forbidden);
                Ok(())
            }),
        )
        .unwrap();
        let middleware = [mw];
        let handlers = [handler(|_req, res, _next| {
            res.status(Status::Success);
            Ok(())
        })];

        let chain = Chain::new(&middleware, &handlers);
        let mut req = Request::get("/public");
        let mut res = ResponseBuilder::new();
        chain.run(&mut req, &mut res).unwrap();
        assert_eq!(res.response().status, Status::Success);
    }

    #[test]
    fn cursor_past_terminal_fails_loudly() {
        let next = Next {
            links: &[],
            cursor: 1,
        };
        let mut req = Request::get("/x");
        let mut res = ResponseBuilder::new();
        assert!(next.run(&mut req, &mut res).is_err());
    }
}
