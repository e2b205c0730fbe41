use crate::constants::MATCH_ALL;
use crate::error::Error;
use crate::request::Request;
use crate::response::ResponseBuilder;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

pub use self::chain::Next;
pub(crate) use self::chain::Chain;

mod chain;

/// The result every middleware and route handler returns.
pub type HandlerResult = std::result::Result<(), crate::RouteError>;

/// A boxed middleware/route handler.
///
/// A handler receives the request, the shared response accumulator, and the
/// [`Next`] continuation for the rest of the chain. Calling
/// [`Next::run`] advances the chain; returning without calling it
/// short-circuits.
pub type Handler =
    Box<dyn Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult + Send + Sync + 'static>;

/// Boxes a closure or function into a [`Handler`], for building multi-step
/// route chains.
pub fn handler<H>(h: H) -> Handler
where
    H: Fn(&mut Request, &mut ResponseBuilder, Next<'_>) -> HandlerResult + Send + Sync + 'static,
{
    Box::new(h)
}

/// A global middleware entry: a handler gated by a path predicate.
///
/// The pattern `"*"` applies to every request; any other pattern compiles
/// to a regular expression tested against the bare request path. An entry
/// whose predicate rejects the path is skipped transparently; the chain
/// advances as if it had called its continuation.
pub struct Middleware {
    pub(crate) path: String,
    gate: Gate,
    pub(crate) handler: Handler,
}

enum Gate {
    Any,
    Pattern(Regex),
}

impl Middleware {
    pub(crate) fn new<P: Into<String>>(path: P, handler: Handler) -> crate::Result<Middleware> {
        let path = path.into();
        let gate = if path == MATCH_ALL {
            Gate::Any
        } else {
            let regex = Regex::new(&path).map_err(|e| {
                Error::new(format!(
                    "could not compile the middleware path pattern {:?}: {}",
                    path, e
                ))
            })?;
            Gate::Pattern(regex)
        };

        Ok(Middleware { path, gate, handler })
    }

    pub(crate) fn applies_to(&self, path: &str) -> bool {
        match &self.gate {
            Gate::Any => true,
            Gate::Pattern(regex) => regex.is_match(path),
        }
    }
}

impl Debug for Middleware {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ path: {:?} }}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::Middleware;

    #[test]
    fn match_all_applies_everywhere() {
        let mw = Middleware::new("*", Box::new(|_req, _res, _next| Ok(()))).unwrap();
        assert!(mw.applies_to("/anything"));
        assert!(mw.applies_to(""));
    }

    #[test]
    fn pattern_gates_by_path() {
        let mw = Middleware::new("^/admin", Box::new(|_req, _res, _next| Ok(()))).unwrap();
        assert!(mw.applies_to("/admin/users"));
        assert!(!mw.applies_to("/public"));
    }

    #[test]
    fn invalid_pattern_fails_at_registration() {
        assert!(Middleware::new("(", Box::new(|_req, _res, _next| Ok(()))).is_err());
    }
}
