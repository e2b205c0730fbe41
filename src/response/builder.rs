use super::{Mime, Response, Status};
use crate::request::Body;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// A template source for [`ResponseBuilder::render`]: either an inline
/// source string or a file to read it from.
#[derive(Debug, Clone, Copy)]
pub enum Template<'t> {
    Inline(&'t str),
    File(&'t Path),
}

/// The mutable response accumulator handed to every middleware and route
/// handler in a chain.
///
/// The fluent mutators return `&mut Self` so calls chain; the finished
/// [`Response`] is extracted once by the dispatcher. `locals` is a freeform
/// bag for passing data between the elements of one chain; it lives exactly
/// as long as the dispatch and is never part of the envelope.
///
/// ```
/// # use routelet::Server;
/// # use routelet::Status;
/// # use serde_json::json;
/// let mut server = Server::new();
/// server.get("/ping", |_req, res, _next| {
///     res.status(Status::Success)
///         .headers([("x-served-by", "routelet")])
///         .send(json!({ "pong": true }));
///     Ok(())
/// });
/// ```
pub struct ResponseBuilder {
    res: Response,
    pub locals: HashMap<String, Value>,
}

impl ResponseBuilder {
    pub(crate) fn new() -> ResponseBuilder {
        ResponseBuilder {
            res: Response::new(),
            locals: HashMap::new(),
        }
    }

    /// Sets the response status.
    pub fn status(&mut self, status: Status) -> &mut Self {
        self.res.status = status;
        self
    }

    /// Sets the response content kind.
    pub fn mime(&mut self, mime: Mime) -> &mut Self {
        self.res.mime = mime;
        self
    }

    /// Shallow-merges headers into the response; existing keys are
    /// overwritten, everything else is kept.
    pub fn headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.res.headers.insert(key.into(), value.into());
        }
        self
    }

    /// Sets the response body. The status is left untouched.
    pub fn send<B: Into<Body>>(&mut self, body: B) -> &mut Self {
        self.res.body = body.into();
        self
    }

    /// Renders a template to markup and stores it as the body, forcing
    /// `status = Success` and `mime = Html` as a side effect, deliberately
    /// overriding anything set earlier. Render failures are faults.
    pub fn render<P: Serialize>(
        &mut self,
        template: Template<'_>,
        props: P,
    ) -> crate::Result<&mut Self> {
        let source: Cow<'_, str> = match template {
            Template::Inline(source) => Cow::Borrowed(source),
            Template::File(path) => Cow::Owned(std::fs::read_to_string(path)?),
        };

        let env = minijinja::Environment::new();
        let markup = env.render_str(&source, props)?;

        self.res.status = Status::Success;
        self.res.mime = Mime::Html;
        self.res.body = Body::Text(markup);
        Ok(self)
    }

    /// True iff the current status lies in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        self.res.status.is_success()
    }

    /// A read-only view of the response accumulated so far.
    pub fn response(&self) -> &Response {
        &self.res
    }

    pub(crate) fn into_response(self) -> Response {
        self.res
    }
}

#[cfg(test)]
mod tests {
    use super::{ResponseBuilder, Template};
    use crate::request::Body;
    use crate::response::{Mime, Status};
    use serde_json::json;

    #[test]
    fn mutators_chain_and_merge() {
        let mut builder = ResponseBuilder::new();
        builder
            .status(Status::Created)
            .mime(Mime::Csv)
            .headers([("a", "1"), ("b", "2")])
            .headers([("a", "overridden")])
            .send("x,y\n1,2");

        let response = builder.into_response();
        assert_eq!(response.status, Status::Created);
        assert_eq!(response.mime, Mime::Csv);
        assert_eq!(response.headers["a"], "overridden");
        assert_eq!(response.headers["b"], "2");
        assert_eq!(response.body, Body::Text("x,y\n1,2".to_owned()));
    }

    #[test]
    fn send_leaves_status_alone() {
        let mut builder = ResponseBuilder::new();
        builder.send(json!({ "ok": true }));
        assert_eq!(builder.response().status, Status::Unset);
        assert!(!builder.is_success());
    }

    #[test]
    fn render_forces_success_html() {
        let mut builder = ResponseBuilder::new();
        builder.status(Status::BadRequest).mime(Mime::Csv);
        builder
            .render(Template::Inline("<h1>{{ title }}</h1>"), json!({ "title": "hi" }))
            .unwrap();

        let response = builder.into_response();
        assert_eq!(response.status, Status::Success);
        assert_eq!(response.mime, Mime::Html);
        assert_eq!(response.body, Body::Text("<h1>hi</h1>".to_owned()));
    }

    #[test]
    fn render_failure_is_a_fault() {
        let mut builder = ResponseBuilder::new();
        assert!(builder
            .render(Template::Inline("{{ unclosed"), json!({}))
            .is_err());
    }
}
