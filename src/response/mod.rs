use crate::request::Body;
use serde::ser::Serializer;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

pub use self::builder::{ResponseBuilder, Template};

mod builder;

/// The enumerated response status codes. `Unset` (999) is the pre-dispatch
/// sentinel; the dispatcher guarantees it never reaches a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Created,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    Unset,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Success => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::Unauthorized => 401,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::ServerError => 500,
            Status::Unset => 999,
        }
    }

    /// True iff the code lies in `[200, 300)`.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// The enumerated response content kinds. `Js` and `Raw` are in-process
/// kinds rather than real mime types: `Js` hands the structured envelope
/// to the host adapter untouched, `Raw` passes the body through opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mime {
    Json,
    Html,
    Csv,
    Js,
    Raw,
}

impl Mime {
    pub fn as_str(self) -> &'static str {
        match self {
            Mime::Json => "application/json",
            Mime::Html => "text/html",
            Mime::Csv => "text/csv",
            Mime::Js => "js/object",
            Mime::Raw => "data/raw",
        }
    }
}

impl Display for Mime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The response envelope handed back to the host adapter.
///
/// Serializes as `{ "status": …, "type": …, "headers": …, "body": … }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(rename = "type")]
    pub mime: Mime,
    pub headers: HashMap<String, String>,
    pub body: Body,
}

impl Response {
    pub(crate) fn new() -> Response {
        Response {
            status: Status::Unset,
            mime: Mime::Json,
            headers: HashMap::new(),
            body: Body::Empty,
        }
    }

    /// Negotiates the final output format, consuming (and thereby freezing)
    /// the response: a `Json`-typed response serializes the whole envelope
    /// to text, a `Raw`-typed response passes its body through opaquely,
    /// and every other kind returns the structured envelope for the host
    /// adapter to interpret (e.g. markup output).
    pub fn into_output(self) -> crate::Result<Output> {
        match self.mime {
            Mime::Json => {
                let text = serde_json::to_string(&self)?;
                Ok(Output::Serialized(text))
            }
            Mime::Raw => Ok(Output::Raw(self.body)),
            _ => Ok(Output::Envelope(self)),
        }
    }
}

/// The negotiated output of a dispatch, ready for the host adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The serialized text form of the whole envelope.
    Serialized(String),
    /// The opaque body of a `Raw`-typed response.
    Raw(Body),
    /// The structured envelope, untouched.
    Envelope(Response),
}
