use bytes::Bytes;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A request or response payload, resolved to an explicit shape before it
/// reaches a handler: absent, opaque bytes, text/markup, or a structured
/// value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    #[default]
    Empty,
    Raw(Bytes),
    Text(String),
    Json(Value),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// The structured value, if this is a `Json` body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::Empty => serializer.serialize_unit(),
            Body::Raw(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Body::Text(text) => serializer.serialize_str(text),
            Body::Json(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Body::from(Value::deserialize(deserializer)?))
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Body {
        match value {
            Value::Null => Body::Empty,
            Value::String(text) => Body::Text(text),
            other => Body::Json(other),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Body {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Body {
        Body::Text(text.to_owned())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Body {
        Body::Raw(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Body {
        Body::Raw(Bytes::from(bytes))
    }
}

/// An incoming request descriptor.
///
/// Deserializable from the JSON object a host adapter delivers; unknown
/// fields are ignored and every field has a default (`method` defaults to
/// `"get"`), so a sparse descriptor is still a clean request. The
/// `identity`, `auth` and `raw_route` fields are attached by the dispatcher
/// and never read from the descriptor.
///
/// `route` arrives as the raw path-plus-query string and is rewritten to
/// the bare path once the query pairs are merged into `params`; the
/// original string stays available in `raw_route`.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub body: Body,
    /// The caller identity resolved by the server's identity provider.
    #[serde(skip)]
    pub identity: String,
    /// Per-request authentication context, cleared at the start of every
    /// dispatch.
    #[serde(skip)]
    pub auth: HashMap<String, String>,
    /// The route string exactly as it arrived, before query extraction.
    #[serde(skip)]
    pub raw_route: String,
}

fn default_method() -> String {
    "get".to_owned()
}

impl Request {
    pub fn new<M: Into<String>, R: Into<String>>(method: M, route: R) -> Request {
        Request {
            method: method.into(),
            headers: HashMap::new(),
            route: route.into(),
            params: HashMap::new(),
            body: Body::Empty,
            identity: String::new(),
            auth: HashMap::new(),
            raw_route: String::new(),
        }
    }

    pub fn get<R: Into<String>>(route: R) -> Request {
        Request::new("get", route)
    }

    pub fn post<R: Into<String>>(route: R) -> Request {
        Request::new("post", route)
    }

    pub fn delete<R: Into<String>>(route: R) -> Request {
        Request::new("delete", route)
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Request {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Request {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_body<B: Into<Body>>(mut self, body: B) -> Request {
        self.body = body.into();
        self
    }

    /// Parses a request descriptor delivered as a JSON string.
    pub fn from_json(raw: &str) -> crate::Result<Request> {
        serde_json::from_str(raw).map_err(Into::into)
    }
}
