#![allow(dead_code)]

use routelet::{handler, Body, Handler, Response, Status};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Shared invocation record for asserting handler ordering.
pub type Trace = Arc<Mutex<Vec<&'static str>>>;

pub fn trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(trace: &Trace) -> Vec<&'static str> {
    trace.lock().unwrap().clone()
}

/// A handler that records its tag and advances the chain.
pub fn passing(trace: &Trace, tag: &'static str) -> Handler {
    let trace = trace.clone();
    handler(move |req, res, next| {
        trace.lock().unwrap().push(tag);
        next.run(req, res)
    })
}

/// A handler that records its tag and terminates the chain with a success
/// response naming it.
pub fn terminal(trace: &Trace, tag: &'static str) -> Handler {
    let trace = trace.clone();
    handler(move |_req, res, _next| {
        trace.lock().unwrap().push(tag);
        res.status(Status::Success).send(json!({ "from": tag }));
        Ok(())
    })
}

pub fn json_body(response: &Response) -> &Value {
    match &response.body {
        Body::Json(value) => value,
        other => panic!("expected a json body, got {:?}", other),
    }
}
