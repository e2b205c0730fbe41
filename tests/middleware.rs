mod support;

use routelet::{Request, Server, Status, Verb};
use serde_json::json;
use support::{json_body, recorded, terminal, trace};

#[test]
fn deny_all_middleware_short_circuits_every_route() {
    let trace = trace();
    let mut server = Server::new();

    server
        .middleware("*", |_req, res, _next| {
            res.status(Status::Forbidden)
                .send(json!({ "message": "Not authorized!" }));
            Ok(())
        })
        .unwrap();
    server.route(Verb::Get, "/open", vec![terminal(&trace, "open")]);

    // Registered and unregistered routes alike get the middleware's
    // response; the route handlers never run.
    for route in ["/open", "/missing"] {
        let response = server.dispatch(Request::get(route));
        assert_eq!(response.status, Status::Forbidden);
        assert_eq!(json_body(&response)["message"], "Not authorized!");
    }
    assert!(recorded(&trace).is_empty());
}

#[test]
fn gated_middleware_applies_only_to_matching_paths() {
    let mut server = Server::new();
    server
        .middleware("^/admin", |req, res, next| {
            res.headers([("x-admin", "1")]);
            next.run(req, res)
        })
        .unwrap();
    server.get("/admin/users", |_req, res, _next| {
        res.status(Status::Success);
        Ok(())
    });
    server.get("/public", |_req, res, _next| {
        res.status(Status::Success);
        Ok(())
    });

    let response = server.dispatch(Request::get("/admin/users"));
    assert_eq!(response.headers.get("x-admin").map(String::as_str), Some("1"));

    let response = server.dispatch(Request::get("/public"));
    assert!(response.headers.get("x-admin").is_none());
}

#[test]
fn middleware_is_gated_on_the_bare_path() {
    let mut server = Server::new();
    server
        .middleware("^/users$", |req, res, next| {
            res.headers([("x-users", "1")]);
            next.run(req, res)
        })
        .unwrap();
    server.get("/users", |_req, res, _next| {
        res.status(Status::Success);
        Ok(())
    });

    // The query string is stripped before the gate is consulted.
    let response = server.dispatch(Request::get("/users?page=2"));
    assert_eq!(response.headers.get("x-users").map(String::as_str), Some("1"));
}

#[test]
fn locals_flow_across_the_chain() {
    let mut server = Server::new();
    server
        .middleware("*", |req, res, next| {
            res.locals.insert("user".to_owned(), json!("jane"));
            next.run(req, res)
        })
        .unwrap();
    server.get("/whoami", |_req, res, _next| {
        let user = res.locals.get("user").cloned().unwrap_or_default();
        res.status(Status::Success).send(json!({ "user": user }));
        Ok(())
    });

    let response = server.dispatch(Request::get("/whoami"));
    assert_eq!(json_body(&response)["user"], "jane");
}

#[test]
fn headers_merge_shallowly_across_the_chain() {
    let mut server = Server::new();
    server
        .middleware("*", |req, res, next| {
            res.headers([("a", "1"), ("b", "2")]);
            next.run(req, res)
        })
        .unwrap();
    server.get("/merge", |_req, res, _next| {
        res.status(Status::Success).headers([("a", "3")]);
        Ok(())
    });

    let response = server.dispatch(Request::get("/merge"));
    assert_eq!(response.headers["a"], "3");
    assert_eq!(response.headers["b"], "2");
}

#[test]
fn an_all_advancing_chain_ends_in_not_found() {
    let mut server = Server::new();
    server
        .middleware("*", |req, res, next| next.run(req, res))
        .unwrap();

    let response = server.dispatch(Request::get("/nothing-here"));
    assert_eq!(response.status, Status::NotFound);
}

#[test]
fn invalid_middleware_pattern_is_a_registration_error() {
    let mut server = Server::new();
    assert!(server.middleware("(", |req, res, next| next.run(req, res)).is_err());
}

#[test]
fn middleware_sees_the_resolved_identity() {
    let mut server = Server::new();
    server.identity_provider(|| "user2@example.com".to_owned());
    server
        .middleware("*", |req, res, next| {
            if req.identity == "user2@example.com" {
                next.run(req, res)
            } else {
                res.status(Status::Forbidden)
                    .send(json!({ "message": "Not authorized!" }));
                Ok(())
            }
        })
        .unwrap();
    server.get("/secure", |_req, res, _next| {
        res.status(Status::Success);
        Ok(())
    });

    let response = server.dispatch(Request::get("/secure"));
    assert_eq!(response.status, Status::Success);
}
