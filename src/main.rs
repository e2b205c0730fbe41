use routelet::{handler, DomainError, Output, Request, Server, Status, Template, Verb};
use serde_json::json;
use tracing_subscriber::EnvFilter;

// A demo application wired the way an embedding host would do it: build the
// server, register middleware and routes, then dispatch a single request
// descriptor and print the negotiated output.

fn server() -> routelet::Result<Server> {
    let mut server = Server::new();

    // Stand-in for a host session lookup.
    server.identity_provider(|| "user1@example.com".to_owned());

    // Everything under /app requires a known caller.
    server.middleware("^/app", |req, res, next| {
        let allowed = ["user1@example.com", "user2@example.com"];
        if allowed.contains(&req.identity.as_str()) {
            next.run(req, res)
        } else {
            res.status(Status::Forbidden)
                .send(json!({ "message": "Not authorized!" }));
            Ok(())
        }
    })?;

    // The app UI markup.
    server.get("/index", |_req, res, _next| {
        res.render(
            Template::Inline("<h1>{{ title }}</h1><p>{{ caller }}</p>"),
            json!({ "title": "routelet demo", "caller": "you" }),
        )?;
        Ok(())
    });

    // Task data for the UI.
    server.get("/app/tasks", |_req, res, _next| {
        res.status(Status::Success).send(json!([
            { "id": "task-001", "title": "Wire the demo server", "done": true },
            { "id": "task-002", "title": "Take a break", "done": false }
        ]));
        Ok(())
    });

    // Saving a task requires a payload.
    server.route(
        Verb::Post,
        "/app/task/save",
        vec![handler(|req, res, _next| {
            if req.body.is_empty() {
                return Err(DomainError::new("a task payload is required").into());
            }
            res.status(Status::Created)
                .send(json!({ "message": "Task saved" }));
            Ok(())
        })],
    );

    server.error_observer(|err, req| {
        tracing::warn!(error = %err, route = %req.raw_route, "observed a failed request");
        Ok(())
    });

    Ok(server)
}

fn main() -> routelet::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = server()?;
    println!("{}", server.inspect());

    // A JSON request descriptor may be passed as the first argument, e.g.
    //   routelet '{"method":"get","route":"/app/tasks"}'
    let request = match std::env::args().nth(1) {
        Some(raw) => Request::from_json(&raw)?,
        None => Request::get("/app/tasks"),
    };

    let response = server.dispatch(request);
    match response.into_output()? {
        Output::Serialized(text) => println!("{}", text),
        Output::Raw(body) => println!("{:?}", body),
        Output::Envelope(envelope) => println!("{:?}", envelope),
    }

    Ok(())
}
