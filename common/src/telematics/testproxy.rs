use std::thread;
use tiny_http::{Header, Response, Server, StatusCode};

/// Starts a throwaway telematics proxy on an ephemeral port and returns its base
/// URL. `route` maps a request path to `(status, body)`.
pub(crate) fn serve(route: fn(&str) -> (u16, &'static str)) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let (status, body) = route(request.url());
            let content_type = Header::from_bytes("Content-Type", "application/json").unwrap();
            let response = Response::from_string(body)
                .with_status_code(StatusCode(status))
                .with_header(content_type);
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}")
}
