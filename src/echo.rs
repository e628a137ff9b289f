//! `GET /` header-echo handler.
//!
//! Copies the request headers onto the response, adds a `Version` header
//! from configuration, and answers with a small HTML page naming the
//! resolved client address.

use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;

use crate::client_ip::resolve_client_address;
use crate::server::AppState;

/// Headers describing the request's own framing; echoing them would
/// corrupt the response.
static NOT_ECHOED: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
        "content-length",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

const VERSION_HEADER: &str = "version";

pub async fn echo_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req_headers: HeaderMap,
) -> Response {
    let mut headers = echo_headers(&req_headers);

    match HeaderValue::from_str(&state.config.version) {
        Ok(version) => {
            headers.append(VERSION_HEADER, version);
        }
        Err(_) => {
            tracing::warn!(version = %state.config.version, "configured version is not a valid header value, skipping");
        }
    }

    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }

    let client_ip = resolve_client_address(&req_headers, &addr.to_string());
    let status = StatusCode::OK;

    let mut response = Response::new(Body::from(render_body(&client_ip)));
    *response.status_mut() = status;
    *response.headers_mut() = headers;

    tracing::info!(client_ip = %client_ip, "request client ip");
    tracing::info!(status = status.as_u16(), "response status code");

    response
}

/// Every request header, in order, minus the framing headers.
fn echo_headers(req_headers: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(req_headers.len() + 2);
    for (name, value) in req_headers {
        tracing::debug!(header = %name, value = ?value, "request header");
        if NOT_ECHOED.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn render_body(client_ip: &str) -> String {
    let mut body = String::from("<h1>Hello World</h1><p><h1>");
    escape_html(&mut body, client_ip);
    body.push_str("</h1></p>");
    body
}

/// The address may come straight from a request header.
fn escape_html(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_repeated_headers_in_order() {
        let mut req = HeaderMap::new();
        req.append("x-custom", "first".parse().unwrap());
        req.append("x-custom", "second".parse().unwrap());
        req.append("accept", "*/*".parse().unwrap());

        let echoed = echo_headers(&req);
        let values: Vec<_> = echoed.get_all("x-custom").iter().collect();
        assert_eq!(values, ["first", "second"]);
        assert_eq!(echoed.get("accept").unwrap(), "*/*");
    }

    #[test]
    fn skips_framing_headers() {
        let mut req = HeaderMap::new();
        req.insert("content-length", "12".parse().unwrap());
        req.insert("connection", "keep-alive".parse().unwrap());
        req.insert("x-custom", "foo".parse().unwrap());

        let echoed = echo_headers(&req);
        assert!(echoed.get("content-length").is_none());
        assert!(echoed.get("connection").is_none());
        assert_eq!(echoed.get("x-custom").unwrap(), "foo");
    }

    #[test]
    fn body_contains_greeting_and_address() {
        let body = render_body("10.0.0.5");
        assert_eq!(body, "<h1>Hello World</h1><p><h1>10.0.0.5</h1></p>");
    }

    #[test]
    fn body_escapes_markup_in_address() {
        let body = render_body("<script>");
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
    }
}
