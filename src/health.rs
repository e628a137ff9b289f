//! `GET /healthz` endpoint handler.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, StatusCode};

use crate::client_ip::resolve_client_address;

pub const HEALTHY_BODY: &str = "success";

pub async fn healthz_handler(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    let client_ip = resolve_client_address(&headers, &addr.to_string());
    tracing::debug!(client_ip = %client_ip, "request healthz");
    (StatusCode::OK, HEALTHY_BODY)
}
