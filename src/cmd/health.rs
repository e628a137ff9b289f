//! `httpsvc health` — check the health of a running instance.
//!
//! Sends a `GET /healthz` request to the specified URL and succeeds only
//! on a 200 whose body is `success`.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::HttpsvcError;
use crate::health::HEALTHY_BODY;

pub async fn execute(args: HealthArgs) -> Result<(), HttpsvcError> {
    let url = format!("{}/healthz", args.url.trim_end_matches('/'));
    let uri: hyper::Uri =
        url.parse()
            .map_err(|e: hyper::http::uri::InvalidUri| HttpsvcError::UriParse {
                source: Box::new(e),
            })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| HttpsvcError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| HttpsvcError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| HttpsvcError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| HttpsvcError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(HttpsvcError::HealthCheckFailed(status));
    }

    let body = String::from_utf8_lossy(&body);
    if body.trim() != HEALTHY_BODY {
        return Err(HttpsvcError::UnexpectedHealthBody(body.into_owned()));
    }

    println!("\u{2713} httpsvc is healthy ({})", args.url);
    Ok(())
}
