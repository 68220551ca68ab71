use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::errors::{AppError, AppResult};
use crate::AppState;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default, Deserialize)]
pub struct ProxyParams {
    pub url: Option<String>,
}

/// Fetch and relay a remote image so the site can render hosts that do not
/// send CORS headers. Only http(s) URLs whose hostname is on the configured
/// allow-list are fetched; an upstream failure surfaces the upstream status.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> AppResult<Response> {
    let raw = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("url parameter is required"))?;

    let url = Url::parse(raw).map_err(|_| AppError::bad_request("url parameter is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::bad_request("Only http and https URLs can be proxied"));
    }
    let host = url
        .host_str()
        .ok_or_else(|| AppError::bad_request("url parameter has no host"))?;
    if !state
        .config
        .proxy_allowed_hosts
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(host))
    {
        return Err(AppError::forbidden("Image host is not allowed"));
    }

    let client_ip = state.client_ip.resolve().await;
    let upstream = state
        .http
        .get(url.clone())
        .timeout(FETCH_TIMEOUT)
        .header("X-Client-IP", &client_ip)
        .header("X-Forwarded-For", &client_ip)
        .send()
        .await
        .map_err(|err| {
            warn!(url = %url, error = %err, "image fetch failed");
            AppError::bad_gateway("Failed to fetch image")
        })?;

    let status = upstream.status();
    if !status.is_success() {
        let mapped =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(AppError::new(
            mapped,
            format!("Upstream returned {}", status.as_u16()),
        ));
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();
    let bytes = upstream.bytes().await.map_err(|err| {
        warn!(url = %url, error = %err, "image body read failed");
        AppError::bad_gateway("Failed to read image body")
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("image/jpeg")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    Ok((headers, bytes).into_response())
}
