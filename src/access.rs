//! Pass-through to the access backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page posts sign-in (form fields) and registration (JSON) to
//! `/access/*` on this host. Each request is forwarded to the backend named
//! by `ACCESS_UPSTREAM` with its content type and body unchanged, and the
//! backend's status, content type and body are returned as-is. Without an
//! upstream the routes answer 503 with a `detail` message the page can show.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

pub const AUTHORIZE_PATH: &str = "/access/authorize";
pub const REGISTER_PATH: &str = "/access/register";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("access backend is not configured")]
    NotConfigured,
    #[error("access backend unreachable: {0}")]
    Upstream(String),
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::HttpClientBuild(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

pub struct AccessProxy {
    http: reqwest::Client,
    upstream: Option<String>,
}

impl AccessProxy {
    /// # Errors
    ///
    /// Returns [`AccessError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(upstream: Option<String>) -> Result<Self, AccessError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AccessError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, upstream })
    }

    async fn forward(&self, path: &str, content_type: Option<&HeaderValue>, body: Bytes) -> Result<Response, AccessError> {
        let upstream = self.upstream.as_deref().ok_or(AccessError::NotConfigured)?;

        let mut request = self.http.post(upstream_url(upstream, path)).body(body);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type.clone());
        }
        let response = request.send().await.map_err(|e| AccessError::Upstream(e.to_string()))?;

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(|e| AccessError::Upstream(e.to_string()))?;

        let mut out = (status, body).into_response();
        if let Some(content_type) = content_type {
            out.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        Ok(out)
    }
}

/// `POST` routes for sign-in and registration.
pub fn routes(proxy: AccessProxy) -> Router {
    Router::new()
        .route(AUTHORIZE_PATH, post(forward))
        .route(REGISTER_PATH, post(forward))
        .with_state(Arc::new(proxy))
}

async fn forward(
    State(proxy): State<Arc<AccessProxy>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AccessError> {
    let result = proxy.forward(uri.path(), headers.get(header::CONTENT_TYPE), body).await;
    match &result {
        Ok(response) => tracing::debug!(path = uri.path(), status = %response.status(), "access request forwarded"),
        Err(e) => tracing::warn!(path = uri.path(), error = %e, "access request failed"),
    }
    result
}

fn upstream_url(upstream: &str, path: &str) -> String {
    format!("{}{path}", upstream.trim_end_matches('/'))
}
