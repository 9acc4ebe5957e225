//! Access backend calls (`/access/authorize`, `/access/register`).
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the host,
//! which forwards them to the configured backend.
//! Server-side (SSR): stubs returning an error, since forms only submit in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as display strings: the backend's `detail` message
//! when it sent one, otherwise the HTTP status or transport error.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use crate::state::route::{CHATS_PATH, LOGIN_PATH};

pub const AUTHORIZE_ENDPOINT: &str = "/access/authorize";
pub const REGISTER_ENDPOINT: &str = "/access/register";

#[cfg(feature = "hydrate")]
const TOKEN_STORAGE_KEY: &str = "michat_access_token";

/// Validated submission for the access backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessRequest {
    /// Sign in by email or username. Sent as form fields.
    Authorize { login: String, password: String },
    /// Create an account. Sent as a JSON body.
    Register { email: String, username: String, password: String },
}

impl AccessRequest {
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Authorize { .. } => AUTHORIZE_ENDPOINT,
            Self::Register { .. } => REGISTER_ENDPOINT,
        }
    }

    /// Page to open once the backend accepts the request.
    #[must_use]
    pub fn next_path(&self) -> &'static str {
        match self {
            Self::Authorize { .. } => CHATS_PATH,
            Self::Register { .. } => LOGIN_PATH,
        }
    }
}

/// Token pair issued by a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, serde::Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[cfg(any(test, feature = "hydrate"))]
fn accepted(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Message for a rejected request.
///
/// The backend reports errors as `{"detail": "..."}`, or as a list of
/// `{"msg": "..."}` entries for malformed bodies.
#[cfg(any(test, feature = "hydrate"))]
fn error_detail(status: u16, body: &str) -> String {
    let fallback = || format!("request failed: {status}");
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(msg)) => msg.clone(),
        Some(serde_json::Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(fallback, str::to_owned),
        _ => fallback(),
    }
}

/// Send `request` to the access backend. A successful sign-in keeps the
/// access token in `localStorage`.
///
/// # Errors
///
/// Returns the backend's message for a rejected request, or the transport
/// error when the request could not be made.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub async fn submit(request: &AccessRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        match request {
            AccessRequest::Authorize { login, password } => {
                let token = authorize(login, password).await?;
                store_token(&token);
                Ok(())
            }
            AccessRequest::Register { email, username, password } => register(email, username, password).await,
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
async fn authorize(login: &str, password: &str) -> Result<AccessToken, String> {
    let form = web_sys::UrlSearchParams::new().map_err(|_| "form encoding unavailable".to_owned())?;
    form.append("login", login);
    form.append("password", password);

    let resp = gloo_net::http::Request::post(AUTHORIZE_ENDPOINT)
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !accepted(resp.status()) {
        let body = resp.text().await.unwrap_or_default();
        return Err(error_detail(resp.status(), &body));
    }
    resp.json::<AccessToken>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn register(email: &str, username: &str, password: &str) -> Result<(), String> {
    let resp = gloo_net::http::Request::post(REGISTER_ENDPOINT)
        .json(&RegisterBody { email, username, password })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !accepted(resp.status()) {
        let body = resp.text().await.unwrap_or_default();
        return Err(error_detail(resp.status(), &body));
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
fn store_token(token: &AccessToken) {
    if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
        if storage.set_item(TOKEN_STORAGE_KEY, &token.access_token).is_err() {
            log::warn!("failed to store access token");
        }
    }
}
