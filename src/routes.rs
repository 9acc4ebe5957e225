//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the health endpoint, the panel icon assets and the
//! access backend pass-through next to the Leptos SSR app under a single
//! Axum router. Paths the client route table
//! does not register fall through to the Leptos file-and-error handler, which
//! serves `/pkg` files or renders the app's not-found view.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, file_and_error_handler, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::access::{self, AccessProxy};
use crate::config::ServerConfig;

/// Routes that do not depend on Leptos configuration.
///
/// # Errors
///
/// Returns an error if the access backend client cannot be built.
pub fn base_routes(config: &ServerConfig) -> Result<Router, String> {
    let proxy = AccessProxy::new(config.access_upstream.clone()).map_err(|e| e.to_string())?;
    Ok(Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .merge(access::routes(proxy)))
}

/// Full application: base routes + Leptos SSR for the client route table.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded or the
/// access backend client cannot be built.
pub fn app(config: &ServerConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);
    tracing::debug!(count = routes.len(), "leptos routes generated");

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(file_and_error_handler(client::app::shell))
        .with_state(leptos_options);

    Ok(base_routes(config)?
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
