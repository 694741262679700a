//! HTTP routes for the inbound webhook.

mod webhook;

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use webhook::{Update, WebhookState};

/// Creates the webhook router with all routes.
pub fn webhook_routes(state: WebhookState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(webhook::root))
        .route("/ping", get(webhook::ping))
        .route("/webhook", post(webhook::webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
