//! Inbound webhook - the HTTP face of the bot.
//!
//! Three routes: a liveness text at `/`, a JSON ping at `/ping`, and the
//! update intake at `POST /webhook`. Each update is handled to completion
//! — parse, dispatch, reply — before the 200 goes back; a failure inside
//! handling is logged and answered in-chat where possible, but never
//! fails the HTTP exchange.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::adapters::parser;
use crate::adapters::telegram::format;
use crate::application::{Dispatcher, InboundMessage};
use crate::domain::foundation::ChatId;
use crate::ports::ChatTransport;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<Dispatcher>,
    pub transport: Arc<dyn ChatTransport>,
}

// ════════════════════════════════════════════════════════════════════
// Update DTOs (the slice of the Bot API payload we read)
// ════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct Update {
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub first_name: Option<String>,
    pub username: Option<String>,
}

impl Message {
    /// Reporter identity: first name, else username, else "unknown".
    fn reporter(&self) -> String {
        self.from
            .as_ref()
            .and_then(|u| u.first_name.clone().or_else(|| u.username.clone()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

// ════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════

/// `GET /` - liveness text.
pub async fn root() -> &'static str {
    "OK - kelp-ledger"
}

/// `GET /ping` - JSON liveness with version.
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }))
}

/// `POST /webhook` - one update in, one reply out.
pub async fn webhook(State(state): State<WebhookState>, Json(update): Json<Update>) -> StatusCode {
    let Some(message) = update.message else {
        debug!("update without a message, skipped");
        return StatusCode::OK;
    };
    let Some(text) = message.text.clone() else {
        debug!("message without text, skipped");
        return StatusCode::OK;
    };

    let inbound = InboundMessage {
        chat: ChatId::new(message.chat.id),
        reporter: message.reporter(),
        text,
    };
    let command = parser::parse(&inbound.text);
    let reply = state.dispatcher.dispatch(&inbound, command).await;
    let rendered = format::render(&reply);

    if let Err(err) = state.transport.send_text(inbound.chat, &rendered).await {
        warn!(chat = %inbound.chat, %err, "reply delivery failed");
    }
    StatusCode::OK
}
