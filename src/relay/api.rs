//! HTTP handlers for the webhook relay
//!
//! One route: `POST /webhook`. Every body is logged and acknowledged with 200,
//! whether or not it parses as JSON.

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const ACK_MESSAGE: &str = "Webhook processed successfully";

/// Acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub message: String,
}

impl WebhookAck {
    pub fn processed() -> Self {
        Self {
            message: ACK_MESSAGE.to_string(),
        }
    }
}

/// Create the relay router
pub fn create_router() -> Router {
    Router::new().route("/webhook", post(receive_webhook))
}

async fn receive_webhook(body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(payload) => {
            let event = payload.get("event").and_then(|e| e.as_str()).unwrap_or("-");
            tracing::info!(event, payload = %payload, "Webhook received");
        }
        Err(_) => {
            tracing::info!(
                body = %String::from_utf8_lossy(&body),
                bytes = body.len(),
                "Webhook received with non-JSON body"
            );
        }
    }

    (StatusCode::OK, Json(WebhookAck::processed()))
}
