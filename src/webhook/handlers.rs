use std::any::Any;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info, instrument, warn};

use super::dto::{WebhookResponse, WebhookTurn};
use super::intents::Intent;
use super::services::{self, APOLOGY_TEXT};
use crate::state::AppState;

pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(post_webhook))
        .layer(CatchPanicLayer::custom(panic_reply))
}

/// Always answers 200 with a `fulfillmentText`; failures become an apology.
#[instrument(skip(state, body))]
pub async fn post_webhook(State(state): State<AppState>, body: Bytes) -> Json<WebhookResponse> {
    let value = match serde_json::from_slice::<Value>(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "webhook body is not json; treating as empty");
            Value::Null
        }
    };
    let turn = WebhookTurn::from_value(&value);
    let intent = Intent::from_display_name(&turn.intent_name);
    info!(intent = %turn.intent_name, user_id = %turn.user_id, "webhook hit");

    let fulfillment_text =
        match services::handle(&state, intent, &turn.parameters, &turn.user_id).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = ?e, intent = %turn.intent_name, user_id = %turn.user_id, "webhook handling failed");
                APOLOGY_TEXT.to_string()
            }
        };

    Json(WebhookResponse { fulfillment_text })
}

fn panic_reply(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "webhook handler panicked");
    Json(WebhookResponse {
        fulfillment_text: APOLOGY_TEXT.to_string(),
    })
    .into_response()
}
