//! Help Chat Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::Value;
use tracing::{error, info};

use brankas_app::assistant::AssistantError;

use crate::{
    assistant::models::{ChatReply, chat_messages},
    extensions::*,
    state::State,
};

fn reply(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status).render(Json(ChatReply::new(message)));
}

/// Help Chat Handler
///
/// Answers a customer's help-desk conversation, grounded in the knowledge base.
#[endpoint(
    tags("assistant"),
    summary = "Help Chat",
    responses(
        (status_code = StatusCode::OK, description = "Assistant reply", body = ChatReply),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid messages", body = ChatReply),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Assistant unavailable", body = ChatReply),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let assistant = &state.app.assistant;

    if !assistant.is_configured() {
        error!("help chat requested without a generative API key");
        reply(res, StatusCode::INTERNAL_SERVER_ERROR, "API key tidak ditemukan.");

        return Ok(());
    }

    let body = req.parse_json::<Value>().await.unwrap_or(Value::Null);

    let Some(messages) = chat_messages(&body) else {
        reply(res, StatusCode::BAD_REQUEST, "Format messages tidak valid.");

        return Ok(());
    };

    match assistant.help_chat(messages).await {
        Ok(text) => reply(res, StatusCode::OK, text),
        Err(AssistantError::NotConfigured) => {
            reply(res, StatusCode::INTERNAL_SERVER_ERROR, "API key tidak ditemukan.");
        }
        Err(source) => {
            info!("help chat upstream failure: {source}");
            reply(
                res,
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error dari Gemini: {source}"),
            );
        }
    }

    Ok(())
}
