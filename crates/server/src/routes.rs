//! Webhook entry points.
//!
//! Endpoints:
//! - `POST /slack/command`     — slash command carrying the poll text
//! - `POST /slack/interactive` — button callbacks (poll deletion)
//!
//! Non-POST requests are answered 405 by the method router before any
//! parsing or verification runs. Everything else is caught here and turned
//! into a status plus JSON body; nothing escapes the handlers unhandled.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Form, Router,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use pollbot_slack::blocks;
use pollbot_slack::commands::parse_poll_command;
use pollbot_slack::gateway::SlackGateway;
use pollbot_slack::interaction::{InteractionHandler, InteractionPayload};
use pollbot_slack::poll::format_poll_message;
use pollbot_slack::publisher::PollPublisher;
use pollbot_slack::verify::verify_token;

#[derive(Clone)]
pub struct AppState {
    verification_token: SecretString,
    publisher: Arc<PollPublisher>,
    interactions: Arc<InteractionHandler>,
}

impl AppState {
    pub fn new(verification_token: SecretString, gateway: Arc<dyn SlackGateway>) -> Self {
        Self {
            verification_token,
            publisher: Arc::new(PollPublisher::new(gateway.clone())),
            interactions: Arc::new(InteractionHandler::new(gateway)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/command", post(slash_command))
        .route("/slack/interactive", post(interactive_callback))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SlashCommandForm {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractiveForm {
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn slash_command(
    State(state): State<AppState>,
    Form(form): Form<SlashCommandForm>,
) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();

    if let Err(auth_error) = verify_token(form.token.as_deref(), &state.verification_token) {
        warn!(
            event_name = "ingress.command.auth_failed",
            correlation_id = %request_id,
            error = %auth_error,
            "slash command failed webhook verification"
        );
        return auth_failure(auth_error.to_string());
    }

    let parsed = parse_poll_command(&form.text);
    let poll_text = match format_poll_message(&parsed.question, &parsed.options) {
        Ok(text) => text,
        Err(parameter_error) => {
            info!(
                event_name = "ingress.command.rejected",
                correlation_id = %request_id,
                error = %parameter_error,
                "slash command rejected as a user-input problem"
            );
            // Slack renders non-200 replies as opaque failures, so user-input
            // problems go back as ephemeral chat text with status 200.
            let body = blocks::command_error_message(&parameter_error.to_string());
            return (StatusCode::OK, Json(body)).into_response();
        }
    };

    match state
        .publisher
        .publish(&form.channel_id, &form.user_name, &poll_text, parsed.options.len())
        .await
    {
        Ok(receipt) => {
            info!(
                event_name = "ingress.command.poll_published",
                correlation_id = %request_id,
                channel = %receipt.identity.channel,
                ts = %receipt.identity.ts,
                reactions_ok = receipt.reactions_ok,
                "poll published"
            );
            (StatusCode::OK, Json(blocks::poll_created_message(&receipt.identity)))
                .into_response()
        }
        Err(remote_error) => {
            error!(
                event_name = "ingress.command.publish_failed",
                correlation_id = %request_id,
                error = %remote_error,
                "poll publish failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: remote_error.to_string() }),
            )
                .into_response()
        }
    }
}

pub async fn interactive_callback(
    State(state): State<AppState>,
    Form(form): Form<InteractiveForm>,
) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();

    let payload: InteractionPayload = match serde_json::from_str(&form.payload) {
        Ok(payload) => payload,
        Err(decode_error) => {
            error!(
                event_name = "ingress.interactive.undecodable",
                correlation_id = %request_id,
                error = %decode_error,
                "interactive callback payload could not be decoded"
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: format!("undecodable payload: {decode_error}") }),
            )
                .into_response();
        }
    };

    if let Err(auth_error) = verify_token(payload.token.as_deref(), &state.verification_token) {
        warn!(
            event_name = "ingress.interactive.auth_failed",
            correlation_id = %request_id,
            error = %auth_error,
            "interactive callback failed webhook verification"
        );
        return auth_failure(auth_error.to_string());
    }

    let ack = state.interactions.handle(&payload).await;
    info!(
        event_name = "ingress.interactive.acknowledged",
        correlation_id = %request_id,
        "interactive callback acknowledged"
    );
    (StatusCode::OK, Json(ack)).into_response()
}

fn auth_failure(message: String) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: message })).into_response()
}
