//! The narrow remote-call interface the bot depends on, and the production
//! Slack Web API implementation behind it.

use async_trait::async_trait;
use pollbot_core::config::SlackConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::poll::PollIdentity;

pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Failure of an outbound platform call. Fatal to the in-flight command when
/// raised from the message post; reaction and delete calls fold `Api`
/// outcomes into advisory booleans instead.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("slack `{method}` call failed: {reason}")]
    Api { method: &'static str, reason: String },
    #[error("slack `{method}` transport failed: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Remote calls the publisher and interaction handler are allowed to make.
/// Every call is attempted exactly once; there are no retries.
#[async_trait]
pub trait SlackGateway: Send + Sync {
    /// Posts the poll message and returns its addressable identity.
    async fn post_message(
        &self,
        channel: &str,
        username: &str,
        text: &str,
    ) -> Result<PollIdentity, RemoteCallError>;

    /// Adds one named reaction. `Ok(false)` means the platform answered but
    /// declined the reaction.
    async fn add_reaction(
        &self,
        identity: &PollIdentity,
        reaction: &str,
    ) -> Result<bool, RemoteCallError>;

    /// Deletes the poll message. `Ok(false)` means the platform answered but
    /// declined the deletion (e.g. the message is already gone).
    async fn delete_message(&self, identity: &PollIdentity) -> Result<bool, RemoteCallError>;

    /// Detached request to a response URL asking the platform to remove the
    /// originating interactive message. Best-effort: the outcome is logged
    /// inside the spawned task and never awaited by the caller.
    fn delete_original(&self, response_url: &str);
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

/// `reqwest`-backed [`SlackGateway`] against the Slack Web API. Each call is
/// bounded by the configured per-call timeout, so a hung remote call cannot
/// block an invocation forever.
pub struct SlackApiClient {
    http: reqwest::Client,
    bot_token: SecretString,
}

impl SlackApiClient {
    pub fn new(config: &SlackConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, bot_token: config.bot_token.clone() })
    }

    async fn call(
        &self,
        method: &'static str,
        body: serde_json::Value,
    ) -> Result<ApiEnvelope, RemoteCallError> {
        let response = self
            .http
            .post(format!("{SLACK_API_BASE}/{method}"))
            .bearer_auth(self.bot_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|source| RemoteCallError::Transport { method, source })?;

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|source| RemoteCallError::Transport { method, source })?;

        if !envelope.ok {
            debug!(
                method,
                error = envelope.error.as_deref().unwrap_or("unknown"),
                "slack api answered ok=false"
            );
        }
        Ok(envelope)
    }
}

#[async_trait]
impl SlackGateway for SlackApiClient {
    async fn post_message(
        &self,
        channel: &str,
        username: &str,
        text: &str,
    ) -> Result<PollIdentity, RemoteCallError> {
        let envelope = self
            .call(
                "chat.postMessage",
                json!({
                    "channel": channel,
                    "text": text,
                    "as_user": false,
                    "username": username,
                }),
            )
            .await?;

        if !envelope.ok {
            return Err(RemoteCallError::Api {
                method: "chat.postMessage",
                reason: envelope.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        match (envelope.channel, envelope.ts) {
            (Some(channel), Some(ts)) => Ok(PollIdentity { channel, ts }),
            _ => Err(RemoteCallError::Api {
                method: "chat.postMessage",
                reason: "response missing channel or ts".to_string(),
            }),
        }
    }

    async fn add_reaction(
        &self,
        identity: &PollIdentity,
        reaction: &str,
    ) -> Result<bool, RemoteCallError> {
        let envelope = self
            .call(
                "reactions.add",
                json!({
                    "name": reaction,
                    "channel": identity.channel,
                    "timestamp": identity.ts,
                }),
            )
            .await?;
        Ok(envelope.ok)
    }

    async fn delete_message(&self, identity: &PollIdentity) -> Result<bool, RemoteCallError> {
        let envelope = self
            .call(
                "chat.delete",
                json!({
                    "channel": identity.channel,
                    "ts": identity.ts,
                }),
            )
            .await?;
        Ok(envelope.ok)
    }

    fn delete_original(&self, response_url: &str) {
        let http = self.http.clone();
        let url = response_url.to_owned();
        tokio::spawn(async move {
            match http.post(&url).json(&json!({ "delete_original": true })).send().await {
                Ok(_) => debug!(url = %url, "delete_original dispatched"),
                Err(error) => {
                    warn!(url = %url, error = %error, "delete_original request failed");
                }
            }
        });
    }
}
