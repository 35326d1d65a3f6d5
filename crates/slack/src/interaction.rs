//! Handling of interactive button callbacks: tearing a posted poll down.
//!
//! Each callback is a fresh, independent invocation; no state survives it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gateway::SlackGateway;
use crate::poll::PollIdentity;

/// Action id carried by the delete button in the command response.
pub const DELETE_POLL_ACTION_ID: &str = "deletePoll";

/// Decoded `payload` field of an interactive callback. Only the fields the
/// handler acts on are modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct InteractionPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub response_url: Option<String>,
}

/// One triggered action, discriminated by its `type` field. Anything that is
/// not a button falls into `Other` and is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Button {
        action_id: String,
        #[serde(default)]
        value: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Acknowledgement returned to the platform. Identical on every invocation,
/// so repeated clicks on an already-deleted poll look the same to Slack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InteractionAck {
    pub ok: bool,
}

pub struct InteractionHandler {
    gateway: Arc<dyn SlackGateway>,
}

impl InteractionHandler {
    pub fn new(gateway: Arc<dyn SlackGateway>) -> Self {
        Self { gateway }
    }

    /// Deletes the poll named by every `deletePoll` button in the callback,
    /// then detaches a best-effort removal of the triggering message itself.
    ///
    /// Always acknowledges success: the click is already the user's terminal
    /// command, so a poll that survives a failed delete is an acceptable
    /// degraded outcome (logged, not retried).
    pub async fn handle(&self, payload: &InteractionPayload) -> InteractionAck {
        for action in &payload.actions {
            let Action::Button { action_id, value } = action else {
                continue;
            };
            if action_id != DELETE_POLL_ACTION_ID {
                continue;
            }

            let Some(identity) = value.as_deref().and_then(PollIdentity::parse_delete_value)
            else {
                warn!(action_id = %action_id, "delete action carried an undecodable poll identity");
                continue;
            };

            match self.gateway.delete_message(&identity).await {
                Ok(true) => {
                    info!(channel = %identity.channel, ts = %identity.ts, "poll deleted");
                }
                Ok(false) => {
                    warn!(channel = %identity.channel, ts = %identity.ts, "slack declined poll deletion");
                }
                Err(error) => {
                    warn!(channel = %identity.channel, ts = %identity.ts, error = %error, "poll deletion call failed");
                }
            }
        }

        if let Some(response_url) = payload.response_url.as_deref() {
            self.gateway.delete_original(response_url);
        }

        InteractionAck { ok: true }
    }
}
