//! Wire-accurate Block Kit payloads for command responses.
//!
//! Only the subset the bot actually sends is modeled: section and actions
//! blocks, buttons with an optional confirm dialog, and the ephemeral /
//! in-channel response envelope.

use serde::Serialize;

use crate::interaction::DELETE_POLL_ACTION_ID;
use crate::poll::PollIdentity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
    },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into(), emoji: None }
    }

    /// Plain text with emoji rendering enabled, as used on button labels.
    pub fn plain_emoji(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into(), emoji: Some(true) }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// The "are you sure" dialog Slack shows before delivering a button click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfirmDialog {
    pub title: TextObject,
    pub text: TextObject,
    pub confirm: TextObject,
    pub deny: TextObject,
}

impl ConfirmDialog {
    pub fn new(title: &str, text: &str, confirm: &str, deny: &str) -> Self {
        Self {
            title: TextObject::plain(title),
            text: TextObject::mrkdwn(text),
            confirm: TextObject::plain(confirm),
            deny: TextObject::plain(deny),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonElement {
    #[serde(rename = "type")]
    element_type: &'static str,
    pub text: TextObject,
    pub action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmDialog>,
}

impl ButtonElement {
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            element_type: "button",
            text: TextObject::plain_emoji(label),
            action_id: action_id.into(),
            style: None,
            value: None,
            confirm: None,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn confirm(mut self, confirm: ConfirmDialog) -> Self {
        self.confirm = Some(confirm);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
    Actions { elements: Vec<ButtonElement> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    InChannel,
    Ephemeral,
}

/// Body returned to Slack for a slash command. Slash-command errors also use
/// this envelope (text only, ephemeral) so they render as chat messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    pub response_type: ResponseType,
}

/// Confirmation shown to the poll creator, carrying the delete affordance.
/// The button value encodes the poll identity and is the only place the
/// identity lives after the command returns.
pub fn poll_created_message(identity: &PollIdentity) -> CommandResponse {
    CommandResponse {
        text: "Successfully made the poll!".to_string(),
        blocks: vec![
            Block::Section { text: TextObject::mrkdwn("Successfully made the poll!") },
            Block::Actions {
                elements: vec![ButtonElement::new(DELETE_POLL_ACTION_ID, "Delete the poll?")
                    .style(ButtonStyle::Danger)
                    .value(identity.delete_value())
                    .confirm(ConfirmDialog::new(
                        "Are you sure?",
                        "You can't change your mind.",
                        "Do it",
                        "Stop!",
                    ))],
            },
        ],
        response_type: ResponseType::Ephemeral,
    }
}

pub fn command_error_message(text: &str) -> CommandResponse {
    CommandResponse {
        text: text.to_string(),
        blocks: Vec::new(),
        response_type: ResponseType::Ephemeral,
    }
}
