//! Slack integration for pollbot.
//!
//! This crate holds everything between the raw webhook body and the Slack
//! Web API:
//! - **Command parsing** (`commands`) - `/poll "question" "option" ...` text
//!   into a question and ordered options
//! - **Poll rendering** (`poll`) - numbered-emoji markup and the poll's
//!   channel/timestamp identity
//! - **Block Kit** (`blocks`) - wire-accurate response payloads (sections,
//!   buttons, confirm dialogs)
//! - **Publishing** (`publisher`) - post message, attach reactions in option
//!   order, hand back a receipt
//! - **Interactions** (`interaction`) - delete-poll button callbacks
//! - **Verification** (`verify`) - shared-secret webhook token check
//! - **Gateway** (`gateway`) - the narrow remote-call interface plus the
//!   production Web API client
//!
//! # Key Types
//!
//! - `SlackGateway` - trait the publisher and interaction handler call through
//! - `PollPublisher` - post → react → receipt orchestration
//! - `InteractionHandler` - button-click teardown of a posted poll

pub mod blocks;
pub mod commands;
pub mod gateway;
pub mod interaction;
pub mod poll;
pub mod publisher;
pub mod verify;

pub use gateway::{RemoteCallError, SlackApiClient, SlackGateway};
pub use interaction::{InteractionAck, InteractionHandler, InteractionPayload};
pub use poll::{ParameterError, PollIdentity};
pub use publisher::{PollPublisher, PollReceipt};
pub use verify::{verify_token, AuthError};
