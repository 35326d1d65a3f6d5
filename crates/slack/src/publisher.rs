//! Publishing a rendered poll: post the message, then attach one numbered
//! reaction per option.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::gateway::{RemoteCallError, SlackGateway};
use crate::poll::{PollIdentity, MAX_OPTIONS, NUMBERED_EMOJI};

/// Outcome of a publish. `reactions_ok` is advisory: reactions are cosmetic
/// vote markers and a partial failure does not fail the command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollReceipt {
    pub identity: PollIdentity,
    pub reactions_ok: bool,
}

pub struct PollPublisher {
    gateway: Arc<dyn SlackGateway>,
}

impl PollPublisher {
    pub fn new(gateway: Arc<dyn SlackGateway>) -> Self {
        Self { gateway }
    }

    /// Posts `text` to `channel` and reacts with the first `option_count`
    /// numbered emoji. A failed post is fatal (the user resubmits the
    /// command); failed reactions are recorded and the loop continues.
    pub async fn publish(
        &self,
        channel: &str,
        username: &str,
        text: &str,
        option_count: usize,
    ) -> Result<PollReceipt, RemoteCallError> {
        let identity = self.gateway.post_message(channel, username, text).await?;
        debug!(
            channel = %identity.channel,
            ts = %identity.ts,
            "poll message posted"
        );

        let mut reactions_ok = true;
        // One awaited call at a time: the platform shows reactions in arrival
        // order, and the markers must line up with the option list.
        for emoji in NUMBERED_EMOJI.iter().take(option_count.min(MAX_OPTIONS)) {
            match self.gateway.add_reaction(&identity, emoji.reaction).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(reaction = emoji.reaction, ts = %identity.ts, "slack declined poll reaction");
                    reactions_ok = false;
                }
                Err(error) => {
                    warn!(reaction = emoji.reaction, ts = %identity.ts, error = %error, "poll reaction call failed");
                    reactions_ok = false;
                }
            }
        }

        Ok(PollReceipt { identity, reactions_ok })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::{PollPublisher, PollReceipt};
    use crate::gateway::{RemoteCallError, SlackGateway};
    use crate::poll::PollIdentity;

    #[derive(Default)]
    struct RecordingGateway {
        state: Mutex<RecordingState>,
    }

    #[derive(Default)]
    struct RecordingState {
        post_should_fail: bool,
        declined_reactions: Vec<&'static str>,
        posts: Vec<(String, String, String)>,
        reactions: Vec<String>,
    }

    impl RecordingGateway {
        async fn reactions(&self) -> Vec<String> {
            self.state.lock().await.reactions.clone()
        }

        async fn posts(&self) -> usize {
            self.state.lock().await.posts.len()
        }

        async fn fail_posts(&self) {
            self.state.lock().await.post_should_fail = true;
        }

        async fn decline_reaction(&self, reaction: &'static str) {
            self.state.lock().await.declined_reactions.push(reaction);
        }
    }

    #[async_trait]
    impl SlackGateway for RecordingGateway {
        async fn post_message(
            &self,
            channel: &str,
            username: &str,
            text: &str,
        ) -> Result<PollIdentity, RemoteCallError> {
            let mut state = self.state.lock().await;
            if state.post_should_fail {
                return Err(RemoteCallError::Api {
                    method: "chat.postMessage",
                    reason: "channel_not_found".to_string(),
                });
            }
            state.posts.push((channel.to_owned(), username.to_owned(), text.to_owned()));
            Ok(PollIdentity { channel: channel.to_owned(), ts: "1730000000.000100".to_string() })
        }

        async fn add_reaction(
            &self,
            _identity: &PollIdentity,
            reaction: &str,
        ) -> Result<bool, RemoteCallError> {
            let mut state = self.state.lock().await;
            state.reactions.push(reaction.to_owned());
            Ok(!state.declined_reactions.contains(&reaction))
        }

        async fn delete_message(
            &self,
            _identity: &PollIdentity,
        ) -> Result<bool, RemoteCallError> {
            Ok(true)
        }

        fn delete_original(&self, _response_url: &str) {}
    }

    #[tokio::test]
    async fn reactions_are_attempted_in_ascending_position_order() {
        let gateway = Arc::new(RecordingGateway::default());
        let publisher = PollPublisher::new(gateway.clone());

        let receipt = publisher
            .publish("C1", "alice", "*q*\nOptions:\n>a\n>b\n>c", 3)
            .await
            .expect("publish succeeds");

        assert!(receipt.reactions_ok);
        assert_eq!(gateway.reactions().await, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn exactly_ten_reactions_for_oversized_option_counts() {
        let gateway = Arc::new(RecordingGateway::default());
        let publisher = PollPublisher::new(gateway.clone());

        publisher.publish("C1", "alice", "text", 25).await.expect("publish succeeds");

        let reactions = gateway.reactions().await;
        assert_eq!(reactions.len(), 10);
        assert_eq!(reactions.first().map(String::as_str), Some("one"));
        assert_eq!(reactions.last().map(String::as_str), Some("keycap_ten"));
    }

    #[tokio::test]
    async fn declined_reaction_is_recorded_but_does_not_abort_the_rest() {
        let gateway = Arc::new(RecordingGateway::default());
        gateway.decline_reaction("two").await;
        let publisher = PollPublisher::new(gateway.clone());

        let receipt = publisher.publish("C1", "alice", "text", 4).await.expect("publish succeeds");

        assert!(!receipt.reactions_ok, "aggregate flag should record the decline");
        assert_eq!(gateway.reactions().await, vec!["one", "two", "three", "four"]);
    }

    #[tokio::test]
    async fn failed_post_is_fatal_and_attempts_no_reactions() {
        let gateway = Arc::new(RecordingGateway::default());
        gateway.fail_posts().await;
        let publisher = PollPublisher::new(gateway.clone());

        let result = publisher.publish("C1", "alice", "text", 3).await;

        assert!(result.is_err());
        assert_eq!(gateway.posts().await, 0);
        assert!(gateway.reactions().await.is_empty());
    }

    #[tokio::test]
    async fn receipt_carries_the_posted_identity() {
        let gateway = Arc::new(RecordingGateway::default());
        let publisher = PollPublisher::new(gateway);

        let PollReceipt { identity, .. } =
            publisher.publish("C42", "bob", "text", 2).await.expect("publish succeeds");

        assert_eq!(identity.channel, "C42");
        assert_eq!(identity.ts, "1730000000.000100");
    }
}
