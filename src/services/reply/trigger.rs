use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bot::error::Error;
use crate::services::reply::{ReplyGenerator, ReplyTrigger};

/// Used when no reply pipeline is wired in
pub struct NoopReplyGenerator;

#[async_trait]
impl ReplyGenerator for NoopReplyGenerator {
    async fn generate_reply(&self, stream_id: &str, trigger: &ReplyTrigger) -> Result<bool, Error> {
        debug!(
            "No reply generator configured, skipping {} in {}",
            trigger.action_type(),
            stream_id
        );
        Ok(false)
    }
}

/// Run the reply pass and log the outcome. Failures never reach the caller.
pub async fn run_reply_pass(generator: &dyn ReplyGenerator, stream_id: &str, trigger: ReplyTrigger) {
    match generator.generate_reply(stream_id, &trigger).await {
        Ok(true) => info!(
            "Triggered reply after {} in stream {}",
            trigger.action_type(),
            stream_id
        ),
        Ok(false) => debug!(
            "No reply generated after {} in stream {}",
            trigger.action_type(),
            stream_id
        ),
        Err(e) => warn!(
            "Reply pass after {} failed in stream {}: {:?}",
            trigger.action_type(),
            stream_id,
            e
        ),
    }
}

/// Same as [`run_reply_pass`], on a background task
pub fn spawn_reply_pass(
    generator: Arc<dyn ReplyGenerator>,
    stream_id: String,
    trigger: ReplyTrigger,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_reply_pass(generator.as_ref(), &stream_id, trigger).await;
    })
}

/// Send the confirmation, if any, then start the reply pass. The state change
/// is already committed, so a failed send is logged and the pass still runs.
pub async fn announce_then_reply<F, T, E>(
    announcement: Option<F>,
    generator: Arc<dyn ReplyGenerator>,
    stream_id: String,
    trigger: ReplyTrigger,
) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    if let Some(send) = announcement {
        if let Err(e) = send.await {
            warn!(
                "Failed to announce {} in stream {}: {:?}",
                trigger.action_type(),
                stream_id,
                e
            );
        }
    }

    spawn_reply_pass(generator, stream_id, trigger)
}

/// Generator that remembers every call
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingGenerator {
    calls: std::sync::Mutex<Vec<(String, ReplyTrigger)>>,
}

#[cfg(test)]
impl RecordingGenerator {
    pub(crate) fn calls(&self) -> Vec<(String, ReplyTrigger)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ReplyGenerator for RecordingGenerator {
    async fn generate_reply(&self, stream_id: &str, trigger: &ReplyTrigger) -> Result<bool, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((stream_id.to_string(), trigger.clone()));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Ready;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio_test::assert_ok;

    use crate::services::mute::{FeatureGates, MuteManager, MuteStatus, UnmuteOutcome};
    use crate::services::storage::MemoryStore;

    struct FailingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReplyGenerator for FailingGenerator {
        async fn generate_reply(&self, _: &str, _: &ReplyTrigger) -> Result<bool, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::custom("model unavailable"))
        }
    }

    #[test]
    fn test_trigger_metadata() {
        assert_eq!(ReplyTrigger::Command.action_type(), "unmute_trigger");
        assert_eq!(ReplyTrigger::Alias.action_type(), "unmute_trigger");

        let mention = ReplyTrigger::Mention { by: "alice".into() };
        assert_eq!(mention.action_type(), "at_unmute_trigger");
        assert!(mention.describe().contains("alice"));

        let message = ReplyTrigger::Message { by: "bob".into() };
        assert_eq!(message.action_type(), "message_trigger");
        assert!(message.describe().contains("bob"));
    }

    #[tokio::test]
    async fn test_noop_generator_reports_nothing_generated() {
        let result = NoopReplyGenerator
            .generate_reply("1", &ReplyTrigger::Command)
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_failure_does_not_undo_unmute() {
        let manager = MuteManager::new(Arc::new(MemoryStore::new("hush")), FeatureGates::default());
        let generator = FailingGenerator {
            calls: AtomicUsize::new(0),
        };

        manager.mute("1", None, 10).await.unwrap();
        assert_eq!(manager.unmute("1").await.unwrap(), UnmuteOutcome::Unmuted);

        run_reply_pass(&generator, "1", ReplyTrigger::Command).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        let status = manager.status("1", manager.now()).await.unwrap();
        assert_eq!(status, MuteStatus::NotMuted);
    }

    #[tokio::test]
    async fn test_failed_announcement_still_replies() {
        let generator = Arc::new(RecordingGenerator::default());
        let send = async { Err::<(), _>(Error::custom("missing permissions")) };

        let handle =
            announce_then_reply(Some(send), generator.clone(), "7".into(), ReplyTrigger::Alias).await;
        assert_ok!(handle.await);

        assert_eq!(generator.calls(), vec![("7".to_string(), ReplyTrigger::Alias)]);
    }

    #[tokio::test]
    async fn test_reply_without_announcement() {
        let generator = Arc::new(RecordingGenerator::default());
        let trigger = ReplyTrigger::Mention { by: "alice".into() };

        let handle = announce_then_reply(
            None::<Ready<Result<(), Error>>>,
            generator.clone(),
            "7".into(),
            trigger.clone(),
        )
        .await;
        assert_ok!(handle.await);

        assert_eq!(generator.calls(), vec![("7".to_string(), trigger)]);
    }
}
