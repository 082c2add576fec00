//! Turns mute manager outcomes into the replies configured under `messages`.
//! Shared by the slash/prefix commands and the alias handler.

use chrono::{Local, TimeDelta};
use tracing::{debug, info};

use crate::bot::error::Error;
use crate::config::plugin::{MessageSection, PluginConfig};
use crate::services::mute::manager::{MuteManager, MuteStatus, UnmuteOutcome};
use crate::services::reply::{run_reply_pass, ReplyGenerator, ReplyTrigger};
use crate::utils::formatting::{format_clock_time, format_remaining, render_mute_start};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmuteReply {
    pub text: String,
    /// Whether a mute was actually lifted, i.e. a reply pass should follow
    pub unmuted: bool,
}

/// What to do with an inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Hand the message to the normal reply pipeline
    Deliver,
    /// Drop the message; optionally tell the channel the bot is muted
    Suppress {
        reply: Option<String>,
        remaining: TimeDelta,
    },
    /// A mention just lifted the mute
    Woken { reply: Option<String> },
}

/// Text for a gate or parse failure, `None` for errors that should propagate
fn failure_text(messages: &MessageSection, error: &Error) -> Option<String> {
    let text = match error {
        Error::InvalidDuration(_) => &messages.invalid_duration,
        Error::PluginDisabled => &messages.plugin_disabled,
        Error::FeatureDisabled => &messages.feature_disabled,
        _ => return None,
    };
    Some(text.clone())
}

fn non_empty(text: &str) -> Option<String> {
    Some(text.to_string()).filter(|t| !t.trim().is_empty())
}

/// Mute `stream_id` and return the confirmation or failure text.
pub async fn handle_mute(
    manager: &MuteManager,
    config: &PluginConfig,
    stream_id: &str,
    duration: Option<&str>,
) -> Result<String, Error> {
    match manager
        .mute(stream_id, duration, config.defaults.default_mute_minutes)
        .await
    {
        Ok(outcome) => {
            let unmute_time_str = format_clock_time(&outcome.unmute_at.with_timezone(&Local));
            Ok(render_mute_start(&config.messages.mute_start, &unmute_time_str))
        }
        Err(e) => match failure_text(&config.messages, &e) {
            Some(text) => {
                info!("Mute refused in stream {}: {}", stream_id, e);
                Ok(text)
            }
            None => Err(e),
        },
    }
}

/// Unmute `stream_id` and return the text to send.
pub async fn handle_unmute(
    manager: &MuteManager,
    config: &PluginConfig,
    stream_id: &str,
) -> Result<UnmuteReply, Error> {
    match manager.unmute(stream_id).await {
        Ok(UnmuteOutcome::Unmuted) => Ok(UnmuteReply {
            text: config.messages.unmute_start.clone(),
            unmuted: true,
        }),
        Ok(UnmuteOutcome::NotMuted) => Ok(UnmuteReply {
            text: config.messages.not_muted.clone(),
            unmuted: false,
        }),
        Err(e) => match failure_text(&config.messages, &e) {
            Some(text) => {
                info!("Unmute refused in stream {}: {}", stream_id, e);
                Ok(UnmuteReply {
                    text,
                    unmuted: false,
                })
            }
            None => Err(e),
        },
    }
}

/// Decide whether an inbound message reaches the bot. A mention is checked
/// before the mute filter so it can wake the bot up.
pub async fn screen_message(
    manager: &MuteManager,
    config: &PluginConfig,
    stream_id: &str,
    mentioned: bool,
) -> Result<Screening, Error> {
    if !config.plugin.enabled {
        return Ok(Screening::Deliver);
    }

    let mentioned = mentioned && config.features.at_unmute_enabled;

    let screening = match manager.check_and_clear_on_mention(stream_id, mentioned).await? {
        MuteStatus::JustUnmuted => Screening::Woken {
            reply: non_empty(&config.messages.at_unmute),
        },
        MuteStatus::Muted { remaining, .. } => {
            debug!(
                "Message in muted stream {} suppressed, {} left",
                stream_id,
                format_remaining(remaining)
            );
            Screening::Suppress {
                reply: non_empty(&config.messages.muted_reply),
                remaining,
            }
        }
        MuteStatus::NotMuted => Screening::Deliver,
    };

    Ok(screening)
}

/// Screen an ordinary message from `author` and hand it to the reply
/// pipeline when it gets through. Suppressed and waking messages are not
/// delivered here.
pub async fn route_message(
    manager: &MuteManager,
    config: &PluginConfig,
    generator: &dyn ReplyGenerator,
    stream_id: &str,
    author: &str,
    mentioned: bool,
) -> Result<Screening, Error> {
    let screening = screen_message(manager, config, stream_id, mentioned).await?;

    if screening == Screening::Deliver {
        let trigger = ReplyTrigger::Message {
            by: author.to_string(),
        };
        run_reply_pass(generator, stream_id, trigger).await;
    }

    Ok(screening)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::DateTime;

    use crate::services::mute::clock::{Clock, ManualClock};
    use crate::services::mute::manager::FeatureGates;
    use crate::services::reply::RecordingGenerator;
    use crate::services::storage::MemoryStore;

    const STREAM: &str = "42";

    fn setup(config: &PluginConfig) -> (MuteManager, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let manager = MuteManager::new(
            Arc::new(MemoryStore::new("hush")),
            FeatureGates::from_config(config),
        )
        .with_clock(clock.clone());
        (manager, clock)
    }

    fn config_with_messages() -> PluginConfig {
        let mut config = PluginConfig::default();
        config.messages.mute_start = "quiet until {unmute_time_str}".into();
        config.messages.unmute_start = "back".into();
        config.messages.not_muted = "was not muted".into();
        config.messages.invalid_duration = "bad duration".into();
        config.messages.plugin_disabled = "plugin off".into();
        config.messages.feature_disabled = "feature off".into();
        config.messages.at_unmute = "woken".into();
        config
    }

    #[tokio::test]
    async fn test_mute_renders_unmute_time() {
        let config = config_with_messages();
        let (manager, clock) = setup(&config);

        let text = handle_mute(&manager, &config, STREAM, Some("1h")).await.unwrap();

        let expected_at = (clock.now() + TimeDelta::hours(1)).with_timezone(&Local);
        assert_eq!(text, format!("quiet until {}", format_clock_time(&expected_at)));
    }

    #[tokio::test]
    async fn test_mute_invalid_duration_is_a_message() {
        let config = config_with_messages();
        let (manager, _) = setup(&config);

        let text = handle_mute(&manager, &config, STREAM, Some("later")).await.unwrap();
        assert_eq!(text, "bad duration");
        assert!(manager.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_gates_are_messages() {
        let mut config = config_with_messages();
        config.plugin.enabled = false;
        let (manager, _) = setup(&config);
        assert_eq!(handle_mute(&manager, &config, STREAM, None).await.unwrap(), "plugin off");

        let mut config = config_with_messages();
        config.features.mute_enabled = false;
        let (manager, _) = setup(&config);
        let reply = handle_unmute(&manager, &config, STREAM).await.unwrap();
        assert_eq!(reply.text, "feature off");
        assert!(!reply.unmuted);
    }

    #[tokio::test]
    async fn test_missing_stream_propagates() {
        let config = config_with_messages();
        let (manager, _) = setup(&config);

        let result = handle_mute(&manager, &config, "", None).await;
        assert!(matches!(result, Err(Error::MissingStreamContext)));
    }

    #[tokio::test]
    async fn test_unmute_replies() {
        let config = config_with_messages();
        let (manager, _) = setup(&config);

        let reply = handle_unmute(&manager, &config, STREAM).await.unwrap();
        assert_eq!(reply, UnmuteReply { text: "was not muted".into(), unmuted: false });

        handle_mute(&manager, &config, STREAM, None).await.unwrap();
        let reply = handle_unmute(&manager, &config, STREAM).await.unwrap();
        assert_eq!(reply, UnmuteReply { text: "back".into(), unmuted: true });
    }

    #[tokio::test]
    async fn test_screen_suppresses_while_muted() {
        let mut config = config_with_messages();
        let (manager, _) = setup(&config);
        handle_mute(&manager, &config, STREAM, Some("10min")).await.unwrap();

        let screening = screen_message(&manager, &config, STREAM, false).await.unwrap();
        assert_eq!(
            screening,
            Screening::Suppress { reply: None, remaining: TimeDelta::minutes(10) }
        );

        config.messages.muted_reply = "I'm muted".into();
        let screening = screen_message(&manager, &config, STREAM, false).await.unwrap();
        assert!(matches!(screening, Screening::Suppress { reply: Some(ref r), .. } if r == "I'm muted"));
    }

    #[tokio::test]
    async fn test_screen_mention_wakes() {
        let config = config_with_messages();
        let (manager, _) = setup(&config);
        handle_mute(&manager, &config, STREAM, None).await.unwrap();

        let screening = screen_message(&manager, &config, STREAM, true).await.unwrap();
        assert_eq!(screening, Screening::Woken { reply: Some("woken".into()) });
        assert_eq!(
            screen_message(&manager, &config, STREAM, false).await.unwrap(),
            Screening::Deliver
        );
    }

    #[tokio::test]
    async fn test_screen_mention_ignored_when_wake_disabled() {
        let mut config = config_with_messages();
        config.features.at_unmute_enabled = false;
        let (manager, _) = setup(&config);
        handle_mute(&manager, &config, STREAM, None).await.unwrap();

        let screening = screen_message(&manager, &config, STREAM, true).await.unwrap();
        assert!(matches!(screening, Screening::Suppress { .. }));
    }

    #[tokio::test]
    async fn test_screen_after_expiry_delivers() {
        let config = config_with_messages();
        let (manager, clock) = setup(&config);
        handle_mute(&manager, &config, STREAM, Some("5m")).await.unwrap();

        clock.advance(TimeDelta::minutes(5));
        assert_eq!(
            screen_message(&manager, &config, STREAM, false).await.unwrap(),
            Screening::Deliver
        );
        assert!(manager.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_screen_delivers_when_plugin_disabled() {
        let mut config = config_with_messages();
        config.plugin.enabled = false;
        let (manager, _) = setup(&config);

        assert_eq!(
            screen_message(&manager, &config, STREAM, true).await.unwrap(),
            Screening::Deliver
        );
    }

    #[tokio::test]
    async fn test_route_delivers_only_while_unmuted() {
        let config = config_with_messages();
        let (manager, clock) = setup(&config);
        let generator = RecordingGenerator::default();
        let delivered = || ("42".to_string(), ReplyTrigger::Message { by: "bob".into() });

        let screening = route_message(&manager, &config, &generator, STREAM, "bob", false)
            .await
            .unwrap();
        assert_eq!(screening, Screening::Deliver);
        assert_eq!(generator.calls(), vec![delivered()]);

        handle_mute(&manager, &config, STREAM, Some("10min")).await.unwrap();
        let screening = route_message(&manager, &config, &generator, STREAM, "bob", false)
            .await
            .unwrap();
        assert!(matches!(screening, Screening::Suppress { .. }));
        assert_eq!(generator.calls().len(), 1);

        clock.advance(TimeDelta::minutes(10));
        route_message(&manager, &config, &generator, STREAM, "bob", false)
            .await
            .unwrap();
        assert_eq!(generator.calls(), vec![delivered(), delivered()]);
    }

    #[tokio::test]
    async fn test_route_leaves_wake_reply_to_caller() {
        let config = config_with_messages();
        let (manager, _) = setup(&config);
        let generator = RecordingGenerator::default();
        handle_mute(&manager, &config, STREAM, None).await.unwrap();

        let screening = route_message(&manager, &config, &generator, STREAM, "bob", true)
            .await
            .unwrap();
        assert!(matches!(screening, Screening::Woken { .. }));
        assert!(generator.calls().is_empty());
    }
}
