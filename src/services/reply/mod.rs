//! The bot's normal "think and reply" pipeline, entered for delivered
//! messages and after the bot is unmuted.

mod trigger;

pub use trigger::{announce_then_reply, run_reply_pass, spawn_reply_pass, NoopReplyGenerator};

#[cfg(test)]
pub(crate) use trigger::RecordingGenerator;

use async_trait::async_trait;

use crate::bot::error::Error;

/// Why the reply pipeline runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTrigger {
    /// An ordinary message got past the mute filter
    Message { by: String },
    Command,
    Alias,
    Mention { by: String },
}

impl ReplyTrigger {
    pub fn action_type(&self) -> &'static str {
        match self {
            ReplyTrigger::Message { .. } => "message_trigger",
            ReplyTrigger::Command | ReplyTrigger::Alias => "unmute_trigger",
            ReplyTrigger::Mention { .. } => "at_unmute_trigger",
        }
    }

    /// Hint handed to the reply pipeline
    pub fn describe(&self) -> String {
        match self {
            ReplyTrigger::Message { by } => format!("New message from {}.", by),
            ReplyTrigger::Command | ReplyTrigger::Alias => "Master has unmuted me.".to_string(),
            ReplyTrigger::Mention { by } => format!("Bot was mentioned (@) by {}.", by),
        }
    }
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Run the normal reply pipeline for `stream_id`.
    /// `Ok(false)` means the pipeline ran but produced nothing.
    async fn generate_reply(&self, stream_id: &str, trigger: &ReplyTrigger) -> Result<bool, Error>;
}
