use std::fmt;
use std::sync::Arc;

use crate::config::{PluginConfig, Settings};
use crate::services::mute::{FeatureGates, MuteManager};
use crate::services::reply::ReplyGenerator;
use crate::services::storage::KvStore;

/// Shared data available to all commands and handlers
pub struct Data {
    pub settings: Settings,
    /// Per-channel mute windows
    pub mutes: MuteManager,
    /// Reply pipeline for delivered messages and wake-ups
    pub reply_generator: Arc<dyn ReplyGenerator>,
}

impl Data {
    pub fn new(
        settings: Settings,
        store: Arc<dyn KvStore>,
        reply_generator: Arc<dyn ReplyGenerator>,
    ) -> Self {
        let gates = FeatureGates::from_config(&settings.plugin);
        Self {
            mutes: MuteManager::new(store, gates),
            settings,
            reply_generator,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.settings.plugin
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("gates", &self.mutes.gates())
            .field("command_prefix", &self.settings.command_prefix)
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
