use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::bot::error::Error;
use crate::config::PluginConfig;
use crate::constants::defaults::STORAGE_KEY_MUTED_STREAMS;
use crate::services::mute::clock::{Clock, SystemClock};
use crate::services::mute::duration::parse_duration;
use crate::services::mute::table::MuteTable;
use crate::services::storage::KvStore;

/// Configuration switches checked before mute and unmute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureGates {
    pub plugin_enabled: bool,
    pub mute_enabled: bool,
}

impl FeatureGates {
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            plugin_enabled: config.plugin.enabled,
            mute_enabled: config.features.mute_enabled,
        }
    }

    fn check(&self) -> Result<(), Error> {
        if !self.plugin_enabled {
            return Err(Error::PluginDisabled);
        }
        if !self.mute_enabled {
            return Err(Error::FeatureDisabled);
        }
        Ok(())
    }
}

impl Default for FeatureGates {
    fn default() -> Self {
        Self {
            plugin_enabled: true,
            mute_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteOutcome {
    pub stream_id: String,
    pub unmute_at: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmuteOutcome {
    Unmuted,
    NotMuted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuteStatus {
    NotMuted,
    Muted {
        unmute_at: DateTime<Utc>,
        remaining: TimeDelta,
    },
    /// A mention just lifted an active mute
    JustUnmuted,
}

impl MuteStatus {
    pub fn is_muted(&self) -> bool {
        matches!(self, MuteStatus::Muted { .. })
    }
}

/// Owns the per-stream mute windows.
///
/// The whole table lives under one key in the store and every mutation is a
/// read-modify-write of that key, serialised by `lock`. Expired entries are
/// only removed when a status check observes them.
pub struct MuteManager {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    gates: FeatureGates,
    lock: Mutex<()>,
}

impl MuteManager {
    pub fn new(store: Arc<dyn KvStore>, gates: FeatureGates) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            gates,
            lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn gates(&self) -> FeatureGates {
        self.gates
    }

    async fn load(&self) -> Result<MuteTable, Error> {
        let Some(value) = self.store.get(STORAGE_KEY_MUTED_STREAMS).await? else {
            return Ok(MuteTable::new());
        };

        match serde_json::from_value(value) {
            Ok(table) => Ok(table),
            Err(e) => {
                // Next write replaces the unreadable value
                warn!("Stored mute table is unreadable, treating as empty: {}", e);
                Ok(MuteTable::new())
            }
        }
    }

    async fn save(&self, table: &MuteTable) -> Result<(), Error> {
        let value = serde_json::to_value(table)?;
        self.store.set(STORAGE_KEY_MUTED_STREAMS, value).await
    }

    /// Drop every stored mute. Run once at start-up so mutes never outlive
    /// the process that set them. Returns how many entries were dropped.
    pub async fn reset(&self) -> Result<usize, Error> {
        let _guard = self.lock.lock().await;

        let stale = self.load().await?.len();
        self.save(&MuteTable::new()).await?;

        if stale > 0 {
            info!("Cleared {} stale mute(s) from {} store", stale, self.store.backend());
        } else {
            debug!("No stale mutes to clear");
        }

        Ok(stale)
    }

    /// Current table contents, without sweeping
    pub async fn snapshot(&self) -> Result<MuteTable, Error> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Mute `stream_id` for the parsed `duration`, or for `default_minutes`
    /// when no duration text is given. Replaces any existing window.
    pub async fn mute(
        &self,
        stream_id: &str,
        duration: Option<&str>,
        default_minutes: i64,
    ) -> Result<MuteOutcome, Error> {
        self.gates.check()?;
        require_stream(stream_id)?;

        let duration_minutes = match duration.map(str::trim).filter(|d| !d.is_empty()) {
            Some(text) => {
                parse_duration(text).ok_or_else(|| Error::InvalidDuration(text.to_string()))?
            }
            None => default_minutes,
        };

        let unmute_at = TimeDelta::try_minutes(duration_minutes)
            .and_then(|delta| self.now().checked_add_signed(delta))
            .ok_or_else(|| Error::InvalidDuration(format!("{} minutes", duration_minutes)))?;

        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        table.insert(stream_id, unmute_at);
        self.save(&table).await?;

        info!(
            "Muted stream {} for {} minutes until {}",
            stream_id, duration_minutes, unmute_at
        );

        Ok(MuteOutcome {
            stream_id: stream_id.to_string(),
            unmute_at,
            duration_minutes,
        })
    }

    pub async fn unmute(&self, stream_id: &str) -> Result<UnmuteOutcome, Error> {
        self.gates.check()?;
        require_stream(stream_id)?;

        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;

        if !table.remove(stream_id) {
            debug!("Unmute requested for stream {}, but it was not muted", stream_id);
            return Ok(UnmuteOutcome::NotMuted);
        }

        self.save(&table).await?;
        info!("Unmuted stream {}", stream_id);

        Ok(UnmuteOutcome::Unmuted)
    }

    /// Mute state of `stream_id` at `now`. An expired entry is removed here.
    pub async fn status(&self, stream_id: &str, now: DateTime<Utc>) -> Result<MuteStatus, Error> {
        require_stream(stream_id)?;

        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        self.status_locked(&mut table, stream_id, now).await
    }

    /// Like [`status`](Self::status) at the current time, except that a
    /// mention lifts an active mute and yields [`MuteStatus::JustUnmuted`].
    /// Must be consulted before deciding to drop a message, or the mention
    /// would be swallowed by the mute it is meant to end.
    pub async fn check_and_clear_on_mention(
        &self,
        stream_id: &str,
        mentioned: bool,
    ) -> Result<MuteStatus, Error> {
        require_stream(stream_id)?;
        let now = self.now();

        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        let status = self.status_locked(&mut table, stream_id, now).await?;

        if mentioned && status.is_muted() {
            table.remove(stream_id);
            self.save(&table).await?;
            info!("Unmuted stream {} because the bot was mentioned", stream_id);
            return Ok(MuteStatus::JustUnmuted);
        }

        Ok(status)
    }

    /// Caller must hold `lock` and pass the table it loaded under it
    async fn status_locked(
        &self,
        table: &mut MuteTable,
        stream_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MuteStatus, Error> {
        let Some(unmute_at) = table.get(stream_id) else {
            return Ok(MuteStatus::NotMuted);
        };

        if now < unmute_at {
            return Ok(MuteStatus::Muted {
                unmute_at,
                remaining: unmute_at - now,
            });
        }

        table.remove(stream_id);
        self.save(table).await?;
        info!("Mute expired for stream {}, removed from table", stream_id);

        Ok(MuteStatus::NotMuted)
    }
}

fn require_stream(stream_id: &str) -> Result<(), Error> {
    if stream_id.trim().is_empty() {
        return Err(Error::MissingStreamContext);
    }
    Ok(())
}
