/// Storage namespace for everything this bot persists
pub const PLUGIN_NAMESPACE: &str = "hush";

/// Key holding the serialized `stream_id -> unmute_at` table
pub const STORAGE_KEY_MUTED_STREAMS: &str = "muted_streams";

/// Mute length used when no duration is given
pub const DEFAULT_MUTE_MINUTES: i64 = 10;

/// Prefix for text commands (slash commands are always registered)
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Trigger phrases that mute the bot in the current channel
pub const DEFAULT_MUTE_ALIASES: &[&str] = &["绫绫闭嘴"];

/// Trigger phrases that unmute the bot in the current channel
pub const DEFAULT_UNMUTE_ALIASES: &[&str] = &["绫绫张嘴"];

/// Display format for the time a mute ends
pub const UNMUTE_TIME_FORMAT: &str = "%H:%M";
