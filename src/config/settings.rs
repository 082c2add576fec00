use std::env;
use std::path::PathBuf;

use crate::config::plugin::PluginConfig;
use crate::constants::defaults::DEFAULT_COMMAND_PREFIX;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    /// Postgres connection string; mutes are kept in memory when unset
    pub database_url: Option<String>,
    pub guild_id: Option<u64>,
    pub command_prefix: String,
    /// Users allowed to mute/unmute the bot, in addition to the application owner
    pub master_ids: Vec<u64>,
    pub plugin: PluginConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let command_prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());

        let master_ids = env::var("MASTER_IDS")
            .map(|s| parse_id_list(&s))
            .unwrap_or_default();

        let plugin_path = env::var("PLUGIN_CONFIG")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let plugin = PluginConfig::load(plugin_path.as_deref()).map_err(|e| e.to_string())?;

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            command_prefix,
            master_ids,
            plugin,
        })
    }
}

/// Parse a comma separated list of user ids, skipping anything malformed.
/// Discord ids are never zero.
fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(parse_id_list("12,abc, ,34"), vec![12, 34]);
        assert_eq!(parse_id_list("0,5"), vec![5]);
        assert!(parse_id_list("").is_empty());
    }
}
