use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::bot::error::Error;
use crate::constants::defaults::{
    DEFAULT_MUTE_ALIASES, DEFAULT_MUTE_MINUTES, DEFAULT_UNMUTE_ALIASES,
};
use crate::constants::messages;

/// Behaviour options loaded from the JSON file named by `PLUGIN_CONFIG`.
/// Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub plugin: PluginSection,
    pub features: FeatureSection,
    pub defaults: DefaultsSection,
    pub aliases: AliasSection,
    pub messages: MessageSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginSection {
    /// Kill-switch for everything: commands, aliases, mention wake and filtering
    pub enabled: bool,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureSection {
    pub mute_enabled: bool,
    /// Whether mentioning the bot lifts an active mute
    pub at_unmute_enabled: bool,
}

impl Default for FeatureSection {
    fn default() -> Self {
        Self {
            mute_enabled: true,
            at_unmute_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub default_mute_minutes: i64,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            default_mute_minutes: DEFAULT_MUTE_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AliasSection {
    pub mute: Vec<String>,
    pub unmute: Vec<String>,
}

impl Default for AliasSection {
    fn default() -> Self {
        Self {
            mute: DEFAULT_MUTE_ALIASES.iter().map(|s| s.to_string()).collect(),
            unmute: DEFAULT_UNMUTE_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessageSection {
    pub mute_start: String,
    pub unmute_start: String,
    pub muted_reply: String,
    pub at_unmute: String,
    pub not_muted: String,
    pub invalid_duration: String,
    pub plugin_disabled: String,
    pub feature_disabled: String,
}

impl Default for MessageSection {
    fn default() -> Self {
        Self {
            mute_start: messages::MUTE_START.to_string(),
            unmute_start: messages::UNMUTE_START.to_string(),
            muted_reply: messages::MUTED_REPLY.to_string(),
            at_unmute: messages::AT_UNMUTE.to_string(),
            not_muted: messages::NOT_MUTED.to_string(),
            invalid_duration: messages::INVALID_DURATION.to_string(),
            plugin_disabled: messages::PLUGIN_DISABLED.to_string(),
            feature_disabled: messages::FEATURE_DISABLED.to_string(),
        }
    }
}

impl PluginConfig {
    /// Load from a JSON file, or fall back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_json_str(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();
        assert!(config.plugin.enabled);
        assert!(config.features.mute_enabled);
        assert!(config.features.at_unmute_enabled);
        assert_eq!(config.defaults.default_mute_minutes, 10);
        assert_eq!(config.aliases.mute, vec!["绫绫闭嘴".to_string()]);
        assert_eq!(config.aliases.unmute, vec!["绫绫张嘴".to_string()]);
        assert!(config.messages.muted_reply.is_empty());
        assert!(config.messages.mute_start.contains("{unmute_time_str}"));
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = PluginConfig::from_json_str(
            r#"{
                "plugin": { "enabled": false },
                "defaults": { "default_mute_minutes": 30 },
                "aliases": { "mute": ["quiet bot", "shh"] },
                "messages": { "muted_reply": "shh, I'm muted" }
            }"#,
        )
        .unwrap();

        assert!(!config.plugin.enabled);
        assert!(config.features.mute_enabled);
        assert_eq!(config.defaults.default_mute_minutes, 30);
        assert_eq!(config.aliases.mute, vec!["quiet bot", "shh"]);
        assert_eq!(config.aliases.unmute, vec!["绫绫张嘴"]);
        assert_eq!(config.messages.muted_reply, "shh, I'm muted");
        assert_eq!(config.messages.unmute_start, messages::UNMUTE_START);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = PluginConfig::from_json_str("{}").unwrap();
        assert_eq!(config.defaults.default_mute_minutes, DEFAULT_MUTE_MINUTES);
        assert_eq!(config.messages.at_unmute, messages::AT_UNMUTE);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = PluginConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = PluginConfig::load(Some(Path::new("/nonexistent/hush.json")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_no_path_is_default() {
        let config = PluginConfig::load(None).unwrap();
        assert!(config.plugin.enabled);
    }
}
