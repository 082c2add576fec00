//! Default reply texts. Every one of these can be overridden in the plugin
//! config file under `messages`.

/// Placeholder replaced with the formatted unmute time in `MUTE_START`
pub const UNMUTE_TIME_PLACEHOLDER: &str = "{unmute_time_str}";

pub const MUTE_START: &str = "好的，我将在当前聊天中保持安静，直到 {unmute_time_str}。";
pub const UNMUTE_START: &str = "好的，我恢复发言了！";
/// Empty means stay silent while muted
pub const MUTED_REPLY: &str = "";
pub const AT_UNMUTE: &str = "我被 @ 了，所以恢复发言啦！";
pub const NOT_MUTED: &str = "我当前并未被禁言哦。";
pub const INVALID_DURATION: &str =
    "❌ 无法解析指定的时长，请使用如 '10min', '30分钟', '1小时' 等格式。";
pub const PLUGIN_DISABLED: &str = "❌ 插件已被禁用。";
pub const FEATURE_DISABLED: &str = "❌ 静音功能已被禁用。";
