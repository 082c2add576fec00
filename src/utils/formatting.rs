use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone};
use serenity::all::ChannelId;

use crate::constants::defaults::UNMUTE_TIME_FORMAT;
use crate::constants::messages::UNMUTE_TIME_PLACEHOLDER;

/// Stream key for a Discord channel
pub fn stream_id_for(channel_id: ChannelId) -> String {
    channel_id.get().to_string()
}

/// Wall-clock time a mute ends, e.g. "14:05"
pub fn format_clock_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(UNMUTE_TIME_FORMAT).to_string()
}

/// Fill `{unmute_time_str}` in a mute confirmation template
pub fn render_mute_start(template: &str, unmute_time_str: &str) -> String {
    template.replace(UNMUTE_TIME_PLACEHOLDER, unmute_time_str)
}

/// Format remaining mute time for display, rounded down to the largest unit
pub fn format_remaining(remaining: TimeDelta) -> String {
    let total_secs = remaining.num_seconds().max(0);

    if total_secs < 60 {
        format!("{} second{}", total_secs, if total_secs == 1 { "" } else { "s" })
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if total_secs < 86400 {
        let hours = total_secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = total_secs / 86400;
        format!("{} day{}", days, if days == 1 { "" } else { "s" })
    }
}
