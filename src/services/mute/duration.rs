use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;

static RE_MINUTES: Lazy<Regex> = lazy_regex!(r"([0-9]+)\s*(?:分钟|min|m)");
static RE_HOURS: Lazy<Regex> = lazy_regex!(r"([0-9]+)\s*(?:小时|h)");
static RE_DAYS: Lazy<Regex> = lazy_regex!(r"([0-9]+)\s*天");

/// Unit classes in the order they are tried, with their factor to minutes.
/// The first class that matches anywhere in the text wins.
fn unit_classes() -> [(&'static Regex, i64); 3] {
    [(&*RE_MINUTES, 1), (&*RE_HOURS, 60), (&*RE_DAYS, 24 * 60)]
}

/// Parse a free-text duration such as "10min", "30分钟", "1小时", "2h" or
/// "2天" into minutes.
///
/// Returns `None` when no unit class matches, or when the quantity of the
/// matching class does not fit in the minute range.
pub fn parse_duration(text: &str) -> Option<i64> {
    let text = text.trim().to_lowercase();

    for (pattern, factor) in unit_classes() {
        if let Some(caps) = pattern.captures(&text) {
            return caps[1].parse::<i64>().ok()?.checked_mul(factor);
        }
    }

    None
}
