use crate::config::plugin::AliasSection;

/// A chat message recognised as a mute/unmute trigger phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasCommand<'a> {
    /// Text after the phrase, if any, is the duration
    Mute { duration: Option<&'a str> },
    Unmute,
}

/// Match the start of `text` against the configured trigger phrases.
/// Mute phrases are tried before unmute phrases; blank phrases never match.
pub fn match_alias<'a>(text: &'a str, aliases: &AliasSection) -> Option<AliasCommand<'a>> {
    let text = text.trim();

    if let Some(rest) = strip_any(text, &aliases.mute) {
        let duration = Some(rest.trim()).filter(|d| !d.is_empty());
        return Some(AliasCommand::Mute { duration });
    }

    strip_any(text, &aliases.unmute).map(|_| AliasCommand::Unmute)
}

fn strip_any<'a>(text: &'a str, phrases: &[String]) -> Option<&'a str> {
    phrases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .find_map(|p| text.strip_prefix(p))
}
