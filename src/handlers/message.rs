use std::collections::HashSet;
use std::sync::Arc;

use serenity::all::{ChannelId, Context, Message, UserId};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::config::plugin::AliasSection;
use crate::services::alias::{match_alias, AliasCommand};
use crate::services::mute::responder::{self, Screening};
use crate::services::reply::{announce_then_reply, ReplyTrigger};
use crate::utils::formatting::stream_id_for;

/// Where an inbound message goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Ignore,
    /// Owner prefix command; poise has already run it
    Command,
    Alias(AliasCommand<'a>),
    Screen,
}

fn route<'a>(
    content: &'a str,
    from_bot: bool,
    from_owner: bool,
    prefix: &str,
    aliases: &AliasSection,
) -> Route<'a> {
    if from_bot {
        return Route::Ignore;
    }
    if !from_owner {
        return Route::Screen;
    }
    if let Some(command) = match_alias(content, aliases) {
        return Route::Alias(command);
    }
    if !prefix.is_empty() && content.starts_with(prefix) {
        return Route::Command;
    }
    Route::Screen
}

/// Inbound chat message: owner aliases first, then mention wake and the
/// mute filter in front of the reply pipeline.
pub async fn handle_message(
    ctx: &Context,
    data: &Arc<Data>,
    owners: &HashSet<UserId>,
    msg: &Message,
) -> Result<(), Error> {
    let stream_id = stream_id_for(msg.channel_id);

    let from_owner = owners.contains(&msg.author.id);
    let prefix = &data.settings.command_prefix;

    match route(&msg.content, msg.author.bot, from_owner, prefix, &data.config().aliases) {
        Route::Ignore => return Ok(()),
        Route::Command => {
            debug!("Message {} in stream {} is a command", msg.id, stream_id);
            return Ok(());
        }
        Route::Alias(command) => {
            return run_alias(ctx, data, msg.channel_id, &stream_id, command).await;
        }
        Route::Screen => {}
    }

    let bot_id = ctx.cache.current_user().id;
    let mentioned = msg.mentions_user_id(bot_id);

    let screening = responder::route_message(
        &data.mutes,
        data.config(),
        data.reply_generator.as_ref(),
        &stream_id,
        &msg.author.name,
        mentioned,
    )
    .await?;

    match screening {
        Screening::Deliver => {
            debug!("Message {} in stream {} delivered", msg.id, stream_id);
        }
        Screening::Suppress { reply, .. } => {
            if let Some(text) = reply {
                if let Err(e) = msg.channel_id.say(ctx, text).await {
                    warn!("Failed to send muted reply in stream {}: {:?}", stream_id, e);
                }
            }
        }
        Screening::Woken { reply } => {
            info!("Woken up by {} in stream {}", msg.author.name, stream_id);
            let trigger = ReplyTrigger::Mention {
                by: msg.author.name.clone(),
            };
            announce_then_reply(
                reply.map(|text| msg.channel_id.say(ctx, text)),
                data.reply_generator.clone(),
                stream_id,
                trigger,
            )
            .await;
        }
    }

    Ok(())
}

async fn run_alias(
    ctx: &Context,
    data: &Arc<Data>,
    channel_id: ChannelId,
    stream_id: &str,
    command: AliasCommand<'_>,
) -> Result<(), Error> {
    debug!("Alias {:?} in stream {}", command, stream_id);

    match command {
        AliasCommand::Mute { duration } => {
            let text = responder::handle_mute(&data.mutes, data.config(), stream_id, duration).await?;
            channel_id.say(ctx, text).await?;
        }
        AliasCommand::Unmute => {
            let outcome = responder::handle_unmute(&data.mutes, data.config(), stream_id).await?;

            if outcome.unmuted {
                announce_then_reply(
                    Some(channel_id.say(ctx, outcome.text)),
                    data.reply_generator.clone(),
                    stream_id.to_string(),
                    ReplyTrigger::Alias,
                )
                .await;
            } else {
                channel_id.say(ctx, outcome.text).await?;
            }
        }
    }

    Ok(())
}
