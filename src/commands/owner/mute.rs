use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::mute::responder;
use crate::services::reply::{announce_then_reply, ReplyTrigger};
use crate::utils::formatting::stream_id_for;

/// Keep the bot quiet in this channel
#[poise::command(slash_command, prefix_command, owners_only)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "How long, e.g. 10min, 2h, 30分钟, 1小时, 2天"]
    #[rest]
    duration: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();
    let stream_id = stream_id_for(ctx.channel_id());

    let text =
        responder::handle_mute(&data.mutes, data.config(), &stream_id, duration.as_deref()).await?;
    ctx.say(text).await?;

    Ok(())
}

/// Let the bot talk again in this channel
#[poise::command(slash_command, prefix_command, owners_only)]
pub async fn unmute(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let stream_id = stream_id_for(ctx.channel_id());

    let outcome = responder::handle_unmute(&data.mutes, data.config(), &stream_id).await?;

    if outcome.unmuted {
        announce_then_reply(
            Some(ctx.say(outcome.text)),
            data.reply_generator.clone(),
            stream_id,
            ReplyTrigger::Command,
        )
        .await;
    } else {
        ctx.say(outcome.text).await?;
    }

    Ok(())
}
