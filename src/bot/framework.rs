use std::collections::HashSet;
use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId, UserId};
use tracing::{debug, error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::event_handler;
use crate::services::reply::ReplyGenerator;
use crate::services::storage::KvStore;

pub async fn run(
    settings: Settings,
    store: Arc<dyn KvStore>,
    reply_generator: Arc<dyn ReplyGenerator>,
) -> Result<(), Error> {
    let data = Arc::new(Data::new(settings.clone(), store, reply_generator));

    // The application owner is added by poise on startup
    let owners: HashSet<UserId> = settings
        .master_ids
        .iter()
        .map(|id| UserId::new(*id))
        .collect();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::owner::mute::mute(), commands::owner::mute::unmute()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.command_prefix.clone()),
                ..Default::default()
            },
            owners,
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::NotAnOwner { ctx, .. } => {
                            debug!("Ignoring /{} from non-owner {}", ctx.command().name, ctx.author().id);
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Ordinary chat that happens to start with the prefix
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                // Mutes from a previous run are not resumed
                if let Err(e) = data.mutes.reset().await {
                    warn!("Failed to clear stale mutes: {:?}", e);
                }

                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        match poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id).await {
                            Ok(_) => {
                                info!(
                                    "Registered {} commands for guild {}",
                                    framework.options().commands.len(),
                                    guild_id
                                );
                            }
                            Err(e) => {
                                error!("Failed to register guild commands: {:?}", e);
                                error!("Re-invite URL: https://discord.com/api/oauth2/authorize?client_id={}&permissions=0&scope=bot%20applications.commands", ready.user.id);
                                return Err(Error::Serenity(e));
                            }
                        }
                    }
                    None => {
                        match poise::builtins::register_globally(ctx, &framework.options().commands).await {
                            Ok(_) => {
                                info!(
                                    "Registered {} commands globally",
                                    framework.options().commands.len()
                                );
                                info!("Note: Global commands can take up to 1 hour to appear in all servers");
                            }
                            Err(e) => {
                                error!("Failed to register commands globally: {:?}", e);
                                return Err(Error::Serenity(e));
                            }
                        }
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}
