use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not parse duration: {0}")]
    InvalidDuration(String),

    #[error("Plugin is disabled")]
    PluginDisabled,

    #[error("Mute feature is disabled")]
    FeatureDisabled,

    #[error("No conversation to act on")]
    MissingStreamContext,

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }
}

