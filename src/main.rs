use std::sync::Arc;

use hush::services::reply::NoopReplyGenerator;
use hush::services::storage::{self, KvStore};
use hush::{bot, config::Settings};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hush");

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let store = match storage::open(settings.database_url.as_deref()).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open storage: {}", e);
            std::process::exit(1);
        }
    };

    info!("Storage initialized ({})", store.backend());

    // No language model is bundled; delivered messages are logged and dropped
    let reply_generator = Arc::new(NoopReplyGenerator);

    if let Err(e) = bot::framework::run(settings, store, reply_generator).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}
