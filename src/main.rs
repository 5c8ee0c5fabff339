use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{info, warn, error, debug};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use config::{DispatchMode, WalletConfig};

struct Handler;

struct WalletSettings;

impl TypeMapKey for WalletSettings {
    type Value = WalletConfig;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        debug!("Checking Discord rate limit status...");
        match ctx.http.get_current_user().await {
            Ok(_) => {
                info!("No rate limit detected - wallet is fully ready!");
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("429") || error_msg.contains("rate limit") || error_msg.contains("Ratelimited") {
                    warn!("Wallet is being rate limited by Discord! Error: {}", error_msg);
                } else {
                    warn!("Failed to check rate limit status: {}", error_msg);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::from_default_env();
    let filter = match (
        "blobwallet=debug".parse::<Directive>(),
        "serenity=warn".parse::<Directive>(),
    ) {
        (Ok(own), Ok(framework)) => filter.add_directive(own).add_directive(framework),
        _ => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🫧 Starting blobwallet v{}...", env!("CARGO_PKG_VERSION"));

    let config = match WalletConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    match &config.dispatch {
        DispatchMode::None => info!("Dispatch disabled - send records are prepared only"),
        DispatchMode::Script { interpreter, script } => {
            info!("Dispatching send records to {} {}", interpreter, script.display())
        }
        DispatchMode::Client { base_url } => {
            info!("Dispatching send records to blobchain client at {}", base_url)
        }
    }

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<WalletSettings>(config);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
