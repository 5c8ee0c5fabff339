pub mod send;
pub mod check;
pub mod help;

use std::time::Duration;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use tracing::{debug, error, warn};
use crate::utils::errors::EMBED_DESCRIPTION_LIMIT;
use crate::utils::{check_cooldown, check_global_rate_limit, clip_value, tokenize, CooldownActive};

/// Controls a message can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Send,
    Check,
    Help,
}

impl Control {
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "$send" | "$transfer" => Some(Control::Send),
            "$check" => Some(Control::Check),
            "$help" => Some(Control::Help),
            _ => None,
        }
    }

    /// Check reads a field and nothing more, so it is never throttled
    fn is_guarded(self) -> bool {
        !matches!(self, Control::Check)
    }

    fn name(self) -> &'static str {
        match self {
            Control::Send => "send",
            Control::Check => "check",
            Control::Help => "help",
        }
    }
}

/// Whether a guarded control may run right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Proceed,
    /// Global request window is full
    Throttled(Duration),
    Cooldown(CooldownActive),
}

/// Apply the global window, then the per-user cooldown, to guarded controls.
/// Unguarded controls proceed without touching either.
pub async fn admit(control: Control, user_id: UserId, cooldown: Option<Duration>) -> Admission {
    if !control.is_guarded() {
        return Admission::Proceed;
    }

    if let Err(wait) = check_global_rate_limit().await {
        return Admission::Throttled(wait);
    }

    if let Some(cooldown) = cooldown {
        if let Err(active) = check_cooldown(user_id, control.name(), cooldown).await {
            return Admission::Cooldown(active);
        }
    }

    Admission::Proceed
}

async fn send_error_embed(ctx: &Context, msg: &Message, title: &str, description: String, color: u32) {
    let embed = serenity::builder::CreateEmbed::default()
        .title(title)
        .description(clip_value(&description, EMBED_DESCRIPTION_LIMIT))
        .color(color);

    if let Err(e) = msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
    {
        warn!("Failed to deliver \"{}\" embed: {}", title, e);
    }
}

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let tokens = tokenize(&msg.content);
    let Some((command, rest)) = tokens.split_first() else {
        return;
    };
    let Some(control) = Control::from_command(command) else {
        return;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let cooldown = {
        let data = ctx.data.read().await;
        data.get::<crate::WalletSettings>().map(|c| c.cooldown)
    };
    match admit(control, msg.author.id, cooldown).await {
        Admission::Proceed => {}
        Admission::Throttled(wait) => {
            debug!("Global rate limit hit, {}ms until a slot frees", wait.as_millis());
            return;
        }
        Admission::Cooldown(active) => {
            if active.should_warn {
                send_error_embed(
                    ctx,
                    msg,
                    "Command Cooldown",
                    format!(
                        "⏳ Please wait {} seconds before using this command again.",
                        active.remaining.as_secs().max(1)
                    ),
                    0xffa500,
                )
                .await;
            }
            return;
        }
    }

    let result = match control {
        Control::Send => send::execute(ctx, msg, &args).await,
        Control::Check => check::execute(msg, &args),
        Control::Help => help::execute(ctx, msg).await,
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);

        let user_message = if e.contains("429") || e.contains("rate limit") {
            "⚠️ **Rate Limited**: Discord is rate limiting us. Please try again in a moment.".to_string()
        } else if e.contains("HTTP request") {
            "⚠️ **Network Error**: Having trouble connecting to Discord. Please try again.".to_string()
        } else if !e.is_empty() {
            format!("❌ {}", e)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        send_error_embed(ctx, msg, "Command Error", user_message, 0xff0000).await;
    }
}
