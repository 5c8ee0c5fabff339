use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{info, warn};
use crate::services::send_service::{self, SEND_FIELDS};
use crate::services::dispatch_service::DispatchError;
use crate::utils::{clip_detail, parse_form};

/// `$send help` on its own shows usage; `help` alongside other fields is a value
fn wants_help(args: &[&str]) -> bool {
    matches!(args, ["help"])
}

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if wants_help(args) {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("💸 Send Command")
            .description("Prepare a blobcoin transfer for the client script")
            .field("Usage",
                "`$send <sender> <recipient> <amount>`\n\
                 `$send sender=<key> recipient=<key> amount=<amount>`",
                false)
            .field("Examples",
                "`$send alice bob 10`\n\
                 `$send amount=10 recipient=bob sender=alice`\n\
                 `$send alice recipient=\"\" 10` (empty recipient)\n\
                 `$send sender=\"alice smith\" bob 10` (value with spaces)",
                false)
            .field("Notes",
                "• Values are passed through exactly as typed\n\
                 • Missing fields are sent as empty values\n\
                 • Named and positional fields can be mixed",
                false)
            .color(0x00ff00);

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(help_embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let config = {
        let data = ctx.data.read().await;
        data.get::<crate::WalletSettings>()
            .ok_or("Wallet configuration not initialized".to_string())?
            .clone()
    };

    let form = parse_form(SEND_FIELDS, args);

    match send_service::execute_send(&config, &form).await {
        Ok(result) => {
            info!(
                "{} prepared transfer {} -> {} ({}): {}",
                msg.author.name,
                result.request.sender,
                result.request.recipient,
                result.request.amount,
                result.outcome.label()
            );
            let embed = send_service::create_send_embed(&result);
            msg.channel_id
                .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
                .await
                .map_err(|e| e.to_string())?;
            Ok(())
        }
        Err(e) => {
            warn!("Send dispatch failed: {}", e);
            Err(describe_dispatch_error(&e))
        }
    }
}

fn describe_dispatch_error(err: &DispatchError) -> String {
    match err {
        DispatchError::ScriptFailed { exit_code, stderr } if !stderr.is_empty() => {
            format!(
                "Client script exited with code {}\n```\n{}\n```",
                exit_code,
                clip_detail(stderr)
            )
        }
        other => other.to_string(),
    }
}
