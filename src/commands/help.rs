use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 Blobwallet Commands Help")
        .description("**Blobwallet** - front end for sending blobcoin through a blobchain client")
        .color(0x00b0f4)
        .field(
            "🎯 General",
            "`$help` - Show this help message",
            false,
        )
        .field(
            "💸 Transfers",
            "`$send <sender> <recipient> <amount>` - Prepare a transfer\n`$send help` - Field syntax and examples\nQuote values containing spaces: `sender=\"alice smith\"`\nClient mode: an unconfirmed HTTP 500 from the stock client means it received the transfer",
            false,
        )
        .field(
            "🔑 Keys",
            "`$check <key>` - Read a lookup key",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "Cooldown per user on `$send`\nGlobal 50 requests/second limit",
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
