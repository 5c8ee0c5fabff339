use serenity::builder::CreateEmbed;
use tracing::debug;
use crate::config::WalletConfig;
use crate::models::invocation::UNBUFFERED_FLAG;
use crate::models::{DispatchOutcome, InvocationConfig, TransferRequest};
use crate::services::dispatch_service::{self, DispatchError};
use crate::utils::errors::EMBED_FIELD_LIMIT;
use crate::utils::{clip_detail, clip_value, CommandForm};

/// Fields of the send form, in positional order
pub const SEND_FIELDS: &[&str] = &["sender", "recipient", "amount"];

pub struct SendResult {
    pub request: TransferRequest,
    pub invocation: InvocationConfig,
    pub outcome: DispatchOutcome,
}

/// Read the current sender, recipient and amount values. Never fails.
pub fn collect_transfer(form: &CommandForm) -> TransferRequest {
    TransferRequest::new(
        form.field("sender"),
        form.field("recipient"),
        form.field("amount"),
    )
}

/// Build the client script invocation record for a transfer
pub fn prepare_invocation(request: &TransferRequest) -> InvocationConfig {
    InvocationConfig {
        flags: vec![UNBUFFERED_FLAG.to_string()],
        args: vec![
            request.sender.clone(),
            request.recipient.clone(),
            request.amount.clone(),
        ],
    }
}

/// Collect, prepare, and hand off to whichever runner is configured
pub async fn execute_send(
    config: &WalletConfig,
    form: &CommandForm,
) -> Result<SendResult, DispatchError> {
    let request = collect_transfer(form);
    let invocation = prepare_invocation(&request);
    debug!("Prepared invocation {:?}", invocation);

    let outcome = dispatch_service::dispatch(
        &config.dispatch,
        config.dispatch_timeout,
        &invocation,
        &request,
    )
    .await?;

    Ok(SendResult {
        request,
        invocation,
        outcome,
    })
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "*(empty)*".to_string()
    } else {
        // Two backticks of wrapping
        format!("`{}`", clip_value(value, EMBED_FIELD_LIMIT - 2))
    }
}

/// Wrap `body` in a code block, clipping it so the whole field fits
fn code_block(lang: &str, body: &str) -> String {
    let wrapping = format!("```{}\n\n```", lang).chars().count();
    format!("```{}\n{}\n```", lang, clip_value(body, EMBED_FIELD_LIMIT - wrapping))
}

/// Embed fields as `(name, value, inline)`, each value within Discord's limit
pub fn send_embed_fields(result: &SendResult) -> Vec<(String, String, bool)> {
    let record = serde_json::to_string(&result.invocation)
        .unwrap_or_else(|_| format!("{:?}", result.invocation));

    let mut fields = vec![
        ("From".to_string(), display_value(&result.request.sender), true),
        ("To".to_string(), display_value(&result.request.recipient), true),
        ("Amount".to_string(), display_value(&result.request.amount), true),
        ("Invocation".to_string(), code_block("json", &record), false),
        ("Status".to_string(), result.outcome.label(), false),
    ];

    if let DispatchOutcome::ScriptCompleted { stdout, .. } = &result.outcome {
        if !stdout.is_empty() {
            fields.push((
                "Client Output".to_string(),
                code_block("", &clip_detail(&stdout.join("\n"))),
                false,
            ));
        }
    }

    fields
}

pub fn create_send_embed(result: &SendResult) -> CreateEmbed {
    CreateEmbed::default()
        .title("💸 Transfer")
        .fields(send_embed_fields(result))
        .color(0x00ff00)
}
