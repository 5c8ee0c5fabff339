use serenity::model::channel::Message;
use tracing::debug;
use crate::services::check_service::{self, CHECK_FIELDS};
use crate::utils::parse_form;

/// Read the key field. Nothing is sent back and nothing else is touched.
pub fn execute(msg: &Message, args: &[&str]) -> Result<(), String> {
    let form = parse_form(CHECK_FIELDS, args);
    let key = check_service::collect_key(&form);
    debug!("{} checked key {:?}", msg.author.name, key.as_str());
    Ok(())
}
