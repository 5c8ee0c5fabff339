use crate::models::LookupKey;
use crate::utils::CommandForm;

/// Fields of the check form
pub const CHECK_FIELDS: &[&str] = &["key"];

/// Read the current key value. Never fails; an empty key is a valid read.
pub fn collect_key(form: &CommandForm) -> LookupKey {
    LookupKey(form.field("key").to_string())
}
