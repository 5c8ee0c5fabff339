pub mod errors;
pub mod fields;
pub mod ratelimit;

pub use errors::{clip_detail, clip_value};
pub use fields::{parse_form, tokenize, CommandForm};
pub use ratelimit::{check_cooldown, check_global_rate_limit, CooldownActive};
