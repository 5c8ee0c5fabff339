//! Check path models

/// Value read from the key field of the check form. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupKey(pub String);

impl LookupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
