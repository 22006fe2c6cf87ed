//! Session-scoped API key.

use std::fmt;

/// The bearer token authorizing gateway calls.
///
/// Held in memory for the lifetime of a session only. `Debug` never prints the
/// key, so a credential can sit inside structs that get logged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Whether a non-empty key is held. No other validation is performed.
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// Replace the key, ignoring empty values so an emptied input keeps the
    /// session's key. Returns whether the key changed.
    pub fn update(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || key == self.0 {
            return false;
        }
        self.0 = key.to_string();
        true
    }

    /// The raw key, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            f.write_str("Credential(<redacted>)")
        } else {
            f.write_str("Credential(<empty>)")
        }
    }
}

impl From<String> for Credential {
    fn from(key: String) -> Self {
        Self(key)
    }
}
