//! Random identifiers for shortener payloads
//!
//! Both identifiers wrap a UUID v4. Every call to `new` draws from the
//! thread-local generator, so values never collide across tasks or users
//! and no generator state needs to be shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Random token appended to a base URL to make an original URL unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlToken(Uuid);

impl UrlToken {
    /// Create a fresh random token
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UrlToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UrlToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier submitted with each batch entry
///
/// The service echoes it back next to the short URL so callers can match
/// batch inputs to outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_url_token_creation() {
        let t1 = UrlToken::new();
        let t2 = UrlToken::new();
        assert_ne!(t1, t2, "UrlTokens should be unique");
    }

    #[test]
    fn test_correlation_id_serializes_as_plain_string() {
        let uuid = Uuid::nil();
        let id = CorrelationId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_display_matches_uuid() {
        let token = UrlToken::new();
        assert_eq!(token.to_string(), token.as_uuid().to_string());
    }

    proptest! {
        #[test]
        fn prop_tokens_never_collide(n in 1usize..2_000) {
            let set: HashSet<UrlToken> = (0..n).map(|_| UrlToken::new()).collect();
            prop_assert_eq!(set.len(), n);
        }
    }
}
