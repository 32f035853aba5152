use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier keying one cart in the session store.
///
/// Wraps a string so several carts can live side by side in the same
/// store (one per user session, a wishlist next to the main cart, and
/// so on) without mixing up keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    /// Creates a cart ID from an existing key, typically a session ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random cart ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the cart ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CartId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CartId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CartId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_id_random_creates_unique_ids() {
        let id1 = CartId::random();
        let id2 = CartId::random();
        assert_ne!(id1, id2);
    }

    #[test]
    fn cart_id_preserves_value() {
        let id = CartId::new("session-42");
        assert_eq!(id.as_str(), "session-42");

        let id2: CartId = "session-43".into();
        assert_eq!(id2.as_str(), "session-43");
    }

    #[test]
    fn cart_id_serialization_roundtrip() {
        let id = CartId::new("session-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"session-42\"");
        let deserialized: CartId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
