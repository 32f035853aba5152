use async_trait::async_trait;

use crate::{CartId, Result};

/// Keyed byte store that carts persist their state into.
///
/// The cart serializes its full state into an opaque blob and writes it
/// under its [`CartId`]; any keyed byte store satisfies the contract -
/// an HTTP session, a cache, or a database row. Implementations must be
/// thread-safe (Send + Sync).
///
/// Callers are expected to hold at-most-one-writer-at-a-time per cart ID;
/// the store itself does not serialize concurrent writers for the same key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the state blob stored under the given cart ID.
    ///
    /// Returns `None` when no state has been stored for the ID; an absent
    /// key is not an error.
    async fn load(&self, cart_id: &CartId) -> Result<Option<Vec<u8>>>;

    /// Writes the state blob under the given cart ID, replacing any
    /// previous value.
    async fn store(&self, cart_id: &CartId, state: &[u8]) -> Result<()>;

    /// Removes the state stored under the given cart ID.
    ///
    /// Removing an absent key is a no-op.
    async fn remove(&self, cart_id: &CartId) -> Result<()>;
}
