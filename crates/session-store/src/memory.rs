use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{CartId, Result, store::SessionStore};

/// In-memory session store.
///
/// Keeps state blobs in a shared map and provides the same interface as
/// the PostgreSQL implementation. Cloning is cheap and clones share the
/// same underlying map, so a cart and a test can observe each other.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<CartId, Vec<u8>>>>,
}

impl MemorySessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of carts currently stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if state is stored under the given cart ID.
    pub async fn contains(&self, cart_id: &CartId) -> bool {
        self.entries.read().await.contains_key(cart_id)
    }

    /// Clears all stored state.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, cart_id: &CartId) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(entries.get(cart_id).cloned())
    }

    async fn store(&self, cart_id: &CartId, state: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(cart_id.clone(), state.to_vec());
        Ok(())
    }

    async fn remove(&self, cart_id: &CartId) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(cart_id);
        Ok(())
    }
}
