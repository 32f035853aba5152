//! Cart error types.

use session_store::SessionStoreError;
use thiserror::Error;

use crate::hooks::{HookError, HookPoint};

/// Errors that can occur during cart operations.
///
/// When a mutating operation fails in the persistence step, the in-memory
/// mutation has already been applied but is not yet durable; the caller
/// decides whether to retry the write.
#[derive(Debug, Error)]
pub enum CartError {
    /// A zero quantity was passed to `add`.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// The session store failed to load or store cart state.
    #[error("Session store error: {0}")]
    Session(#[from] SessionStoreError),

    /// Cart state could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A registered hook handler failed, aborting the operation.
    #[error("{hook} handler failed: {source}")]
    Hook {
        hook: HookPoint,
        #[source]
        source: HookError,
    },
}
