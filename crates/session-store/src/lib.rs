pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::CartId;
pub use error::{Result, SessionStoreError};
pub use memory::MemorySessionStore;
pub use postgres::PostgresSessionStore;
pub use store::SessionStore;
