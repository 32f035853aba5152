use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::{CartId, Result, store::SessionStore};

/// PostgreSQL-backed session store.
///
/// Each cart occupies one row in the `cart_sessions` table; writes are
/// upserts so the table never accumulates stale versions of a cart.
#[derive(Debug, Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgreSQL session store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn load(&self, cart_id: &CartId) -> Result<Option<Vec<u8>>> {
        let state: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT state FROM cart_sessions WHERE cart_id = $1")
                .bind(cart_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(state)
    }

    async fn store(&self, cart_id: &CartId, state: &[u8]) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_sessions (cart_id, state, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (cart_id)
            DO UPDATE SET state = EXCLUDED.state, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(cart_id.as_str())
        .bind(state)
        .execute(&self.pool)
        .await?;

        debug!(cart_id = %cart_id, bytes = state.len(), "stored cart state");
        Ok(())
    }

    async fn remove(&self, cart_id: &CartId) -> Result<()> {
        sqlx::query("DELETE FROM cart_sessions WHERE cart_id = $1")
            .bind(cart_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
