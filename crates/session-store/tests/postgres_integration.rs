//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p session-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use session_store::{CartId, PostgresSessionStore, SessionStore};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_cart_sessions_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn get_store() -> PostgresSessionStore {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();
    PostgresSessionStore::new(pool)
}

#[tokio::test]
async fn load_absent_cart_returns_none() {
    let store = get_store().await;

    let result = store.load(&CartId::new("pg-missing")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn store_and_load_roundtrip() {
    let store = get_store().await;
    let cart_id = CartId::new("pg-roundtrip");

    store.store(&cart_id, b"cart-state").await.unwrap();

    let loaded = store.load(&cart_id).await.unwrap();
    assert_eq!(loaded.as_deref(), Some(b"cart-state".as_slice()));
}

#[tokio::test]
async fn store_upserts_existing_row() {
    let store = get_store().await;
    let cart_id = CartId::new("pg-upsert");

    store.store(&cart_id, b"first").await.unwrap();
    store.store(&cart_id, b"second").await.unwrap();

    let loaded = store.load(&cart_id).await.unwrap();
    assert_eq!(loaded.as_deref(), Some(b"second".as_slice()));
}

#[tokio::test]
async fn carts_are_keyed_independently() {
    let store = get_store().await;

    store
        .store(&CartId::new("pg-user-a"), b"cart-a")
        .await
        .unwrap();
    store
        .store(&CartId::new("pg-user-b"), b"cart-b")
        .await
        .unwrap();

    let a = store.load(&CartId::new("pg-user-a")).await.unwrap();
    let b = store.load(&CartId::new("pg-user-b")).await.unwrap();
    assert_eq!(a.as_deref(), Some(b"cart-a".as_slice()));
    assert_eq!(b.as_deref(), Some(b"cart-b".as_slice()));
}

#[tokio::test]
async fn remove_deletes_row() {
    let store = get_store().await;
    let cart_id = CartId::new("pg-remove");

    store.store(&cart_id, b"state").await.unwrap();
    store.remove(&cart_id).await.unwrap();

    assert!(store.load(&cart_id).await.unwrap().is_none());

    // Removing again is a no-op
    store.remove(&cart_id).await.unwrap();
}
