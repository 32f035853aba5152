//! Order record boundary.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cart::Money;
use chrono::{DateTime, Utc};
use common::CartId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CheckoutError;

/// A saved order produced by a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Unique order identifier.
    pub order_id: Uuid,

    /// The cart this order was placed from.
    pub cart_id: CartId,

    /// Total charged, net of discount.
    pub total: Money,

    /// Total count of items across all lines.
    pub item_count: u64,

    /// Payment confirmation ID from the gateway.
    pub confirmation_id: String,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Trait for persisting order records.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Saves an order record.
    async fn save(&self, order: OrderRecord) -> Result<(), CheckoutError>;
}

/// In-memory order repository for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<OrderRecord>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new in-memory order repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of saved orders.
    pub fn order_count(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    /// Returns all saved orders.
    pub fn orders(&self) -> Vec<OrderRecord> {
        self.orders.read().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: OrderRecord) -> Result<(), CheckoutError> {
        self.orders.write().unwrap().push(order);
        Ok(())
    }
}
