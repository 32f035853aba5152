//! Notification boundary.
//!
//! The cart core never sends notifications; a notifier either receives
//! the final order record from the checkout service or subscribes to the
//! cart's hook points for change notifications.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::CheckoutError;
use crate::orders::OrderRecord;

/// Trait for order confirmation delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifies that an order was placed.
    async fn order_placed(&self, order: &OrderRecord) -> Result<(), CheckoutError>;
}

/// Notifier that records deliveries instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    deliveries: Arc<RwLock<Vec<OrderRecord>>>,
    fail_on_send: Arc<RwLock<bool>>,
}

impl RecordingNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail delivery.
    pub fn set_fail_on_send(&self, fail: bool) {
        *self.fail_on_send.write().unwrap() = fail;
    }

    /// Returns the number of delivered notifications.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.read().unwrap().len()
    }

    /// Returns all delivered notifications.
    pub fn deliveries(&self) -> Vec<OrderRecord> {
        self.deliveries.read().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn order_placed(&self, order: &OrderRecord) -> Result<(), CheckoutError> {
        if *self.fail_on_send.read().unwrap() {
            return Err(CheckoutError::Notification(
                "delivery failed".to_string(),
            ));
        }
        self.deliveries.write().unwrap().push(order.clone());
        Ok(())
    }
}
