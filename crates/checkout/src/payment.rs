//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cart::Money;
use common::CartId;

use crate::error::CheckoutError;

/// Result of a confirmed payment.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    /// The confirmation ID assigned by the gateway.
    pub confirmation_id: String,
}

/// Trait for payment confirmation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Confirms payment of the given amount for a cart.
    async fn confirm_payment(
        &self,
        cart_id: &CartId,
        amount: Money,
    ) -> Result<PaymentConfirmation, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    confirmations: HashMap<String, (CartId, Money)>,
    next_id: u32,
    fail_on_confirm: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to decline the next confirmation calls.
    pub fn set_fail_on_confirm(&self, fail: bool) {
        self.state.write().unwrap().fail_on_confirm = fail;
    }

    /// Returns the number of confirmed payments.
    pub fn confirmation_count(&self) -> usize {
        self.state.read().unwrap().confirmations.len()
    }

    /// Returns the confirmed amount for a confirmation ID, if any.
    pub fn confirmed_amount(&self, confirmation_id: &str) -> Option<Money> {
        self.state
            .read()
            .unwrap()
            .confirmations
            .get(confirmation_id)
            .map(|(_, amount)| *amount)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn confirm_payment(
        &self,
        cart_id: &CartId,
        amount: Money,
    ) -> Result<PaymentConfirmation, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_confirm {
            return Err(CheckoutError::PaymentGateway(
                "Payment declined".to_string(),
            ));
        }

        state.next_id += 1;
        let confirmation_id = format!("PAY-{:04}", state.next_id);
        state
            .confirmations
            .insert(confirmation_id.clone(), (cart_id.clone(), amount));

        Ok(PaymentConfirmation { confirmation_id })
    }
}
