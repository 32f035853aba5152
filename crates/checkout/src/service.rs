//! Checkout service orchestrating payment, order saving, and notification.

use cart::{Cart, CartItem};
use chrono::Utc;
use session_store::SessionStore;
use tracing::info;
use uuid::Uuid;

use crate::error::CheckoutError;
use crate::notify::Notifier;
use crate::orders::{OrderRecord, OrderRepository};
use crate::payment::PaymentGateway;

/// Drives a cart through checkout.
///
/// The flow is: reject an empty cart, compute the discounted total,
/// confirm payment through the gateway, save the order record, deliver
/// the confirmation notification, then empty the cart. A failure at any
/// step aborts the remaining steps; steps already taken are not rolled
/// back (the gateway's confirmation stands even if saving the order
/// fails), so callers should treat a failed checkout as needing manual
/// reconciliation.
pub struct CheckoutService<P, O, N>
where
    P: PaymentGateway,
    O: OrderRepository,
    N: Notifier,
{
    payment: P,
    orders: O,
    notifier: N,
}

impl<P, O, N> CheckoutService<P, O, N>
where
    P: PaymentGateway,
    O: OrderRepository,
    N: Notifier,
{
    /// Creates a new checkout service over the given boundaries.
    pub fn new(payment: P, orders: O, notifier: N) -> Self {
        Self {
            payment,
            orders,
            notifier,
        }
    }

    /// Places an order from the cart's current contents.
    ///
    /// On success the cart is emptied and the saved order record is
    /// returned.
    #[tracing::instrument(skip(self, cart), fields(cart_id = %cart.cart_id()))]
    pub async fn place_order<I, S>(
        &self,
        cart: &mut Cart<I, S>,
    ) -> Result<OrderRecord, CheckoutError>
    where
        I: CartItem,
        S: SessionStore,
    {
        metrics::counter!("checkout_attempts_total").increment(1);

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart.cost(true)?;
        let item_count = cart.count();

        let confirmation = self.payment.confirm_payment(cart.cart_id(), total).await?;

        let order = OrderRecord {
            order_id: Uuid::new_v4(),
            cart_id: cart.cart_id().clone(),
            total,
            item_count,
            confirmation_id: confirmation.confirmation_id,
            placed_at: Utc::now(),
        };

        self.orders.save(order.clone()).await?;
        self.notifier.order_placed(&order).await?;

        cart.remove_all().await?;

        metrics::counter!("checkout_completed_total").increment(1);
        info!(
            order_id = %order.order_id,
            total = %order.total,
            "order placed"
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use cart::{Cart, CartId, LineItem, Money};
    use session_store::MemorySessionStore;

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::orders::InMemoryOrderRepository;
    use crate::payment::InMemoryPaymentGateway;

    fn service() -> CheckoutService<InMemoryPaymentGateway, InMemoryOrderRepository, RecordingNotifier>
    {
        CheckoutService::new(
            InMemoryPaymentGateway::new(),
            InMemoryOrderRepository::new(),
            RecordingNotifier::new(),
        )
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let service = service();
        let mut cart: Cart<LineItem, _> =
            Cart::open(MemorySessionStore::new(), CartId::new("cart-1"))
                .await
                .unwrap();

        let result = service.place_order(&mut cart).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn successful_checkout_empties_cart() {
        let service = service();
        let mut cart = Cart::open(MemorySessionStore::new(), CartId::new("cart-1"))
            .await
            .unwrap();
        cart.add(
            LineItem::new("SKU-001", "Widget", 1, Money::from_cents(1000)),
            2,
        )
        .await
        .unwrap();

        let order = service.place_order(&mut cart).await.unwrap();

        assert_eq!(order.total, Money::from_cents(2000));
        assert_eq!(order.item_count, 2);
        assert!(cart.is_empty());
    }
}
