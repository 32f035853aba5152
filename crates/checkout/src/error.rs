use cart::CartError;
use thiserror::Error;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The payment gateway rejected or failed the payment.
    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),

    /// The order could not be saved.
    #[error("Order repository error: {0}")]
    OrderRepository(String),

    /// The confirmation notification could not be delivered.
    #[error("Notification error: {0}")]
    Notification(String),
}
