//! Checkout module built on top of the cart core.
//!
//! Everything here is an external collaborator of the cart: discounts
//! hook into cost calculation, notifications subscribe to cart hooks,
//! and [`CheckoutService`] drives payment confirmation and order saving
//! through narrow service boundaries. The cart core knows none of it.

pub mod discount;
pub mod error;
pub mod notify;
pub mod orders;
pub mod payment;
pub mod service;

pub use discount::{flat_discount, percent_discount};
pub use error::CheckoutError;
pub use notify::{Notifier, RecordingNotifier};
pub use orders::{InMemoryOrderRepository, OrderRecord, OrderRepository};
pub use payment::{InMemoryPaymentGateway, PaymentConfirmation, PaymentGateway};
pub use service::CheckoutService;
