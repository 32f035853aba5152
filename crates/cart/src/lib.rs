//! Session-backed shopping cart core.
//!
//! This crate provides the cart aggregate and its protocol:
//! - CartItem capability trait any line item type implements
//! - Cart facade sequencing hook firing, mutation, and persistence
//! - Aggregation over items (count, cost with optional discount, hash)
//! - Lossless serialize/deserialize round-trip into a keyed byte store

pub mod cart;
pub mod error;
pub mod hooks;
pub mod item;
pub mod value_objects;

pub use cart::Cart;
pub use common::CartId;
pub use error::CartError;
pub use hooks::{CartEvent, HookError, HookPoint};
pub use item::CartItem;
pub use value_objects::{ItemId, LineItem, Money};
