//! Cart item capability trait.

use serde::{Serialize, de::DeserializeOwned};

use crate::value_objects::{ItemId, Money};

/// Capability interface for anything a cart can hold.
///
/// The cart never needs the item's concrete type; it only reads identity
/// and price and owns the quantity. Once an item is added, the cart is the
/// only writer of its quantity field.
///
/// Quantity is unsigned by construction: an item in a cart always has a
/// quantity greater than zero, and writes that would set it to zero remove
/// the item instead (handled by the cart facade).
pub trait CartItem: Clone + Send + Sync + Serialize + DeserializeOwned {
    /// Returns the item's unique identifier within the cart.
    fn id(&self) -> &ItemId;

    /// Returns the current quantity.
    fn quantity(&self) -> u32;

    /// Sets the quantity. Called only by the cart facade.
    fn set_quantity(&mut self, quantity: u32);

    /// Returns the price per unit.
    fn unit_price(&self) -> Money;

    /// Returns the total cost of this line (quantity x unit price).
    ///
    /// `with_discount` selects the discounted price for item types that
    /// carry their own discount; the default implementation has none and
    /// returns the same value for both modes.
    fn cost(&self, with_discount: bool) -> Money {
        let _ = with_discount;
        self.unit_price().multiply(self.quantity())
    }
}
