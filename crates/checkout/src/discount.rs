//! Ready-made discount handlers for the cart's `CostCalculation` hook.

use cart::{CartEvent, CartItem, HookError, Money};

/// Handler subtracting a fixed amount from every cost calculation.
///
/// Register on [`cart::HookPoint::CostCalculation`]:
///
/// ```
/// use cart::{Cart, CartId, HookPoint, LineItem, Money};
/// use checkout::flat_discount;
/// use session_store::MemorySessionStore;
///
/// let mut cart: Cart<LineItem, _> =
///     Cart::new(MemorySessionStore::new(), CartId::new("docs"));
/// cart.on(HookPoint::CostCalculation, flat_discount(Money::from_cents(500)));
/// ```
pub fn flat_discount<I: CartItem>(
    amount: Money,
) -> impl Fn(&mut CartEvent<I>) -> Result<(), HookError> + Send + Sync + 'static {
    move |event| {
        event.discount = amount;
        Ok(())
    }
}

/// Handler discounting a percentage of the base cost.
///
/// `percent` above 100 is treated as 100.
pub fn percent_discount<I: CartItem>(
    percent: u8,
) -> impl Fn(&mut CartEvent<I>) -> Result<(), HookError> + Send + Sync + 'static {
    let percent = percent.min(100) as i64;
    move |event| {
        let base = event.base_cost.unwrap_or_else(Money::zero);
        event.discount = Money::from_cents(base.cents() * percent / 100);
        Ok(())
    }
}
