//! Lifecycle hook registry.
//!
//! The cart fires a fixed set of named hook points around each mutation
//! and around cost calculation. Handlers are plain closures registered
//! per hook point; they run synchronously, in registration order, on the
//! caller's execution context. The first handler error aborts the rest of
//! the triggering operation.

use std::collections::HashMap;

use thiserror::Error;

use crate::item::CartItem;
use crate::value_objects::Money;

/// The hook points a cart fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Before an item is added, updated, or removed.
    BeforeCartChange,
    /// Before an item is added.
    BeforeItemAdd,
    /// Before an item is removed.
    BeforeItemRemove,
    /// Before all items are removed.
    BeforeRemoveAll,
    /// After an item was added.
    AfterItemAdd,
    /// After an item was removed.
    AfterItemRemove,
    /// After all items were removed.
    AfterRemoveAll,
    /// After an item was added, updated, or removed.
    AfterCartChange,
    /// When an item was updated to an absolute quantity.
    ItemUpdate,
    /// During cost calculation; handlers may set the aggregate discount.
    CostCalculation,
}

impl HookPoint {
    /// Returns the hook point's name.
    pub fn name(&self) -> &'static str {
        match self {
            HookPoint::BeforeCartChange => "BeforeCartChange",
            HookPoint::BeforeItemAdd => "BeforeItemAdd",
            HookPoint::BeforeItemRemove => "BeforeItemRemove",
            HookPoint::BeforeRemoveAll => "BeforeRemoveAll",
            HookPoint::AfterItemAdd => "AfterItemAdd",
            HookPoint::AfterItemRemove => "AfterItemRemove",
            HookPoint::AfterRemoveAll => "AfterRemoveAll",
            HookPoint::AfterCartChange => "AfterCartChange",
            HookPoint::ItemUpdate => "ItemUpdate",
            HookPoint::CostCalculation => "CostCalculation",
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload passed to hook handlers.
///
/// Item-level hooks carry a copy of the affected item; whole-cart hooks
/// carry none. `CostCalculation` additionally carries the base cost and a
/// mutable `discount` output field that handlers may set.
#[derive(Debug, Clone)]
pub struct CartEvent<I: CartItem> {
    /// The affected item, if the operation targets a single item.
    pub item: Option<I>,

    /// Base cost before discount; set only for `CostCalculation`.
    pub base_cost: Option<Money>,

    /// Aggregate discount for the cart. Handlers registered on
    /// `CostCalculation` may set it.
    pub discount: Money,
}

impl<I: CartItem> CartEvent<I> {
    /// Event for an operation affecting a single item.
    pub fn for_item(item: I) -> Self {
        Self {
            item: Some(item),
            base_cost: None,
            discount: Money::zero(),
        }
    }

    /// Event for an operation affecting the whole cart.
    pub fn whole_cart() -> Self {
        Self {
            item: None,
            base_cost: None,
            discount: Money::zero(),
        }
    }

    /// Event for a cost calculation carrying the base sum.
    pub fn cost_calculation(base_cost: Money) -> Self {
        Self {
            item: None,
            base_cost: Some(base_cost),
            discount: Money::zero(),
        }
    }
}

/// Error raised by a hook handler.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Creates a hook error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type Handler<I> = Box<dyn Fn(&mut CartEvent<I>) -> Result<(), HookError> + Send + Sync>;

/// Ordered set of handlers per hook point.
pub struct HookRegistry<I: CartItem> {
    handlers: HashMap<HookPoint, Vec<Handler<I>>>,
}

impl<I: CartItem> HookRegistry<I> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for the given hook point.
    ///
    /// Handlers fire in registration order.
    pub fn on<F>(&mut self, point: HookPoint, handler: F)
    where
        F: Fn(&mut CartEvent<I>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.handlers
            .entry(point)
            .or_default()
            .push(Box::new(handler));
    }

    /// Fires all handlers registered for the given hook point.
    ///
    /// Returns the failing handler's error, skipping any handlers
    /// registered after it; the event carries handler output back to the
    /// firing operation.
    pub fn fire(&self, point: HookPoint, event: &mut CartEvent<I>) -> Result<(), HookError> {
        if let Some(handlers) = self.handlers.get(&point) {
            for handler in handlers {
                handler(event)?;
            }
        }
        Ok(())
    }

    /// Returns the number of handlers registered for the given hook point.
    pub fn handler_count(&self, point: HookPoint) -> usize {
        self.handlers.get(&point).map_or(0, Vec::len)
    }
}

impl<I: CartItem> Default for HookRegistry<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: CartItem> std::fmt::Debug for HookRegistry<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&'static str, usize> = self
            .handlers
            .iter()
            .map(|(point, handlers)| (point.name(), handlers.len()))
            .collect();
        f.debug_struct("HookRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::value_objects::{LineItem, Money};

    #[test]
    fn handlers_fire_in_registration_order() {
        let mut registry: HookRegistry<LineItem> = HookRegistry::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let calls = Arc::clone(&calls);
            registry.on(HookPoint::AfterCartChange, move |_| {
                calls.lock().unwrap().push(label);
                Ok(())
            });
        }

        let mut event = CartEvent::whole_cart();
        registry
            .fire(HookPoint::AfterCartChange, &mut event)
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_handler_aborts_remaining_handlers() {
        let mut registry: HookRegistry<LineItem> = HookRegistry::new();
        let calls = Arc::new(Mutex::new(0));

        registry.on(HookPoint::BeforeItemAdd, |_| {
            Err(HookError::new("item is out of stock"))
        });
        {
            let calls = Arc::clone(&calls);
            registry.on(HookPoint::BeforeItemAdd, move |_| {
                *calls.lock().unwrap() += 1;
                Ok(())
            });
        }

        let mut event = CartEvent::for_item(LineItem::new(
            "SKU-001",
            "Widget",
            1,
            Money::from_cents(100),
        ));
        let result = registry.fire(HookPoint::BeforeItemAdd, &mut event);

        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "item is out of stock");
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn firing_without_handlers_is_noop() {
        let registry: HookRegistry<LineItem> = HookRegistry::new();
        let mut event = CartEvent::whole_cart();
        registry.fire(HookPoint::BeforeRemoveAll, &mut event).unwrap();
    }

    #[test]
    fn cost_handler_sets_discount() {
        let mut registry: HookRegistry<LineItem> = HookRegistry::new();
        registry.on(HookPoint::CostCalculation, |event| {
            event.discount = Money::from_cents(200);
            Ok(())
        });

        let mut event = CartEvent::cost_calculation(Money::from_cents(1000));
        registry
            .fire(HookPoint::CostCalculation, &mut event)
            .unwrap();

        assert_eq!(event.base_cost, Some(Money::from_cents(1000)));
        assert_eq!(event.discount, Money::from_cents(200));
    }

    #[test]
    fn handlers_are_keyed_per_hook_point() {
        let mut registry: HookRegistry<LineItem> = HookRegistry::new();
        registry.on(HookPoint::BeforeItemAdd, |_| Ok(()));
        registry.on(HookPoint::BeforeItemAdd, |_| Ok(()));
        registry.on(HookPoint::AfterItemRemove, |_| Ok(()));

        assert_eq!(registry.handler_count(HookPoint::BeforeItemAdd), 2);
        assert_eq!(registry.handler_count(HookPoint::AfterItemRemove), 1);
        assert_eq!(registry.handler_count(HookPoint::ItemUpdate), 0);
    }
}
