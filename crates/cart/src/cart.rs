//! Cart aggregate: store, facade, and aggregation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use session_store::SessionStore;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::CartError;
use crate::hooks::{CartEvent, HookError, HookPoint, HookRegistry};
use crate::item::CartItem;
use crate::value_objects::{ItemId, Money};
use common::CartId;

/// Persisted shape of a cart: the items and the opaque info record.
#[derive(Deserialize)]
struct CartState<I> {
    items: Vec<I>,
    #[serde(default)]
    info: Map<String, Value>,
}

#[derive(Serialize)]
struct CartStateRef<'a, I> {
    items: &'a [I],
    info: &'a Map<String, Value>,
}

/// Session-backed shopping cart.
///
/// Holds line items keyed by their [`ItemId`] (insertion order preserved)
/// plus an opaque `info` record, and sequences every mutation as:
/// fire "before" hooks, mutate, fire "after" hooks, write through to the
/// session store. The store is injected at construction; there is no
/// ambient session lookup.
///
/// A cart is a single-writer value: it is intended for sequential use
/// within one session's request lifecycle. Sharing one cart across
/// threads requires external synchronization per cart ID.
pub struct Cart<I: CartItem, S: SessionStore> {
    cart_id: CartId,
    items: Vec<I>,
    info: Map<String, Value>,
    hooks: HookRegistry<I>,
    store: S,
    write_through: bool,
}

impl<I: CartItem, S: SessionStore> Cart<I, S> {
    /// Opens a write-through cart: state is loaded from the store now and
    /// saved back after every mutating operation.
    ///
    /// If nothing is stored under `cart_id`, the cart starts empty.
    pub async fn open(store: S, cart_id: CartId) -> Result<Self, CartError> {
        let mut cart = Self::with_write_through(store, cart_id, true);
        cart.load().await?;
        Ok(cart)
    }

    /// Creates a manually persisted cart.
    ///
    /// The cart starts empty and nothing touches the store until the
    /// caller invokes [`Cart::save`] or [`Cart::load`].
    pub fn new(store: S, cart_id: CartId) -> Self {
        Self::with_write_through(store, cart_id, false)
    }

    fn with_write_through(store: S, cart_id: CartId, write_through: bool) -> Self {
        Self {
            cart_id,
            items: Vec::new(),
            info: Map::new(),
            hooks: HookRegistry::new(),
            store,
            write_through,
        }
    }

    /// Returns the cart's identifier.
    pub fn cart_id(&self) -> &CartId {
        &self.cart_id
    }

    /// Returns true if mutations are written through to the store.
    pub fn is_write_through(&self) -> bool {
        self.write_through
    }

    /// Registers a hook handler for the given hook point.
    ///
    /// Handlers run synchronously, in registration order, on the same
    /// execution context as the triggering operation.
    pub fn on<F>(&mut self, point: HookPoint, handler: F)
    where
        F: Fn(&mut CartEvent<I>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on(point, handler);
    }

    fn fire(&self, point: HookPoint, event: &mut CartEvent<I>) -> Result<(), CartError> {
        self.hooks
            .fire(point, event)
            .map_err(|source| CartError::Hook {
                hook: point,
                source,
            })
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

// Facade operations
impl<I: CartItem, S: SessionStore> Cart<I, S> {
    /// Adds an item to the cart.
    ///
    /// If an item with the same ID is already present, its quantity grows
    /// by `quantity`; otherwise a copy of `item` is inserted with exactly
    /// that quantity. A zero quantity is rejected.
    #[tracing::instrument(skip(self, item), fields(cart_id = %self.cart_id))]
    pub async fn add(&mut self, item: I, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        let mut event = CartEvent::for_item(item.clone());
        self.fire(HookPoint::BeforeCartChange, &mut event)?;
        self.fire(HookPoint::BeforeItemAdd, &mut event)?;

        match self.position(item.id()) {
            Some(idx) => {
                let existing = &mut self.items[idx];
                existing.set_quantity(existing.quantity() + quantity);
            }
            None => {
                let mut item = item;
                item.set_quantity(quantity);
                self.items.push(item);
            }
        }

        self.fire(HookPoint::AfterItemAdd, &mut event)?;
        self.fire(HookPoint::AfterCartChange, &mut event)?;

        self.persist().await
    }

    /// Sets an item's quantity to an absolute value.
    ///
    /// A zero quantity removes the item instead. An item not yet in the
    /// cart is inserted with the given quantity.
    #[tracing::instrument(skip(self, item), fields(cart_id = %self.cart_id))]
    pub async fn update(&mut self, item: I, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(&item).await;
        }

        let mut event = CartEvent::for_item(item.clone());
        self.fire(HookPoint::BeforeCartChange, &mut event)?;

        match self.position(item.id()) {
            Some(idx) => self.items[idx].set_quantity(quantity),
            None => {
                let mut item = item;
                item.set_quantity(quantity);
                self.items.push(item);
            }
        }

        self.fire(HookPoint::ItemUpdate, &mut event)?;
        self.fire(HookPoint::AfterCartChange, &mut event)?;

        self.persist().await
    }

    /// Removes an item from the cart.
    pub async fn remove(&mut self, item: &I) -> Result<(), CartError> {
        let id = item.id().clone();
        self.remove_by_id(&id).await
    }

    /// Removes an item from the cart by its ID.
    ///
    /// An absent ID is a no-op: no hooks fire and nothing is persisted.
    #[tracing::instrument(skip(self), fields(cart_id = %self.cart_id, item_id = %id))]
    pub async fn remove_by_id(&mut self, id: &ItemId) -> Result<(), CartError> {
        let Some(idx) = self.position(id) else {
            return Ok(());
        };

        let mut event = CartEvent::for_item(self.items[idx].clone());
        self.fire(HookPoint::BeforeCartChange, &mut event)?;
        self.fire(HookPoint::BeforeItemRemove, &mut event)?;

        self.items.remove(idx);

        self.fire(HookPoint::AfterItemRemove, &mut event)?;
        self.fire(HookPoint::AfterCartChange, &mut event)?;

        self.persist().await
    }

    /// Removes all items from the cart.
    #[tracing::instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn remove_all(&mut self) -> Result<(), CartError> {
        let mut event = CartEvent::whole_cart();
        self.fire(HookPoint::BeforeRemoveAll, &mut event)?;

        self.items.clear();

        self.fire(HookPoint::AfterRemoveAll, &mut event)?;

        self.persist().await
    }

    /// Replaces the cart's items wholesale.
    ///
    /// Entries with zero quantity are dropped; for duplicate IDs the last
    /// entry wins.
    #[tracing::instrument(skip(self, items), fields(cart_id = %self.cart_id))]
    pub async fn set_items(&mut self, items: Vec<I>) -> Result<(), CartError> {
        let mut event = CartEvent::whole_cart();
        self.fire(HookPoint::BeforeCartChange, &mut event)?;

        self.items.clear();
        for item in items {
            if item.quantity() == 0 {
                continue;
            }
            match self.position(item.id()) {
                Some(idx) => self.items[idx] = item,
                None => self.items.push(item),
            }
        }

        self.fire(HookPoint::AfterCartChange, &mut event)?;

        self.persist().await
    }

    /// Merges the given fields into the cart's info record.
    ///
    /// Existing keys are overwritten, other keys are left alone.
    pub async fn set_info(&mut self, data: Map<String, Value>) -> Result<(), CartError> {
        for (key, value) in data {
            self.info.insert(key, value);
        }

        self.persist().await
    }

    /// Processes payment for the cart contents.
    ///
    /// Stub extension point that always reports success; real payment
    /// integration lives behind the checkout module's payment boundary.
    pub fn pay(&self) -> bool {
        true
    }
}

// Aggregation: pure reads over the items
impl<I: CartItem, S: SessionStore> Cart<I, S> {
    /// Returns an item by its ID.
    pub fn item_by_id(&self, id: &ItemId) -> Option<&I> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns true if an item with the given ID is in the cart.
    pub fn has_item(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Returns all items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.items.iter()
    }

    /// Returns the number of distinct items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total count of items: the sum of all quantities.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| item.quantity() as u64).sum()
    }

    /// Returns true if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the cart's info record.
    pub fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Returns the total cost of all items.
    ///
    /// The `CostCalculation` hook fires on every call, carrying the base
    /// sum; a handler may set an aggregate discount. With `with_discount`
    /// the result is the base sum net of that discount, clamped at zero;
    /// without it the base sum is returned and the discount ignored.
    pub fn cost(&self, with_discount: bool) -> Result<Money, CartError> {
        let base: Money = self.items.iter().map(|item| item.cost(with_discount)).sum();

        let mut event = CartEvent::cost_calculation(base);
        self.fire(HookPoint::CostCalculation, &mut event)?;

        if with_discount {
            Ok((base - event.discount).max(Money::zero()))
        } else {
            Ok(base)
        }
    }

    /// Returns a digest of the current combination of items, quantities,
    /// and prices.
    ///
    /// The hash is a deterministic function of the `(id, quantity,
    /// unit price)` triples in item order: two carts with identical
    /// triples in identical order hash identically, and any change to an
    /// item or quantity changes the hash. Useful for cheap change
    /// detection between requests.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        for item in &self.items {
            let id = item.id().as_str();
            hasher.update((id.len() as u64).to_le_bytes());
            hasher.update(id.as_bytes());
            hasher.update(item.quantity().to_le_bytes());
            hasher.update(item.unit_price().cents().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

// Persistence
impl<I: CartItem, S: SessionStore> Cart<I, S> {
    /// Returns the cart's state as a storable byte blob.
    pub fn serialized(&self) -> Result<Vec<u8>, CartError> {
        let state = CartStateRef {
            items: &self.items,
            info: &self.info,
        };
        Ok(serde_json::to_vec(&state)?)
    }

    /// Replaces the cart's items and info from a serialized blob.
    ///
    /// Malformed bytes leave the cart untouched. Restored entries with
    /// zero quantity are dropped so the cart never holds one.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), CartError> {
        let state: CartState<I> = serde_json::from_slice(bytes)?;
        self.items = state
            .items
            .into_iter()
            .filter(|item| item.quantity() > 0)
            .collect();
        self.info = state.info;
        Ok(())
    }

    /// Saves the cart's full state to the session store.
    pub async fn save(&self) -> Result<(), CartError> {
        let bytes = self.serialized()?;
        self.store.store(&self.cart_id, &bytes).await?;
        debug!(cart_id = %self.cart_id, bytes = bytes.len(), "cart state saved");
        Ok(())
    }

    /// Loads the cart's state from the session store.
    ///
    /// If nothing is stored under the cart's ID, the cart is left as is.
    pub async fn load(&mut self) -> Result<(), CartError> {
        if let Some(bytes) = self.store.load(&self.cart_id).await? {
            self.restore(&bytes)?;
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), CartError> {
        if self.write_through {
            self.save().await
        } else {
            Ok(())
        }
    }
}
