//! The cart store: sole owner of the line items and the cart panel flag.
//!
//! Every mutation runs to completion synchronously, writes a snapshot of the
//! items to the key-value surface and then notifies subscribers with the
//! post-mutation state. Totals are derived from the items on every read.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shoe_shop_core::Price;

use super::line_item::{LineItem, ProductSelection, VariantKey};
use super::storage::KeyValueStore;

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "shoeShopCart";

/// The persisted form of a cart: its items, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot(pub Vec<LineItem>);

impl CartSnapshot {
    /// Serialize to the JSON stored on the device.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid snapshot.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Consume the snapshot, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.0
    }
}

/// What a mutation did, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A selection was added; `quantity` is the resulting line quantity.
    Added { key: VariantKey, quantity: u32 },
    /// A line was removed.
    Removed { key: VariantKey },
    /// A line's quantity was replaced.
    QuantitySet { key: VariantKey, quantity: u32 },
    /// All lines were removed.
    Cleared,
    /// The cart panel was opened or closed.
    Panel { open: bool },
}

/// Read-only view of the cart handed to readers and subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<LineItem>,
    is_panel_open: bool,
}

impl CartState {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Whether the cart panel is showing.
    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    /// Find the line with the given key.
    #[must_use]
    pub fn find(&self, key: &VariantKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.has_key(key))
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&CartChange, &CartState) + Send + Sync>;

/// The cart store.
pub struct CartStore {
    state: CartState,
    storage: Arc<dyn KeyValueStore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store, restoring the last snapshot from `storage`.
    ///
    /// A missing, empty or unreadable snapshot yields an empty cart. The panel
    /// always starts closed.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = restore_items(storage.as_ref());
        Self {
            state: CartState {
                items,
                is_panel_open: false,
            },
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.state.subtotal()
    }

    /// Whether the cart panel is showing.
    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.state.is_panel_open
    }

    /// Add `quantity` of a selection.
    ///
    /// An existing line with the same key has its quantity increased and keeps
    /// the price and display fields it was created with. Otherwise a new line
    /// is appended. Either way the cart panel opens.
    pub fn add(&mut self, selection: ProductSelection, quantity: NonZeroU32) {
        let key = selection.key();
        let delta = quantity.get();

        let resulting = if let Some(item) = self.state.items.iter_mut().find(|i| i.has_key(&key)) {
            item.quantity = item.quantity.saturating_add(delta);
            item.quantity
        } else {
            self.state
                .items
                .push(LineItem::from_selection(selection, delta));
            delta
        };
        self.state.is_panel_open = true;

        tracing::debug!(
            product_id = %key.product_id,
            size = %key.size,
            color = %key.color,
            quantity = resulting,
            "cart add"
        );
        self.commit(&CartChange::Added {
            key,
            quantity: resulting,
        });
    }

    /// Add a single unit of a selection.
    pub fn add_one(&mut self, selection: ProductSelection) {
        self.add(selection, NonZeroU32::MIN);
    }

    /// Remove the line with `key`. Returns whether a line was removed.
    ///
    /// Nothing is persisted or notified when no line matches.
    pub fn remove(&mut self, key: &VariantKey) -> bool {
        let before = self.state.items.len();
        self.state.items.retain(|item| !item.has_key(key));
        let removed = self.state.items.len() != before;

        if removed {
            self.commit(&CartChange::Removed { key: key.clone() });
        }
        removed
    }

    /// Replace the quantity of the line with `key`.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// matched; nothing is persisted or notified otherwise.
    pub fn set_quantity(&mut self, key: &VariantKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(key);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.state.items.iter_mut().find(|i| i.has_key(key)) else {
            return false;
        };
        item.quantity = quantity;

        self.commit(&CartChange::QuantitySet {
            key: key.clone(),
            quantity,
        });
        true
    }

    /// Remove every line. The panel flag is left alone.
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.commit(&CartChange::Cleared);
    }

    /// Show the cart panel.
    pub fn open_panel(&mut self) {
        self.set_panel_open(true);
    }

    /// Hide the cart panel.
    pub fn close_panel(&mut self) {
        self.set_panel_open(false);
    }

    /// Set the cart panel visibility. Not persisted.
    pub fn set_panel_open(&mut self, open: bool) {
        self.state.is_panel_open = open;
        self.notify(&CartChange::Panel { open });
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartChange, &CartState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// The snapshot that would be persisted right now.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot(self.state.items.clone())
    }

    fn commit(&self, change: &CartChange) {
        self.persist();
        self.notify(change);
    }

    /// Write the items to storage. Failure leaves the in-memory cart
    /// authoritative for the rest of the session.
    fn persist(&self) {
        let raw = match self.snapshot().to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &raw) {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
        }
    }

    fn notify(&self, change: &CartChange) {
        for (_, listener) in &self.listeners {
            listener(change, &self.state);
        }
    }
}

/// Read the saved snapshot, falling back to an empty cart.
fn restore_items(storage: &dyn KeyValueStore) -> Vec<LineItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            tracing::debug!("no saved cart, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "cart storage unavailable, starting empty");
            return Vec::new();
        }
    };

    match CartSnapshot::from_json(&raw) {
        Ok(snapshot) => {
            let items = normalize(snapshot.into_items());
            tracing::debug!(lines = items.len(), "restored saved cart");
            items
        }
        Err(e) => {
            tracing::warn!(error = %e, "saved cart is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Re-establish the cart invariants on restored items: drop empty lines, fold
/// repeated keys into their first occurrence and drop lines whose totals do
/// not fit in a `Decimal`.
fn normalize(restored: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::with_capacity(restored.len());
    for item in restored {
        if item.quantity == 0 {
            continue;
        }
        let key = item.key();
        match merged.iter_mut().find(|existing| existing.has_key(&key)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => merged.push(item),
        }
    }

    let mut subtotal = Price::ZERO;
    let mut items = Vec::with_capacity(merged.len());
    for item in merged {
        let running = item
            .unit_price
            .checked_mul(item.quantity)
            .and_then(|line| subtotal.checked_add(line));
        match running {
            Some(running) => {
                subtotal = running;
                items.push(item);
            }
            None => tracing::warn!(
                product_id = %item.product_id,
                price = %item.unit_price.amount(),
                quantity = item.quantity,
                "dropping saved cart line with out-of-range total"
            ),
        }
    }
    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use shoe_shop_core::ProductId;

    use super::*;
    use crate::cart::storage::{MemoryStorage, StorageError};

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    fn selection(product_id: u32, size: &str, color: &str, price: i64) -> ProductSelection {
        ProductSelection {
            product_id: ProductId::new(product_id),
            size: size.to_string(),
            color: color.to_string(),
            unit_price: Price::from_rupees(price),
            name: format!("Shoe {product_id}"),
            brand: "Brand".to_string(),
            image_url: format!("https://example.com/{product_id}.jpg"),
        }
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn empty_store() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_add_scenario_then_zero_quantity_empties() {
        let (_, mut store) = empty_store();
        let red_nine = selection(1, "9", "Red", 7999);

        store.add(red_nine.clone(), qty(1));
        assert_eq!(store.total_items(), 1);
        assert_eq!(store.subtotal(), Price::from_rupees(7999));

        store.add(red_nine.clone(), qty(2));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.subtotal(), Price::from_rupees(23_997));

        assert!(store.set_quantity(&red_nine.key(), 0));
        assert!(store.items().is_empty());
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_add_existing_key_keeps_captured_fields() {
        let (_, mut store) = empty_store();
        store.add_one(selection(1, "9", "Red", 7999));

        let mut repriced = selection(1, "9", "Red", 100);
        repriced.name = "Renamed".to_string();
        store.add(repriced, qty(3));

        let item = store.items().first().unwrap();
        assert_eq!(item.quantity, 4);
        assert_eq!(item.unit_price, Price::from_rupees(7999));
        assert_eq!(item.name, "Shoe 1");
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let (_, mut store) = empty_store();
        store.add_one(selection(3, "8", "Black", 100));
        store.add_one(selection(1, "9", "Red", 200));
        store.add_one(selection(3, "8", "Black", 100));
        store.add_one(selection(2, "7", "White", 300));

        let ids: Vec<u32> = store.items().iter().map(|i| i.product_id.as_u32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_add_opens_panel() {
        let (_, mut store) = empty_store();
        assert!(!store.is_panel_open());
        store.add_one(selection(1, "9", "Red", 7999));
        assert!(store.is_panel_open());
    }

    #[test]
    fn test_two_sizes_are_two_lines() {
        let (_, mut store) = empty_store();
        let nine = selection(1, "9", "Red", 7999);
        let ten = selection(1, "10", "Red", 7999);

        store.add(nine.clone(), qty(2));
        store.add(ten.clone(), qty(1));
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total_items(), 3);

        assert!(store.remove(&nine.key()));
        assert_eq!(store.items().len(), 1);
        assert!(store.state().find(&ten.key()).is_some());
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_, mut store) = empty_store();
        store.add_one(selection(1, "9", "Red", 7999));
        assert!(!store.remove(&VariantKey::new(ProductId::new(1), "9", "Blue")));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let (_, mut store) = empty_store();
        store.add_one(selection(1, "9", "Red", 1));
        store.add_one(selection(2, "9", "Red", 1));
        store.add_one(selection(3, "9", "Red", 1));

        store.remove(&VariantKey::new(ProductId::new(2), "9", "Red"));
        let ids: Vec<u32> = store.items().iter().map(|i| i.product_id.as_u32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let (_, mut store) = empty_store();
        let sel = selection(1, "9", "Red", 500);
        store.add(sel.clone(), qty(5));

        assert!(store.set_quantity(&sel.key(), 2));
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.subtotal(), Price::from_rupees(1000));
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let (_, mut store) = empty_store();
        let sel = selection(1, "9", "Red", 500);
        store.add_one(sel.clone());
        store.set_quantity(&sel.key(), -3);
        assert!(store.state().find(&sel.key()).is_none());
    }

    #[test]
    fn test_set_quantity_missing_is_noop() {
        let (_, mut store) = empty_store();
        store.add_one(selection(1, "9", "Red", 500));
        assert!(!store.set_quantity(&VariantKey::new(ProductId::new(9), "9", "Red"), 4));
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_clear_is_idempotent_and_keeps_panel() {
        let (_, mut store) = empty_store();
        store.clear();
        assert!(store.items().is_empty());

        store.add_one(selection(1, "9", "Red", 500));
        store.clear();
        store.clear();
        assert!(store.items().is_empty());
        assert_eq!(store.subtotal(), Price::ZERO);
        assert!(store.is_panel_open());
    }

    #[test]
    fn test_panel_flag() {
        let (_, mut store) = empty_store();
        store.open_panel();
        assert!(store.is_panel_open());
        store.close_panel();
        assert!(!store.is_panel_open());
        store.set_panel_open(true);
        assert!(store.is_panel_open());
    }

    #[test]
    fn test_mutations_persist_and_restore_in_order() {
        let (storage, mut store) = empty_store();
        store.add(selection(2, "8", "Black", 5999), qty(2));
        store.add(selection(1, "9", "Red", 7999), qty(1));
        store.open_panel();
        let before = store.snapshot();
        drop(store);

        let restored = CartStore::load(storage);
        assert_eq!(restored.snapshot(), before);
        assert!(!restored.is_panel_open());
    }

    #[test]
    fn test_clear_persists_empty_snapshot() {
        let (storage, mut store) = empty_store();
        store.add_one(selection(1, "9", "Red", 7999));
        store.clear();

        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_panel_is_not_persisted() {
        let (storage, mut store) = empty_store();
        store.open_panel();
        assert!(storage.get(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_snapshot_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CART_STORAGE_KEY, "{not json").unwrap();
        let store = CartStore::load(storage);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_load_blank_snapshot_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CART_STORAGE_KEY, "   ").unwrap();
        assert!(CartStore::load(storage).items().is_empty());
    }

    #[test]
    fn test_load_normalizes_duplicates_and_zero_lines() {
        let storage = Arc::new(MemoryStorage::new());
        let raw = r#"[
            {"id":1,"name":"A","brand":"B","price":100,"image":"a","quantity":1,"size":"9","color":"Red"},
            {"id":2,"name":"C","brand":"D","price":200,"image":"c","quantity":0,"size":"9","color":"Red"},
            {"id":1,"name":"A","brand":"B","price":100,"image":"a","quantity":2,"size":"9","color":"Red"}
        ]"#;
        storage.set(CART_STORAGE_KEY, raw).unwrap();

        let store = CartStore::load(storage);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total_items(), 3);
    }

    #[test]
    fn test_load_drops_lines_whose_totals_overflow() {
        let storage = Arc::new(MemoryStorage::new());
        let raw = r#"[
            {"id":1,"name":"A","brand":"B","price":"79228162514264337593543950335","image":"a","quantity":2,"size":"9","color":"Red"},
            {"id":2,"name":"C","brand":"D","price":200,"image":"c","quantity":3,"size":"9","color":"Red"}
        ]"#;
        storage.set(CART_STORAGE_KEY, raw).unwrap();

        let store = CartStore::load(storage);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items().first().unwrap().product_id, ProductId::new(2));
        assert_eq!(store.subtotal(), Price::from_rupees(600));
    }

    #[test]
    fn test_load_drops_lines_that_overflow_the_running_subtotal() {
        let storage = Arc::new(MemoryStorage::new());
        let raw = r#"[
            {"id":1,"name":"A","brand":"B","price":"79228162514264337593543950000","image":"a","quantity":1,"size":"9","color":"Red"},
            {"id":2,"name":"C","brand":"D","price":"79228162514264337593543950000","image":"c","quantity":1,"size":"9","color":"Red"}
        ]"#;
        storage.set(CART_STORAGE_KEY, raw).unwrap();

        let store = CartStore::load(storage);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_missed_remove_and_set_quantity_are_silent() {
        let (storage, mut store) = empty_store();
        let calls = Arc::new(Mutex::new(0_u32));
        let sink = calls.clone();
        store.subscribe(move |_, _| *sink.lock().unwrap() += 1);

        let missing = VariantKey::new(ProductId::new(9), "9", "Red");
        assert!(!store.remove(&missing));
        assert!(!store.set_quantity(&missing, 4));
        assert!(!store.set_quantity(&missing, 0));

        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(storage.get(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_broken_storage_never_fails_mutations() {
        let mut store = CartStore::load(Arc::new(BrokenStorage));
        assert!(store.items().is_empty());

        store.add(selection(1, "9", "Red", 7999), qty(2));
        assert_eq!(store.total_items(), 2);
        store.clear();
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_subscribers_see_post_mutation_state() {
        let (_, mut store) = empty_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let id = store.subscribe(move |change, state| {
            sink.lock()
                .unwrap()
                .push((change.clone(), state.total_items()));
        });

        let sel = selection(1, "9", "Red", 7999);
        store.add(sel.clone(), qty(2));
        store.set_quantity(&sel.key(), 5);
        store.close_panel();

        assert!(store.unsubscribe(id));
        store.clear();
        assert!(!store.unsubscribe(id));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (
                    CartChange::Added {
                        key: sel.key(),
                        quantity: 2
                    },
                    2
                ),
                (
                    CartChange::QuantitySet {
                        key: sel.key(),
                        quantity: 5
                    },
                    5
                ),
                (CartChange::Panel { open: false }, 5),
            ]
        );
    }
}
