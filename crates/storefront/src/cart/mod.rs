//! Client cart: line items, the store that owns them, and the device-local
//! storage the store snapshots into.
//!
//! # Invariants
//!
//! - At most one line per [`VariantKey`] (`product_id`, `size`, `color`)
//! - Every stored line has a quantity of at least one
//! - Lines keep insertion order
//!
//! The store is the only writer. Views read [`CartState`] or subscribe for
//! post-mutation notifications.

pub mod line_item;
pub mod storage;
pub mod store;

pub use line_item::{LineItem, ProductSelection, VariantKey};
pub use storage::{DirectoryStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartChange, CartSnapshot, CartState, CartStore, SubscriptionId};
