//! Cart manager.
//!
//! Owns the in-memory [`Cart`] for the lifetime of a page and mirrors it to
//! durable storage under [`CART_STORAGE_KEY`]. Every mutation rewrites the
//! full record; there are no partial updates and no schema versions.

mod view;

pub use view::{
    CartCountTemplate, CartItemView, CartItemsTemplate, CartTextTemplate, CartTotalTemplate,
    CartView,
};

use parrot_core::{AddOutcome, Cart, Price, ProductId};
use tracing::instrument;

use crate::error::Result;
use crate::notice::Notice;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "parrotCart";

/// The cart plus the store it is mirrored to.
#[derive(Debug)]
pub struct CartManager<S> {
    cart: Cart,
    store: S,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Load the cart from `store`.
    ///
    /// A missing key is an empty cart. So is anything that fails to read or
    /// parse as a cart record; those cases are logged and otherwise ignored.
    pub fn load(store: S) -> Self {
        let cart = match store.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Cart>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored cart is unreadable, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(items = cart.count(), "Cart loaded");
        Self { cart, store }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number of line items, as shown on the cart badge.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cart.count()
    }

    /// Display data for the current cart.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the manager and return the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Add one unit of a product and persist.
    ///
    /// Always returns the "added to cart" notice naming the product, whether
    /// a new line was appended or an existing one incremented.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the cart cannot be written to storage.
    #[instrument(skip(self, price), fields(product_id = %id))]
    pub fn add(&mut self, id: ProductId, name: &str, price: Price) -> Result<Notice> {
        let previous = self.cart.clone();
        match self.cart.add(id, name, price) {
            AddOutcome::Appended => tracing::info!("Added new line item"),
            AddOutcome::Incremented(quantity) => {
                tracing::info!(quantity = quantity.get(), "Incremented existing line item");
            }
        }
        self.save_or_restore(previous)?;
        Ok(Notice::added_to_cart(name))
    }

    /// Add one unit to an existing line and persist.
    ///
    /// Returns `false` without touching storage if the product is absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the cart cannot be written to storage.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn increment(&mut self, id: &ProductId) -> Result<bool> {
        let previous = self.cart.clone();
        if !self.cart.increment(id) {
            tracing::debug!("Increment ignored, product not in cart");
            return Ok(false);
        }
        self.save_or_restore(previous)?;
        Ok(true)
    }

    /// Take one unit off an existing line and persist.
    ///
    /// Returns `false` without touching storage if the product is absent or
    /// its quantity is already one.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the cart cannot be written to storage.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn decrement(&mut self, id: &ProductId) -> Result<bool> {
        let previous = self.cart.clone();
        if !self.cart.decrement(id) {
            tracing::debug!("Decrement ignored, product absent or at quantity one");
            return Ok(false);
        }
        self.save_or_restore(previous)?;
        Ok(true)
    }

    /// Drop a line and persist.
    ///
    /// The cart is written even when nothing was removed. Returns whether a
    /// line was dropped.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the cart cannot be written to storage.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> Result<bool> {
        let previous = self.cart.clone();
        let removed = self.cart.remove(id).is_some();
        if removed {
            tracing::info!("Removed line item");
        }
        self.save_or_restore(previous)?;
        Ok(removed)
    }

    /// Write the full cart to storage.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if encoding or the storage write fails.
    pub fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.cart)?;
        self.store.set_item(CART_STORAGE_KEY, &raw)?;
        tracing::debug!(items = self.cart.count(), "Cart persisted");
        Ok(())
    }

    /// Persist, or put `previous` back if the write fails so the in-memory
    /// cart never runs ahead of storage.
    fn save_or_restore(&mut self, previous: Cart) -> Result<()> {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Cart write failed, reverting");
            self.cart = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parrot_core::Quantity;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    fn stored(store: &MemoryStore) -> Option<String> {
        store.get_item(CART_STORAGE_KEY).unwrap()
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove_item(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    /// A store that serves one fixed cart and refuses every write.
    struct ReadOnlyWith(String);

    impl KeyValueStore for ReadOnlyWith {
        fn get_item(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Ok(Some(self.0.clone()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove_item(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let manager = CartManager::load(MemoryStore::new());
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_load_unparsable_is_empty() {
        for raw in ["not json", "{}", "[{\"id\":\"p1\"}]", "null"] {
            let mut store = MemoryStore::new();
            store.set_item(CART_STORAGE_KEY, raw).unwrap();
            let manager = CartManager::load(store);
            assert!(manager.cart().is_empty(), "{raw} should load as empty");
        }
    }

    #[test]
    fn test_load_zero_quantity_record_is_empty() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                CART_STORAGE_KEY,
                r#"[{"id":"p1","name":"Widget","price":9.99,"quantity":0,"image":""}]"#,
            )
            .unwrap();
        assert!(CartManager::load(store).cart().is_empty());
    }

    #[test]
    fn test_add_persists_and_returns_notice() {
        let mut manager = CartManager::load(MemoryStore::new());
        let notice = manager.add(id("p1"), "Widget", price("9.99")).unwrap();

        assert_eq!(notice.text(), "Widget added to cart!");
        let raw = stored(manager.store()).unwrap();
        assert!(raw.contains("\"id\":\"p1\""));
        assert!(raw.contains("\"quantity\":1"));
    }

    #[test]
    fn test_repeat_add_notice_still_names_product() {
        let mut manager = CartManager::load(MemoryStore::new());
        manager.add(id("p1"), "Widget", price("9.99")).unwrap();
        let notice = manager.add(id("p1"), "Widget", price("9.99")).unwrap();

        assert_eq!(notice, Notice::added_to_cart("Widget"));
        assert_eq!(manager.count(), 1);
        assert_eq!(
            manager.cart().get(&id("p1")).unwrap().quantity,
            Quantity::new(2).unwrap()
        );
    }

    #[test]
    fn test_misses_do_not_write() {
        let mut manager = CartManager::load(MemoryStore::new());

        assert!(!manager.increment(&id("p1")).unwrap());
        assert!(!manager.decrement(&id("p1")).unwrap());
        assert_eq!(stored(manager.store()), None);
    }

    #[test]
    fn test_decrement_at_one_does_not_write() {
        let mut manager = CartManager::load(MemoryStore::new());
        manager.add(id("p1"), "Widget", price("9.99")).unwrap();
        let before = stored(manager.store());

        assert!(!manager.decrement(&id("p1")).unwrap());
        assert_eq!(stored(manager.store()), before);
        assert_eq!(manager.cart().get(&id("p1")).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn test_remove_always_persists() {
        let mut manager = CartManager::load(MemoryStore::new());
        assert!(!manager.remove(&id("ghost")).unwrap());
        assert_eq!(stored(manager.store()).as_deref(), Some("[]"));

        manager.add(id("p1"), "Widget", price("9.99")).unwrap();
        assert!(manager.remove(&id("p1")).unwrap());
        assert_eq!(stored(manager.store()).as_deref(), Some("[]"));
        assert!(manager.view().items.is_empty());
    }

    #[test]
    fn test_reload_reproduces_cart() {
        let mut manager = CartManager::load(MemoryStore::new());
        manager.add(id("p1"), "Widget", price("9.99")).unwrap();
        manager.add(id("p2"), "Gadget", price("5.00")).unwrap();
        manager.increment(&id("p1")).unwrap();
        let before = manager.cart().clone();

        let reloaded = CartManager::load(manager.into_store());
        assert_eq!(reloaded.cart(), &before);
        assert_eq!(reloaded.view().total, "24.98");
    }

    #[test]
    fn test_works_through_a_borrowed_store() {
        let mut store = MemoryStore::new();
        {
            let mut manager = CartManager::load(&mut store);
            manager.add(id("p1"), "Widget", price("9.99")).unwrap();
        }
        assert!(stored(&store).is_some());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut manager = CartManager::load(ReadOnlyStore);
        let err = manager.add(id("p1"), "Widget", price("9.99")).unwrap_err();
        assert!(err.to_string().starts_with("Storage error"));
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_failed_write_reverts_every_mutation() {
        let raw = r#"[{"id":"p1","name":"Widget","price":9.99,"quantity":2,"image":""}]"#;
        let mut manager = CartManager::load(ReadOnlyWith(raw.to_string()));
        let seeded = manager.cart().clone();
        assert_eq!(seeded.total_quantity(), 2);

        assert!(manager.increment(&id("p1")).is_err());
        assert!(manager.decrement(&id("p1")).is_err());
        assert!(manager.remove(&id("p1")).is_err());
        assert!(manager.add(id("p2"), "Gadget", price("5")).is_err());
        assert_eq!(manager.cart(), &seeded);
        assert_eq!(manager.view().total, "19.98");
    }
}
