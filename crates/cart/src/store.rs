//! The cart store.
//!
//! [`CartStore`] owns the in-memory [`Cart`] and a storage backend. It loads
//! the cart once when created, writes it back after every successful
//! mutation, and returns freshly computed totals so the caller can re-render.
//!
//! Storage problems never reach the caller. An unreadable or corrupt value
//! loads as an empty cart, and a failed write is logged while the in-memory
//! cart stays authoritative for the rest of the session.

use tracing::instrument;

use spiceaura_core::{Cart, CartError, CartTotals, DecreaseOutcome, LineItem, ProductDescriptor};

use crate::normalize::{decode_cart, encode_cart};
use crate::storage::CartStorage;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "spiceaura_cart_v1";

/// A cart mirrored to durable storage.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store with an empty cart under [`CART_STORAGE_KEY`] without
    /// reading storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Create a store with an empty cart under a custom key without reading
    /// storage.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            cart: Cart::new(),
        }
    }

    /// Create a store and load the cart persisted under [`CART_STORAGE_KEY`].
    #[must_use]
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, CART_STORAGE_KEY)
    }

    /// Create a store and load the cart persisted under `key`.
    #[must_use]
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::with_key(storage, key);
        store.reload();
        store
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// A missing value, a read error, invalid JSON and non-array JSON all
    /// load as an empty cart.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn reload(&mut self) -> &Cart {
        self.cart = match self.storage.get(&self.key) {
            Ok(Some(raw)) => decode_cart(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Cart::new()
            }),
            Ok(None) => {
                tracing::debug!("No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored cart, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(items = self.cart.len(), "Cart loaded");
        &self.cart
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The storage key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give up the store and return its backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart only gains quantity; its stored name,
    /// price and image are left as they were first added.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: ProductDescriptor) -> CartTotals {
        let index = self.cart.add(product);
        tracing::debug!(index, "Added item to cart");
        self.commit()
    }

    /// Increment the quantity of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    /// Nothing is changed or persisted in that case.
    #[instrument(skip(self))]
    pub fn increase(&mut self, index: usize) -> Result<CartTotals, CartError> {
        let qty = self.cart.increase(index)?;
        tracing::debug!(qty, "Increased quantity");
        Ok(self.commit())
    }

    /// Decrement the quantity of the item at `index`, removing it when the
    /// quantity would reach zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    #[instrument(skip(self))]
    pub fn decrease(&mut self, index: usize) -> Result<CartTotals, CartError> {
        match self.cart.decrease(index)? {
            DecreaseOutcome::Decremented { qty } => tracing::debug!(qty, "Decreased quantity"),
            DecreaseOutcome::Removed(item) => {
                tracing::debug!(product_id = %item.id(), "Removed item at quantity zero");
            }
        }
        Ok(self.commit())
    }

    /// Remove the item at `index` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    #[instrument(skip(self))]
    pub fn remove(&mut self, index: usize) -> Result<CartTotals, CartError> {
        let item = self.cart.remove(index)?;
        tracing::debug!(product_id = %item.id(), "Removed item");
        Ok(self.commit())
    }

    /// Subtotal and total quantity of the current cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Write the whole cart to storage.
    ///
    /// Returns `false` if the write failed. The failure is logged and the
    /// in-memory cart is kept as is.
    pub fn persist(&mut self) -> bool {
        let encoded = match encode_cart(&self.cart) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not encode cart");
                return false;
            }
        };

        match self.storage.set(&self.key, &encoded) {
            Ok(()) => {
                tracing::debug!(key = %self.key, bytes = encoded.len(), "Cart saved");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not save cart");
                false
            }
        }
    }

    fn commit(&mut self) -> CartTotals {
        self.persist();
        self.totals()
    }
}
