//! Handoff to the external checkout step.
//!
//! The cart does not process orders. Checking out saves the cart one last
//! time and tells the caller where to send the shopper. An empty cart is
//! refused before anything is written.

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use spiceaura_core::CartTotals;

use crate::storage::CartStorage;
use crate::store::CartStore;

/// Checkout page used when none is configured.
pub const DEFAULT_CHECKOUT_TARGET: &str = "checkout.html";

/// Reasons a checkout handoff is refused.
///
/// The display text is the notice shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to check out.
    #[error("Your cart is empty.")]
    EmptyCart,
}

/// Where to send the shopper after a successful handoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRedirect {
    /// Checkout page to navigate to.
    pub location: String,
    /// Totals of the cart being handed off.
    pub totals: CartTotals,
    /// Whether the final save succeeded.
    pub persisted: bool,
}

/// Hands a non-empty cart to the checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHandoff {
    target: String,
}

impl CheckoutHandoff {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Save the cart and return the redirect to the checkout page.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no items. Storage
    /// is not touched in that case.
    #[instrument(skip(self, store), fields(target = %self.target))]
    pub fn begin<S: CartStorage>(
        &self,
        store: &mut CartStore<S>,
    ) -> Result<CheckoutRedirect, CheckoutError> {
        if store.is_empty() {
            tracing::info!("Checkout refused: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        let persisted = store.persist();
        let totals = store.totals();
        tracing::info!(
            items = store.items().len(),
            total_quantity = totals.total_quantity,
            subtotal = totals.subtotal,
            "Handing cart off to checkout"
        );

        Ok(CheckoutRedirect {
            location: self.target.clone(),
            totals,
            persisted,
        })
    }
}

impl Default for CheckoutHandoff {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKOUT_TARGET)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use spiceaura_core::ProductDescriptor;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::CART_STORAGE_KEY;

    #[test]
    fn test_empty_cart_is_refused_without_writing() {
        let mut store = CartStore::load(MemoryStorage::new());
        let err = CheckoutHandoff::default().begin(&mut store).unwrap_err();

        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty.");
        assert!(store.storage().raw(CART_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_target() {
        assert_eq!(CheckoutHandoff::default().target(), DEFAULT_CHECKOUT_TARGET);
        assert_eq!(CheckoutHandoff::new("/pay").target(), "/pay");
    }

    #[test]
    fn test_checkout_persists_and_redirects() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(ProductDescriptor::new("a", "A", 40.0, ""));
        store.add_item(ProductDescriptor::new("a", "A", 40.0, ""));

        let redirect = CheckoutHandoff::new("/checkout").begin(&mut store).unwrap();
        assert_eq!(redirect.location, "/checkout");
        assert_eq!(redirect.totals.total_quantity, 2);
        assert!((redirect.totals.subtotal - 80.0).abs() < f64::EPSILON);
        assert!(redirect.persisted);
        assert!(store.storage().raw(CART_STORAGE_KEY).is_some());
    }

    #[test]
    fn test_checkout_proceeds_when_save_fails() {
        let mut store = CartStore::new(MemoryStorage::with_quota(4));
        store.add_item(ProductDescriptor::new("a", "A", 1.0, ""));

        let redirect = CheckoutHandoff::default().begin(&mut store).unwrap();
        assert_eq!(redirect.location, DEFAULT_CHECKOUT_TARGET);
        assert!(!redirect.persisted);
    }
}
