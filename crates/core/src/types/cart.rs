//! The cart aggregate.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s where insertion order is
//! display order. Every transition keeps two invariants:
//!
//! - no two items share a [`ProductId`]
//! - every item has `qty >= 1`; an item that would drop to zero is removed
//!
//! Positional operations take the index the item was rendered at. An index
//! outside the cart is a caller bug and is reported without touching the
//! cart.

use serde::Serialize;
use thiserror::Error;

use super::id::ProductId;
use super::line_item::{LineItem, ProductDescriptor};

/// Errors from positional cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The index does not address an item in the cart.
    #[error("cart index {index} out of range (cart has {len} items)")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of items in the cart.
        len: usize,
    },
}

/// What [`Cart::decrease`] did to the addressed item.
#[derive(Debug, Clone, PartialEq)]
pub enum DecreaseOutcome {
    /// The quantity dropped by one and is now `qty`.
    Decremented { qty: u32 },
    /// The item was at quantity 1 and has been removed.
    Removed(LineItem),
}

/// Totals derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    /// `Σ price × qty` over all items.
    pub subtotal: f64,
    /// `Σ qty` over all items.
    pub total_quantity: u64,
}

/// Ordered collection of line items with unique product IDs.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line items, merging repeated IDs.
    ///
    /// A repeated ID adds its quantity to the first occurrence; the first
    /// occurrence's name, price and image are kept.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(&item.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.qty = existing.qty.saturating_add(item.qty);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the item with the given ID, if present.
    #[must_use]
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Add one unit of a product and return the index of its line.
    ///
    /// If the product is already in the cart only its quantity changes; the
    /// descriptor's name, price and image are ignored.
    pub fn add(&mut self, product: ProductDescriptor) -> usize {
        if let Some(index) = self.position(&product.id) {
            if let Some(existing) = self.items.get_mut(index) {
                existing.qty = existing.qty.saturating_add(1);
            }
            return index;
        }

        self.items.push(product.into_line_item());
        self.items.len() - 1
    }

    /// Increment the quantity at `index` and return the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    pub fn increase(&mut self, index: usize) -> Result<u32, CartError> {
        let item = self.item_mut(index)?;
        item.qty = item.qty.saturating_add(1);
        Ok(item.qty)
    }

    /// Decrement the quantity at `index`, removing the item at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    pub fn decrease(&mut self, index: usize) -> Result<DecreaseOutcome, CartError> {
        let item = self.item_mut(index)?;
        if item.qty > 1 {
            item.qty -= 1;
            return Ok(DecreaseOutcome::Decremented { qty: item.qty });
        }
        Ok(DecreaseOutcome::Removed(self.items.remove(index)))
    }

    /// Remove the item at `index`, shifting later items down.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in the cart.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Compute subtotal and total quantity.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::default(), |totals, item| CartTotals {
                subtotal: totals.subtotal + item.line_total(),
                total_quantity: totals.total_quantity + u64::from(item.qty),
            })
    }

    fn check_index(&self, index: usize) -> Result<(), CartError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, CartError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn product(id: &str, price: f64) -> ProductDescriptor {
        ProductDescriptor::new(id, id.to_uppercase(), price, format!("img/{id}.jpg"))
    }

    fn assert_totals(cart: &Cart, subtotal: f64, total_quantity: u64) {
        let totals = cart.totals();
        assert!(
            (totals.subtotal - subtotal).abs() < 1e-9,
            "subtotal {} != {subtotal}",
            totals.subtotal
        );
        assert_eq!(totals.total_quantity, total_quantity);
    }

    #[test]
    fn test_add_new_item_has_qty_one() {
        let mut cart = Cart::new();
        let index = cart.add(product("a", 100.0));
        assert_eq!(index, 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].qty(), 1);
    }

    #[test]
    fn test_add_existing_item_keeps_first_details() {
        let mut cart = Cart::new();
        cart.add(product("a", 100.0));
        let index = cart.add(ProductDescriptor::new("a", "Renamed", 5.0, "other.jpg"));

        assert_eq!(index, 0);
        assert_eq!(cart.len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.qty(), 2);
        assert_eq!(item.name(), "A");
        assert!((item.price() - 100.0).abs() < f64::EPSILON);
        assert_eq!(item.image(), "img/a.jpg");
    }

    #[test]
    fn test_scenario_add_increase_decrease() {
        let mut cart = Cart::new();

        cart.add(product("a", 100.0));
        assert_totals(&cart, 100.0, 1);

        cart.add(product("a", 100.0));
        assert_eq!(cart.items()[0].qty(), 2);
        assert_totals(&cart, 200.0, 2);

        let b = cart.add(product("b", 50.0));
        assert_totals(&cart, 250.0, 3);

        let outcome = cart.decrease(b).unwrap();
        assert!(matches!(outcome, DecreaseOutcome::Removed(ref item) if item.id().as_str() == "b"));
        assert_totals(&cart, 200.0, 2);

        let a = cart.position(&ProductId::new("a")).unwrap();
        assert_eq!(cart.increase(a).unwrap(), 3);
        assert_totals(&cart, 300.0, 3);
    }

    #[test]
    fn test_decrease_above_one_only_decrements() {
        let mut cart = Cart::new();
        cart.add(product("a", 10.0));
        cart.increase(0).unwrap();
        cart.increase(0).unwrap();

        assert_eq!(
            cart.decrease(0).unwrap(),
            DecreaseOutcome::Decremented { qty: 2 }
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_shifts_later_items() {
        let mut cart = Cart::new();
        cart.add(product("a", 1.0));
        cart.add(product("b", 2.0));
        cart.add(product("c", 3.0));

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.id().as_str(), "b");
        let ids: Vec<_> = cart.iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_out_of_range_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(product("a", 1.0));
        let before = cart.clone();

        let expected = CartError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(cart.increase(3).unwrap_err(), expected);
        assert_eq!(cart.decrease(3).unwrap_err(), expected);
        assert_eq!(cart.remove(3).unwrap_err(), expected);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_out_of_range_error_message() {
        let err = CartError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "cart index 5 out of range (cart has 2 items)");
    }

    #[test]
    fn test_from_items_merges_duplicate_ids() {
        let cart = Cart::from_items([
            LineItem::new(ProductId::new("a"), "First", 10.0, "", 2),
            LineItem::new(ProductId::new("b"), "B", 5.0, "", 1),
            LineItem::new(ProductId::new("a"), "Second", 99.0, "x.jpg", 3),
        ]);

        assert_eq!(cart.len(), 2);
        let a = &cart.items()[0];
        assert_eq!(a.name(), "First");
        assert_eq!(a.qty(), 5);
        assert!((a.price() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::from_items([LineItem::new(ProductId::new("a"), "A", 1.0, "", u32::MAX)]);
        assert_eq!(cart.increase(0).unwrap(), u32::MAX);
        cart.add(product("a", 1.0));
        assert_eq!(cart.items()[0].qty(), u32::MAX);
    }

    #[test]
    fn test_empty_cart_totals() {
        assert_eq!(Cart::new().totals(), CartTotals::default());
    }

    proptest! {
        #[test]
        fn test_adds_count_per_id(ids in prop::collection::vec(0u8..8, 0..40)) {
            let mut cart = Cart::new();
            let mut expected: HashMap<String, u32> = HashMap::new();
            for id in &ids {
                let id = format!("p{id}");
                cart.add(ProductDescriptor::new(id.as_str(), id.as_str(), 1.0, ""));
                *expected.entry(id).or_default() += 1;
            }

            prop_assert_eq!(cart.len(), expected.len());
            for item in &cart {
                prop_assert_eq!(Some(&item.qty()), expected.get(item.id().as_str()));
            }
        }

        #[test]
        fn test_readd_never_changes_details(
            first_price in 0.0f64..10_000.0,
            second_price in 0.0f64..10_000.0,
            first_name in "[a-zA-Z ]{1,12}",
            second_name in "[a-zA-Z ]{1,12}",
        ) {
            let mut cart = Cart::new();
            cart.add(ProductDescriptor::new("x", first_name.clone(), first_price, "one.jpg"));
            cart.add(ProductDescriptor::new("x", second_name, second_price, "two.jpg"));

            let item = &cart.items()[0];
            prop_assert_eq!(item.name(), first_name.as_str());
            prop_assert_eq!(item.price().to_bits(), first_price.to_bits());
            prop_assert_eq!(item.image(), "one.jpg");
        }

        #[test]
        fn test_totals_match_line_sums(
            lines in prop::collection::vec((0u32..100_000, 1u32..50), 0..20),
        ) {
            let cart = Cart::from_items(lines.iter().enumerate().map(|(i, (cents, qty))| {
                LineItem::new(ProductId::new(format!("p{i}")), "P", f64::from(*cents) / 100.0, "", *qty)
            }));

            let subtotal: f64 = cart.iter().map(|i| i.price() * f64::from(i.qty())).sum();
            let quantity: u64 = cart.iter().map(|i| u64::from(i.qty())).sum();
            let totals = cart.totals();
            prop_assert!((totals.subtotal - subtotal).abs() < 1e-6);
            prop_assert_eq!(totals.total_quantity, quantity);
        }

        #[test]
        fn test_decrease_semantics(qty in 1u32..20) {
            let mut cart = Cart::from_items([LineItem::new(ProductId::new("a"), "A", 1.0, "", qty)]);
            let outcome = cart.decrease(0).unwrap();
            if qty == 1 {
                prop_assert!(cart.is_empty());
                prop_assert!(matches!(outcome, DecreaseOutcome::Removed(_)), "expected Removed outcome");
            } else {
                prop_assert_eq!(cart.items()[0].qty(), qty - 1);
            }
        }
    }
}
