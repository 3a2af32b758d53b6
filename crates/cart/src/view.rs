//! Display projection of the cart and the popup templates.
//!
//! [`CartView`] holds everything the popup shows as ready-to-print strings.
//! Names are escaped with [`escape_html`] when the view is built, so the
//! templates insert them verbatim.

use askama::Template;
use serde::Serialize;

use spiceaura_core::{Cart, LineItem, escape_html, format_price};

/// One cart line as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    /// Position in the cart; mutation controls send this back.
    pub index: usize,
    pub id: String,
    /// HTML-escaped display name.
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Formatted unit price.
    pub price: String,
    /// Formatted `price × quantity`.
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    /// Equal to the subtotal; there is no tax or shipping.
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .iter()
                .enumerate()
                .map(|(index, item)| CartItemView::new(index, item))
                .collect(),
            subtotal: format_price(totals.subtotal),
            total: format_price(totals.subtotal),
            item_count: totals.total_quantity,
        }
    }
}

impl CartItemView {
    fn new(index: usize, item: &LineItem) -> Self {
        Self {
            index,
            id: item.id().to_string(),
            name: escape_html(item.name()),
            image: item.image().to_owned(),
            quantity: item.qty(),
            price: format_price(item.price()),
            line_price: format_price(item.line_total()),
        }
    }
}

/// Cart popup fragment.
#[derive(Template)]
#[template(path = "cart/popup.html")]
pub struct CartPopupTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "cart/count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}
