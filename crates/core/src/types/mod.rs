//! Core types for SpiceAura.
//!
//! This module provides the cart aggregate and the values it holds.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;

pub use cart::{Cart, CartError, CartTotals, DecreaseOutcome};
pub use id::ProductId;
pub use line_item::{LineItem, PLACEHOLDER_NAME, ProductAttributes, ProductDescriptor};
pub use price::{CURRENCY_SYMBOL, format_price, parse_price};
