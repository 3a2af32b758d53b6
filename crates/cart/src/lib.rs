//! SpiceAura Cart - Persistent shopping cart.
//!
//! This crate wraps the [`Cart`](spiceaura_core::Cart) aggregate from
//! `spiceaura-core` with everything needed to keep it across page loads:
//!
//! - [`store`] - [`CartStore`], which loads, mutates and persists the cart
//! - [`storage`] - the [`CartStorage`] trait with in-memory and file backends
//! - [`normalize`] - tolerant decoding of persisted cart records
//! - [`checkout`] - the handoff to the external checkout step
//! - [`view`] - display projection and popup templates
//!
//! # Example
//!
//! ```rust
//! use spiceaura_cart::{CartStore, MemoryStorage};
//! use spiceaura_core::ProductDescriptor;
//!
//! let mut store = CartStore::load(MemoryStorage::new());
//! let totals = store.add_item(ProductDescriptor::new("cumin", "Cumin", 120.0, ""));
//! assert_eq!(totals.total_quantity, 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod error;
pub mod normalize;
pub mod storage;
pub mod store;
pub mod view;

pub use checkout::{CheckoutError, CheckoutHandoff, CheckoutRedirect};
pub use error::StorageError;
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::{CART_STORAGE_KEY, CartStore};
pub use view::{CartCountTemplate, CartItemView, CartPopupTemplate, CartView};
