//! SpiceAura Core - Shared cart types.
//!
//! This crate provides the types and pure helpers used by the other SpiceAura
//! components:
//! - `cart` - Cart store, durable storage backends, checkout handoff, views
//! - `cli` - Command-line front end driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no logging. Every cart state transition lives here so it can be
//! tested without a storage backend.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, line items, the cart aggregate, prices
//! - [`text`] - Markup escaping for display names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use text::escape_html;
pub use types::*;
