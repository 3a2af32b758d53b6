//! Cart commands.
//!
//! Each invocation behaves like one page load of the storefront: the stored
//! cart is loaded, a single shopper action is applied and persisted, and the
//! result is rendered.
//!
//! # Usage
//!
//! ```bash
//! # Add a product by its data attributes
//! spiceaura cart add --id turmeric --name "Turmeric" --price 85
//!
//! # Add a product the way a card without data attributes is read
//! spiceaura cart add --title "Black Pepper" --price-text "₹ 1,050.00"
//!
//! # Change quantities by position
//! spiceaura cart increase 0
//! spiceaura cart decrease 1
//! spiceaura cart remove 0
//!
//! # Show the cart as text, popup HTML, or JSON
//! spiceaura cart show
//! spiceaura cart show --html
//!
//! # Hand off to checkout
//! spiceaura cart checkout
//! ```

use std::io::Write;

use askama::Template;
use thiserror::Error;

use spiceaura_cart::{
    CartCountTemplate, CartPopupTemplate, CartStorage, CartStore, CartView, CheckoutError,
    CheckoutHandoff, FileStorage,
};
use spiceaura_core::{CartError, CartTotals, ProductAttributes, format_price};

use crate::config::CliConfig;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The requested position does not exist.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout was refused.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// How `show` renders the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// A single shopper action against the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    Show(ShowFormat),
    Add(ProductAttributes),
    Increase(usize),
    Decrease(usize),
    Remove(usize),
    Checkout,
}

/// Open the configured file-backed cart store.
#[must_use]
pub fn open_store(config: &CliConfig) -> CartStore<FileStorage> {
    CartStore::load_with_key(FileStorage::new(&config.data_dir), config.cart_key.as_str())
}

/// Run one command against a store, writing output to `out`.
///
/// # Errors
///
/// Returns `CommandError` if the index is out of range, checkout is refused,
/// or output cannot be written.
pub fn run<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &CliConfig,
    command: CartCommand,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        CartCommand::Show(format) => show(store, format, out),
        CartCommand::Add(attributes) => {
            let product = attributes.resolve();
            tracing::info!(product_id = %product.id, name = %product.name, "Adding to cart");
            let totals = store.add_item(product);
            write_totals(out, totals)
        }
        CartCommand::Increase(index) => {
            let totals = store.increase(index)?;
            write_totals(out, totals)
        }
        CartCommand::Decrease(index) => {
            let totals = store.decrease(index)?;
            write_totals(out, totals)
        }
        CartCommand::Remove(index) => {
            let totals = store.remove(index)?;
            write_totals(out, totals)
        }
        CartCommand::Checkout => {
            let redirect = CheckoutHandoff::new(config.checkout_url.as_str()).begin(store)?;
            if !redirect.persisted {
                tracing::warn!("Cart could not be saved before checkout");
            }
            writeln!(out, "Redirecting to {}", redirect.location)?;
            Ok(())
        }
    }
}

fn show<S: CartStorage>(
    store: &CartStore<S>,
    format: ShowFormat,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let view = CartView::from(store.cart());
    match format {
        ShowFormat::Html => {
            let count = CartCountTemplate {
                count: view.item_count,
            }
            .render()?;
            let popup = CartPopupTemplate { cart: view }.render()?;
            writeln!(out, "{count}")?;
            writeln!(out, "{popup}")?;
        }
        ShowFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
        ShowFormat::Text => write_table(store, out)?,
    }
    Ok(())
}

fn write_table<S: CartStorage>(
    store: &CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if store.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    writeln!(out, "{:>3}  {:<28} {:>5} {:>12} {:>12}", "#", "Item", "Qty", "Price", "Total")?;
    for (index, item) in store.items().iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<28} {:>5} {:>12} {:>12}",
            index,
            item.name(),
            item.qty(),
            format_price(item.price()),
            format_price(item.line_total()),
        )?;
    }
    write_totals(out, store.totals())
}

fn write_totals(out: &mut impl Write, totals: CartTotals) -> Result<(), CommandError> {
    let noun = if totals.total_quantity == 1 { "item" } else { "items" };
    writeln!(
        out,
        "Subtotal: {} ({} {noun})",
        format_price(totals.subtotal),
        totals.total_quantity
    )?;
    Ok(())
}
