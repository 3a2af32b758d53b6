//! SpiceAura CLI - Shopping cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add a product and show the cart
//! spiceaura cart add --id turmeric --name "Turmeric" --price 85
//! spiceaura cart show
//!
//! # Render the popup fragment
//! spiceaura cart show --html
//!
//! # Hand off to checkout
//! spiceaura cart checkout
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the cart (text, `--html` or `--json`)
//! - `cart add` - Add a product from its page attributes
//! - `cart increase|decrease|remove <index>` - Change a line by position
//! - `cart checkout` - Save the cart and print the checkout redirect
//!
//! Logs go to stderr; set `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spiceaura_core::ProductAttributes;

mod commands;
mod config;

use commands::cart::{CartCommand, CommandError, ShowFormat};
use config::CliConfig;

/// Log filter used when `RUST_LOG` is unset. The binary logs under its own
/// name, `spiceaura`, not the package name.
const DEFAULT_LOG_FILTER: &str = "spiceaura_cart=info,spiceaura=info";

#[derive(Parser)]
#[command(name = "spiceaura")]
#[command(author, version, about = "SpiceAura cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show {
        /// Render the popup HTML fragment
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add(AddArgs),
    /// Increase the quantity of the item at a position
    Increase {
        /// Position of the item as listed by `show`
        index: usize,
    },
    /// Decrease the quantity of the item at a position, removing it at zero
    Decrease {
        /// Position of the item as listed by `show`
        index: usize,
    },
    /// Remove the item at a position
    Remove {
        /// Position of the item as listed by `show`
        index: usize,
    },
    /// Save the cart and hand off to the checkout page
    Checkout,
}

/// Product attributes as the storefront page would expose them.
#[derive(Args)]
struct AddArgs {
    /// Product ID (`data-id`)
    #[arg(long)]
    id: Option<String>,

    /// Display name (`data-name`)
    #[arg(long)]
    name: Option<String>,

    /// Unit price (`data-price`)
    #[arg(long)]
    price: Option<String>,

    /// Image URI (`data-image`)
    #[arg(long)]
    image: Option<String>,

    /// Product card title, used when `--id`/`--name` are missing
    #[arg(long)]
    title: Option<String>,

    /// Displayed price text, used when `--price` is missing
    #[arg(long)]
    price_text: Option<String>,

    /// Product card image source, used when `--image` is missing
    #[arg(long)]
    image_src: Option<String>,
}

impl From<AddArgs> for ProductAttributes {
    fn from(args: AddArgs) -> Self {
        Self {
            data_id: args.id,
            data_name: args.name,
            data_price: args.price,
            data_image: args.image,
            card_title: args.title,
            card_price_text: args.price_text,
            card_image_src: args.image_src,
        }
    }
}

impl From<CartAction> for CartCommand {
    fn from(action: CartAction) -> Self {
        match action {
            CartAction::Show { html: true, .. } => Self::Show(ShowFormat::Html),
            CartAction::Show { json: true, .. } => Self::Show(ShowFormat::Json),
            CartAction::Show { .. } => Self::Show(ShowFormat::Text),
            CartAction::Add(args) => Self::Add(args.into()),
            CartAction::Increase { index } => Self::Increase(index),
            CartAction::Decrease { index } => Self::Decrease(index),
            CartAction::Remove { index } => Self::Remove(index),
            CartAction::Checkout => Self::Checkout,
        }
    }
}

fn main() {
    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if let Some(CommandError::Checkout(notice)) = e.downcast_ref::<CommandError>() {
            show_notice(notice);
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

/// Print a shopper-facing notice, independent of the log level.
#[allow(clippy::print_stderr)]
fn show_notice(notice: &impl std::fmt::Display) {
    eprintln!("{notice}");
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Cart { action } => {
            let mut store = commands::cart::open_store(&config);
            let mut stdout = std::io::stdout().lock();
            commands::cart::run(&mut store, &config, action.into(), &mut stdout)?;
        }
    }
    Ok(())
}
