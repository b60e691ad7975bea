//! Marigold CLI - Cart and catalog tools for the Marigold storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! marigold catalog list
//! marigold catalog show prod-1
//!
//! # Work the cart
//! marigold cart add prod-1 -q 2 -v Size=Medium -v "Color=Royal Blue"
//! marigold cart show
//! marigold cart update "prod-1-Color:Royal Blue|Size:Medium" 3
//! marigold cart remove <line-id>
//! marigold cart validate
//! marigold cart clear
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, inspect, and mutate the persisted cart
//! - `catalog` - Browse the demo catalog
//!
//! The cart snapshot lives at `MARIGOLD_CART_PATH` (default
//! `marigold-cart.json` in the working directory), so the cart survives
//! between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]
// User-facing output goes to stdout; diagnostics stay on tracing.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "marigold")]
#[command(author, version, about = "Marigold storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id, e.g. `prod-1`
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variant choice as `Name=Value` (repeatable), e.g. `-v Size=Medium`
        #[arg(short = 'v', long = "variant")]
        variants: Vec<String>,

        /// Add even when the requested quantity exceeds available stock
        #[arg(long)]
        force: bool,
    },
    /// Print the cart lines and totals
    Show,
    /// Set a line's quantity (0 removes the line)
    Update {
        /// Line item id, as printed by `cart show`
        line_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Line item id, as printed by `cart show`
        line_id: String,
    },
    /// Remove all lines from the cart
    Clear,
    /// Check every cart line against current stock
    Validate,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product with its variants and stock
    Show {
        /// Product id, e.g. `prod-1`
        product_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
                variants,
                force,
            } => commands::cart::add(&product_id, quantity, &variants, force).await?,
            CartAction::Show => commands::cart::show().await?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&line_id, quantity).await?;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&line_id).await?,
            CartAction::Clear => commands::cart::clear().await?,
            CartAction::Validate => commands::cart::validate().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Show { product_id } => commands::catalog::show(&product_id)?,
        },
    }
    Ok(())
}
