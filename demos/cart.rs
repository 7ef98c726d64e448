//! Cart Example
//!
//! Fills a pet mall cart from the product fixtures and checks it out.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` and `-q` to pick a category and search query

use std::io;

use anyhow::Result;
use clap::Parser;

use pawpath::{
    cart::Cart, catalog::Catalog, config::DemoArgs, observability::init_logging,
    payment::PaymentDecision,
};

/// Cart demo arguments
#[derive(Debug, Parser)]
struct CartArgs {
    #[command(flatten)]
    demo: DemoArgs,

    /// Shop category to browse
    #[arg(short, long, default_value = "all")]
    category: String,

    /// Search query over name, brand and category
    #[arg(short, long, default_value = "")]
    query: String,

    /// Units of each matching product to add
    #[arg(short, long, default_value_t = 1)]
    n: i64,
}

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    _ = dotenvy::dotenv();

    let args = CartArgs::parse();

    init_logging(&args.demo.logging)?;

    let mut catalog = Catalog::with_base_path(&args.demo.fixtures_dir);
    catalog.load_products(&args.demo.fixture)?;

    let policy = args.demo.shipping.policy();
    let mut cart = Cart::default();

    for product in catalog.search_products(&args.category, &args.query) {
        cart.add_item(product, false);
        cart.set_quantity(&product.id, false, args.n);
    }

    if cart.is_empty() {
        println!("No products match '{}' in {}.", args.query, args.category);
        return Ok(());
    }

    let remaining = cart.amount_until_free_shipping(&policy)?;

    if remaining.to_minor_units() > 0 {
        println!("Add {remaining} more for free shipping.");
    }

    let Some(summary) = cart.checkout(&policy, PaymentDecision::Confirm)? else {
        return Ok(());
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle)?;

    Ok(())
}
