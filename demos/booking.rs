//! Booking Example
//!
//! Walks a booking through every step using the catalog fixtures, prices it
//! from the tariff and prints the confirmation.
//!
//! Use `-f` to load a fixture set by name
//! Use `--walker` and `--time` to pick who walks and when

use std::io;

use anyhow::Result;
use clap::Parser;
use decimal_percentage::Percentage;

use pawpath::{
    booking::{BookingWorkflow, DraftPatch, PetInfo, SimulatedOrderPlacer, WalkType},
    catalog::Catalog,
    config::DemoArgs,
    discounts::DiscountRule,
    flags::{MemoryFlagStore, ServiceGuide, guide::save_pet_info},
    observability::init_logging,
    payment::{PaymentDecision, PaymentMethod},
    summary::write_booking_summary,
};

/// Booking demo arguments
#[derive(Debug, Parser)]
struct BookingArgs {
    #[command(flatten)]
    demo: DemoArgs,

    /// Walker to book
    #[arg(long, default_value = "w1")]
    walker: String,

    /// Time slot
    #[arg(long, default_value = "10:00")]
    time: String,

    /// Walk length in minutes
    #[arg(long, default_value_t = 60)]
    minutes: u32,

    /// Book a package instead of a single walk
    #[arg(long)]
    package: bool,

    /// Percentage off the tariff, e.g. 0.1 for 10%
    #[arg(long)]
    promo: Option<f64>,
}

/// Booking Example
#[tokio::main]
#[expect(clippy::print_stdout, reason = "Example code")]
pub async fn main() -> Result<()> {
    _ = dotenvy::dotenv();

    let args = BookingArgs::parse();

    init_logging(&args.demo.logging)?;

    let mut catalog = Catalog::with_base_path(&args.demo.fixtures_dir);
    catalog
        .load_walkers(&args.demo.fixture)?
        .load_service(&args.demo.fixture)?;

    let store = MemoryFlagStore::new();
    let mut guide = ServiceGuide::new();

    if guide.on_resume(&store).await.show_guide {
        println!("First visit: showing the service guide.");
        guide.complete(&store).await?;
    }

    let walk_type = if args.package {
        WalkType::Package
    } else {
        WalkType::Single
    };

    let pet = PetInfo {
        name: "Rex".to_string(),
        breed: "Beagle".to_string(),
        age: "2".to_string(),
        weight: "10".to_string(),
        ..PetInfo::default()
    };

    let mut workflow = BookingWorkflow::new();

    workflow.update(DraftPatch {
        walk_type: Some(walk_type),
        duration_minutes: Some(args.minutes),
        ..DraftPatch::date_time("2024-05-01", args.time.as_str())
    });
    workflow.advance()?;

    workflow.update(DraftPatch::walker(catalog.walker(&args.walker)?.clone()));
    workflow.advance()?;

    workflow.update(DraftPatch::pet(pet.clone()));
    workflow.advance()?;

    let rules: Vec<DiscountRule> = args
        .promo
        .map(|promo| DiscountRule::PercentageOff(Percentage::from(promo)))
        .into_iter()
        .collect();

    workflow.apply_pricing(catalog.base_price(walk_type, args.minutes)?, &rules)?;

    workflow.update(DraftPatch {
        payment_method: Some(PaymentMethod::Card),
        ..DraftPatch::insurance(true)
    });
    workflow.confirm_payment(PaymentDecision::Confirm)?;

    let confirmation = workflow.complete(&mut SimulatedOrderPlacer::default())?;

    save_pet_info(&store, &pet).await?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_booking_summary(&mut handle, &confirmation)?;

    let outcome = guide.on_resume(&store).await;
    println!("Pet details saved for next time: {}", outcome.has_pet_info);

    Ok(())
}
