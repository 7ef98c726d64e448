//! Summaries
//!
//! Plain-text tables for a checked-out cart and a placed booking.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    booking::BookingConfirmation,
    cart::{Cart, CartError, CartLine, ShippingPolicy},
};

/// Errors that can occur when building or writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Writing to the output failed.
    #[error("failed to write summary")]
    IO,
}

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    /// Lines as they were when the cart was checked out
    pub lines: Vec<CartLine>,

    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// Shipping charged
    pub shipping_fee: Money<'static, Currency>,

    /// Amount paid
    pub total: Money<'static, Currency>,

    /// Number of units across all lines
    pub item_count: u64,
}

impl CheckoutSummary {
    /// Summarise `cart` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the totals cannot be computed.
    pub fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Result<Self, CartError> {
        let subtotal = cart.total_price()?;
        let shipping_fee = cart.shipping_fee(policy)?;

        Ok(Self {
            lines: cart.lines().to_vec(),
            subtotal,
            shipping_fee,
            total: cart.checkout_total(policy)?,
            item_count: cart.item_count(),
        })
    }

    /// Write the summary as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if a line total overflows or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Brand", "Type", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let product = line.product();

            builder.push_record([
                format!("#{:<3}", idx + 1),
                product.name.clone(),
                product.brand.clone(),
                if line.is_subscription() {
                    "subscription".to_string()
                } else {
                    "one-off".to_string()
                },
                line.quantity().to_string(),
                format!("{}", product.price),
                format!("{}", line.line_total()?),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(4..7), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        write_totals(
            &mut out,
            &[
                (" Subtotal:", format!("{}", self.subtotal)),
                (" Shipping:", format!("{}", self.shipping_fee)),
                (" Total:", format!("{}", self.total)),
            ],
        )
    }
}

/// Write a placed booking as a two-column table.
///
/// # Errors
///
/// Returns [`SummaryError::IO`] if writing fails.
pub fn write_booking_summary(
    mut out: impl io::Write,
    confirmation: &BookingConfirmation,
) -> Result<(), SummaryError> {
    let booking = &confirmation.booking;
    let mut builder = Builder::default();

    push_row(&mut builder, "Booking", &confirmation.reference);
    push_row(&mut builder, "Date", format!("{} {}", booking.date, booking.time));

    if let Some(walk_type) = booking.walk_type {
        push_row(&mut builder, "Walk", walk_type.to_string());
    }

    if let Some(minutes) = booking.duration_minutes {
        push_row(&mut builder, "Duration", format!("{minutes} min"));
    }

    if let Some(address) = &booking.address {
        push_row(&mut builder, "Address", address);
    }

    push_row(&mut builder, "Walker", &booking.walker.name);
    push_row(&mut builder, "Pet", format!("{} ({})", booking.pet.name, booking.pet.breed));

    if !booking.caution_templates.is_empty() {
        push_row(&mut builder, "Cautions", booking.caution_templates.join(", "));
    }

    if let Some(method) = booking.payment_method {
        push_row(&mut builder, "Payment", method.to_string());
    }

    if let Some(pricing) = &booking.pricing {
        push_row(&mut builder, "Base price", format!("{}", pricing.base_price));
        push_row(&mut builder, "Discount", format!("{}", pricing.discount_amount));
        push_row(&mut builder, "Total", format!("{}", pricing.final_price));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::first(), Color::BOLD);

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

fn push_row(builder: &mut Builder, label: &str, value: impl AsRef<str>) {
    builder.push_record([label, value.as_ref()]);
}

fn write_totals(out: &mut impl io::Write, rows: &[(&str, String)]) -> Result<(), SummaryError> {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")
            .map_err(|_err| SummaryError::IO)?;
    }

    writeln!(out).map_err(|_err| SummaryError::IO)
}
