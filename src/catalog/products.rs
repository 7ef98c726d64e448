//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, KRW, USD},
};
use serde::Deserialize;

use crate::{catalog::CatalogError, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Shop category
    pub category: String,

    /// Product price (e.g., "25000 KRW")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Average rating
    #[serde(default)]
    pub rating: f32,

    /// Number of reviews
    #[serde(default)]
    pub review_count: u32,

    /// Price before markdown (e.g., "30000 KRW")
    pub original_price: Option<String>,

    /// Markdown percentage
    pub discount: Option<u8>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            brand: fixture.brand,
            category: fixture.category,
            price,
            image: fixture.image,
            description: fixture.description,
            rating: fixture.rating,
            review_count: fixture.review_count,
            original_price,
            discount: fixture.discount,
        })
    }
}

/// Parse price string (e.g., "25000 KRW" or "2.99 GBP") into money
///
/// The amount is scaled by the currency's exponent, so won amounts are whole
/// numbers and pound amounts have pence.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "KRW" => KRW,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}
