//! Products

use rusty_money::{Money, iso::Currency};

/// A shop product as listed by the catalog.
///
/// Cart lines keep their own clone of this, so later catalog changes never
/// reach an item already in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Shop category (e.g. `food`, `treats`)
    pub category: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Image reference
    pub image: String,

    /// Short description
    pub description: String,

    /// Average rating out of five
    pub rating: f32,

    /// Number of reviews behind the rating
    pub review_count: u32,

    /// Price before any markdown
    pub original_price: Option<Money<'static, Currency>>,

    /// Markdown percentage shown next to the original price
    pub discount: Option<u8>,
}

impl Product {
    /// Returns true if the product matches `query` by name, brand or category.
    ///
    /// Matching is case-insensitive. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return true;
        }

        [&self.name, &self.brand, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusty_money::{Money, iso::KRW};

    use super::Product;

    /// Build a product priced in won with placeholder details.
    pub(crate) fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            brand: "Pawfect".to_string(),
            category: "food".to_string(),
            price: Money::from_minor(price, KRW),
            image: String::new(),
            description: String::new(),
            rating: 4.5,
            review_count: 10,
            original_price: None,
            discount: None,
        }
    }
}
