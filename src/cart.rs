//! Cart

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;
use tracing::debug;

use crate::{payment::PaymentDecision, products::Product, summary::CheckoutSummary};

/// Order total at which shipping becomes free, in won.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 50_000;

/// Flat shipping fee charged below the threshold, in won.
pub const DEFAULT_SHIPPING_FEE: i64 = 3_000;

/// Errors related to cart totals and checkout.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line total could not be represented in minor units.
    #[error("line total for product {0} overflowed")]
    Overflow(String),

    /// A price's currency differs from the cart currency (product id, price currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The running cart total could not be represented in minor units (product being added).
    #[error("cart total overflowed at product {0}")]
    TotalOverflow(String),

    /// Total plus shipping could not be represented in minor units.
    #[error("checkout total overflowed")]
    CheckoutOverflow,

    /// Checkout was requested on a cart with no lines.
    #[error("cannot check out an empty cart")]
    Empty,
}

/// Shipping fee rule applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingPolicy {
    /// Totals at or above this ship for free.
    pub threshold: Money<'static, Currency>,

    /// Fee charged for totals below the threshold.
    pub fee: Money<'static, Currency>,
}

impl ShippingPolicy {
    /// Create a policy from won amounts.
    pub fn won(threshold: i64, fee: i64) -> Self {
        Self {
            threshold: Money::from_minor(threshold, iso::KRW),
            fee: Money::from_minor(fee, iso::KRW),
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::won(DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE)
    }
}

/// One product in the cart, keyed by product id and subscription flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
    is_subscription: bool,
}

impl CartLine {
    fn new(product: Product, is_subscription: bool) -> Self {
        Self {
            product,
            quantity: 1,
            is_subscription,
        }
    }

    /// Product snapshot taken when the line was created
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Product id
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether this line is a recurring subscription purchase
    pub fn is_subscription(&self) -> bool {
        self.is_subscription
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .product
            .price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| CartError::Overflow(self.product.id.clone()))?;

        Ok(Money::from_minor(minor, self.product.price.currency()))
    }

    fn is(&self, product_id: &str, is_subscription: bool) -> bool {
        self.product.id == product_id && self.is_subscription == is_subscription
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Bumps the quantity of the existing line for `(product.id, is_subscription)`,
    /// or appends a new line with quantity one.
    pub fn add_item(&mut self, product: &Product, is_subscription: bool) {
        if let Some(line) = self.line_mut(&product.id, is_subscription) {
            line.quantity = line.quantity.saturating_add(1);

            debug!(
                product_id = %product.id,
                is_subscription,
                quantity = line.quantity,
                "incremented cart line"
            );

            return;
        }

        self.lines
            .push(CartLine::new(product.clone(), is_subscription));

        debug!(product_id = %product.id, is_subscription, "added cart line");
    }

    /// Set the quantity of a line. A quantity of zero or less removes it.
    ///
    /// Does nothing if no line matches.
    pub fn set_quantity(&mut self, product_id: &str, is_subscription: bool, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, is_subscription);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(product_id, is_subscription) {
            line.quantity = quantity;

            debug!(product_id, is_subscription, quantity, "updated cart line");
        }
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, product_id: &str, is_subscription: bool) {
        let before = self.lines.len();

        self.lines.retain(|line| !line.is(product_id, is_subscription));

        if self.lines.len() != before {
            debug!(product_id, is_subscription, "removed cart line");
        }
    }

    /// Look up the line for `(product_id, is_subscription)`.
    pub fn line(&self, product_id: &str, is_subscription: bool) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.is(product_id, is_subscription))
    }

    fn line_mut(&mut self, product_id: &str, is_subscription: bool) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.is(product_id, is_subscription))
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` on overflow or if a line is priced in another currency.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self.lines.iter().try_fold(0_i64, |acc, line| {
            let line_total = line.line_total()?;

            if line_total.currency() != self.currency {
                return Err(CartError::CurrencyMismatch(
                    line.product.id.clone(),
                    line_total.currency().iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }

            acc.checked_add(line_total.to_minor_units())
                .ok_or_else(|| CartError::TotalOverflow(line.product.id.clone()))
        })?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Shipping fee for the current total: free at or above the threshold.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the total cannot be computed or the policy is in another currency.
    pub fn shipping_fee(
        &self,
        policy: &ShippingPolicy,
    ) -> Result<Money<'static, Currency>, CartError> {
        let total = self.total_price()?;

        self.ensure_policy_currency(policy)?;

        if total.to_minor_units() >= policy.threshold.to_minor_units() {
            Ok(Money::from_minor(0, self.currency))
        } else {
            Ok(policy.fee)
        }
    }

    /// How much more must be spent before shipping becomes free.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the total cannot be computed or the policy is in another currency.
    pub fn amount_until_free_shipping(
        &self,
        policy: &ShippingPolicy,
    ) -> Result<Money<'static, Currency>, CartError> {
        let total = self.total_price()?;

        self.ensure_policy_currency(policy)?;

        let remaining = policy
            .threshold
            .to_minor_units()
            .saturating_sub(total.to_minor_units())
            .max(0);

        Ok(Money::from_minor(remaining, self.currency))
    }

    /// Total plus shipping.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if either amount cannot be computed.
    pub fn checkout_total(
        &self,
        policy: &ShippingPolicy,
    ) -> Result<Money<'static, Currency>, CartError> {
        let total = self
            .total_price()?
            .to_minor_units()
            .checked_add(self.shipping_fee(policy)?.to_minor_units())
            .ok_or(CartError::CheckoutOverflow)?;

        Ok(Money::from_minor(total, self.currency))
    }

    /// Check out after the shopper has answered the payment prompt.
    ///
    /// On confirmation the cart is summarised and cleared. On cancellation it is
    /// left untouched and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] for an empty cart, or a totals error.
    pub fn checkout(
        &mut self,
        policy: &ShippingPolicy,
        decision: PaymentDecision,
    ) -> Result<Option<CheckoutSummary>, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        if decision == PaymentDecision::Cancel {
            debug!("checkout cancelled");
            return Ok(None);
        }

        let summary = CheckoutSummary::from_cart(self, policy)?;

        self.clear();

        debug!(total = %summary.total, "checked out cart");

        Ok(Some(summary))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn ensure_policy_currency(&self, policy: &ShippingPolicy) -> Result<(), CartError> {
        [policy.threshold, policy.fee]
            .iter()
            .find(|amount| amount.currency() != self.currency)
            .map_or(Ok(()), |amount| {
                Err(CartError::CurrencyMismatch(
                    "shipping policy".to_string(),
                    amount.currency().iso_alpha_code,
                    self.currency.iso_alpha_code,
                ))
            })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(iso::KRW)
    }
}
