//! Catalog
//!
//! Static reference data read from YAML fixtures: walkers, shop products and
//! service configuration. Everything here is read-only once loaded.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{booking::WalkType, products::Product, walkers::Walker};

pub mod products;
pub mod service;

use service::{
    CautionTemplate, DurationOption, PaymentMethodOption, ServiceFixture, ServiceModeOption,
    WalkTypeOption,
};

/// Category name that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two entries share an identifier
    #[error("Duplicate {0} id: {1}")]
    DuplicateId(&'static str, String),

    /// Walker not found
    #[error("Walker not found: {0}")]
    WalkerNotFound(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No price configured for a walk type and duration
    #[error("No price for a {walk_type} walk of {minutes} minutes")]
    NoTariff {
        /// Walk type asked for
        walk_type: WalkType,

        /// Duration asked for
        minutes: u32,
    },
}

#[derive(Debug, Deserialize)]
struct WalkersFixture {
    walkers: Vec<Walker>,
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    /// Base path for fixture files
    base_path: PathBuf,

    walkers: Vec<Walker>,
    products: Vec<Product>,

    /// id -> index lookups
    walker_index: FxHashMap<String, usize>,
    product_index: FxHashMap<String, usize>,

    walk_types: Vec<WalkTypeOption>,
    durations: Vec<DurationOption>,
    tariffs: FxHashMap<(WalkType, u32), Money<'static, Currency>>,
    payment_methods: Vec<PaymentMethodOption>,
    caution_templates: Vec<CautionTemplate>,
    service_modes: Vec<ServiceModeOption>,

    /// Currency shared by every price in the catalog
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create a new empty catalog with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty catalog with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            walkers: Vec::new(),
            products: Vec::new(),
            walker_index: FxHashMap::default(),
            product_index: FxHashMap::default(),
            walk_types: Vec::new(),
            durations: Vec::new(),
            tariffs: FxHashMap::default(),
            payment_methods: Vec::new(),
            caution_templates: Vec::new(),
            service_modes: Vec::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set (walkers, products and service configuration with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog
            .load_walkers(name)?
            .load_products(name)?
            .load_service(name)?;

        Ok(catalog)
    }

    /// Load walkers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an id repeats.
    pub fn load_walkers(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("walkers", name)?;
        let fixture: WalkersFixture = serde_norway::from_str(&contents)?;

        let index = Self::index_batch(
            "walker",
            &self.walker_index,
            self.walkers.len(),
            fixture.walkers.iter().map(|walker| walker.id.as_str()),
        )?;

        self.walker_index.extend(index);
        self.walkers.extend(fixture.walkers);

        debug!(fixture = name, walkers = self.walkers.len(), "loaded walkers");

        Ok(self)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an id repeats, or
    /// prices are in mixed currencies.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("products", name)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let index = Self::index_batch(
            "product",
            &self.product_index,
            self.products.len(),
            products.iter().map(|product| product.id.as_str()),
        )?;

        let currency =
            self.agreed_currency(products.iter().map(|product| product.price.currency()))?;

        self.product_index.extend(index);
        self.products.extend(products);
        self.currency = currency;

        debug!(fixture = name, products = self.products.len(), "loaded products");

        Ok(self)
    }

    /// Load service configuration from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a tariff price is invalid.
    pub fn load_service(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("service", name)?;
        let fixture: ServiceFixture = serde_norway::from_str(&contents)?;

        let mut tariffs = Vec::new();

        for duration in &fixture.durations {
            for (walk_type, price) in &duration.prices {
                tariffs.push(((*walk_type, duration.minutes), products::parse_price(price)?));
            }
        }

        let currency = self.agreed_currency(tariffs.iter().map(|(_, price)| price.currency()))?;

        self.currency = currency;
        self.tariffs.extend(tariffs);
        self.durations
            .extend(fixture.durations.into_iter().map(|duration| DurationOption {
                minutes: duration.minutes,
                label: duration.label,
            }));
        self.walk_types.extend(fixture.walk_types);
        self.payment_methods.extend(fixture.payment_methods);
        self.caution_templates.extend(fixture.caution_templates);
        self.service_modes.extend(fixture.service_modes);

        debug!(fixture = name, tariffs = self.tariffs.len(), "loaded service configuration");

        Ok(self)
    }

    /// All walkers, in fixture order
    pub fn list_walkers(&self) -> &[Walker] {
        &self.walkers
    }

    /// Walkers with `time` among their available slots
    pub fn available_walkers(&self, time: &str) -> Vec<&Walker> {
        self.walkers
            .iter()
            .filter(|walker| walker.is_available_at(time))
            .collect()
    }

    /// Get a walker by id
    ///
    /// # Errors
    ///
    /// Returns an error if the walker is not found.
    pub fn walker(&self, id: &str) -> Result<&Walker, CatalogError> {
        self.walker_index
            .get(id)
            .and_then(|idx| self.walkers.get(*idx))
            .ok_or_else(|| CatalogError::WalkerNotFound(id.to_string()))
    }

    /// Products in `category`, in fixture order. [`ALL_CATEGORIES`] returns every product.
    pub fn list_products_by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| category == ALL_CATEGORIES || product.category == category)
            .collect()
    }

    /// Products in `category` matching `query` by name, brand or category.
    pub fn search_products(&self, category: &str, query: &str) -> Vec<&Product> {
        self.list_products_by_category(category)
            .into_iter()
            .filter(|product| product.matches(query))
            .collect()
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product, CatalogError> {
        self.product_index
            .get(id)
            .and_then(|idx| self.products.get(*idx))
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Distinct product categories in first-seen order, led by [`ALL_CATEGORIES`].
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Base price of a walk, before any promotional rules.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoTariff`] if no price is configured.
    pub fn base_price(
        &self,
        walk_type: WalkType,
        minutes: u32,
    ) -> Result<Money<'static, Currency>, CatalogError> {
        self.tariffs
            .get(&(walk_type, minutes))
            .copied()
            .ok_or(CatalogError::NoTariff { walk_type, minutes })
    }

    /// Walk types on offer
    pub fn walk_types(&self) -> &[WalkTypeOption] {
        &self.walk_types
    }

    /// Walk lengths on offer
    pub fn durations(&self) -> &[DurationOption] {
        &self.durations
    }

    /// Accepted payment methods
    pub fn payment_methods(&self) -> &[PaymentMethodOption] {
        &self.payment_methods
    }

    /// Preset caution notes
    pub fn caution_templates(&self) -> &[CautionTemplate] {
        &self.caution_templates
    }

    /// Service modes
    pub fn service_modes(&self) -> &[ServiceModeOption] {
        &self.service_modes
    }

    /// Currency of the catalog's prices, once any have been loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn read_fixture(&self, kind: &str, name: &str) -> Result<String, CatalogError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Index a batch of new ids after `start`, refusing ids already loaded or repeated in the batch.
    fn index_batch<'a>(
        kind: &'static str,
        existing: &FxHashMap<String, usize>,
        start: usize,
        ids: impl Iterator<Item = &'a str>,
    ) -> Result<FxHashMap<String, usize>, CatalogError> {
        let mut index = FxHashMap::default();

        for (offset, id) in ids.enumerate() {
            if existing.contains_key(id) || index.contains_key(id) {
                return Err(CatalogError::DuplicateId(kind, id.to_string()));
            }

            index.insert(id.to_string(), start + offset);
        }

        Ok(index)
    }

    /// The single currency shared by the catalog and `currencies`.
    fn agreed_currency(
        &self,
        mut currencies: impl Iterator<Item = &'static Currency>,
    ) -> Result<Option<&'static Currency>, CatalogError> {
        currencies.try_fold(self.currency, |agreed, currency| match agreed {
            Some(existing) if existing != currency => Err(CatalogError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            _ => Ok(Some(currency)),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
