//! Service configuration fixtures
//!
//! Walk types, durations and their tariffs, payment methods, caution templates
//! and the app's service modes.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{booking::WalkType, payment::PaymentMethod};

/// Wrapper for service configuration in YAML
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceFixture {
    /// Walk types on offer
    pub walk_types: Vec<WalkTypeOption>,

    /// Walk lengths on offer, with prices
    pub durations: Vec<DurationFixture>,

    /// Accepted payment methods
    pub payment_methods: Vec<PaymentMethodOption>,

    /// Preset caution notes
    pub caution_templates: Vec<CautionTemplate>,

    /// Top-level service modes
    pub service_modes: Vec<ServiceModeOption>,
}

/// A walk type as shown to the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalkTypeOption {
    /// Walk type
    pub value: WalkType,

    /// Short label
    pub label: String,

    /// Longer explanation
    #[serde(default)]
    pub description: String,
}

/// A walk duration and what it costs per walk type, as written in YAML.
#[derive(Debug, Deserialize)]
pub struct DurationFixture {
    /// Length in minutes
    pub minutes: u32,

    /// Short label
    pub label: String,

    /// Price strings keyed by walk type (e.g. `single: "15000 KRW"`)
    #[serde(default)]
    pub prices: FxHashMap<WalkType, String>,
}

/// A walk duration offered to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationOption {
    /// Length in minutes
    pub minutes: u32,

    /// Short label
    pub label: String,
}

/// A payment method as shown to the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentMethodOption {
    /// Method
    pub id: PaymentMethod,

    /// Display name
    pub name: String,

    /// Icon reference
    #[serde(default)]
    pub icon: String,

    /// Longer explanation
    #[serde(default)]
    pub description: String,
}

/// A preset caution note owners can tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CautionTemplate {
    /// Template identifier, stored in the booking draft
    pub id: String,

    /// Short title
    pub title: String,

    /// Full note for the walker
    #[serde(default)]
    pub description: String,
}

/// Which half of the app the user is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Book walkers
    Walker,

    /// Shop the pet mall
    Mall,
}

/// Display settings for a service mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceModeOption {
    /// Mode
    pub id: ServiceMode,

    /// Title
    pub title: String,

    /// Subtitle
    #[serde(default)]
    pub subtitle: String,

    /// Placeholder text for the search box
    #[serde(default, rename = "searchPlaceholder")]
    pub search_placeholder: String,
}
