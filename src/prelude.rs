//! Pawpath prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    booking::{
        Booking, BookingConfirmation, BookingDraft, BookingWorkflow, CompletionError, DraftField,
        DraftPatch, NotificationSettings, OrderError, OrderPlacer, PetInfo, Retreat,
        SimulatedOrderPlacer, Step, ValidationError, WalkType, WorkflowError, validate_step,
    },
    cart::{Cart, CartError, CartLine, ShippingPolicy},
    catalog::{Catalog, CatalogError},
    discounts::{DiscountError, DiscountRule},
    flags::{FlagStore, FlagStoreError, MemoryFlagStore, ResumeOutcome, ServiceGuide},
    payment::{PaymentDecision, PaymentMethod},
    pricing::{Pricing, PricingError, derive_pricing},
    products::Product,
    summary::{CheckoutSummary, SummaryError, write_booking_summary},
    walkers::{Walker, WalkerReview},
};
