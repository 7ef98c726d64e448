//! Booking
//!
//! The walk booking wizard: a five-step state machine over a [`BookingDraft`],
//! with per-step validation, a payment confirmation gate and hand-off to an
//! order system.

pub mod draft;
pub mod order;
pub mod step;
pub mod validation;
pub mod workflow;

pub use draft::{BookingDraft, DraftPatch, NotificationSettings, PetInfo, WalkType};
pub use order::{Booking, BookingConfirmation, OrderError, OrderPlacer, SimulatedOrderPlacer};
pub use step::Step;
pub use validation::{DraftField, ValidationError, validate_step};
pub use workflow::{BookingWorkflow, CompletionError, Retreat, WorkflowError};
