//! Finalized bookings and order placement

use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::{
    booking::{
        draft::{BookingDraft, NotificationSettings, PetInfo, WalkType},
        step::Step,
        validation::{ValidationError, validate_through},
    },
    payment::PaymentMethod,
    pricing::Pricing,
    walkers::Walker,
};

/// Errors reported by an order placer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The order system refused the booking.
    #[error("booking was rejected: {0}")]
    Rejected(String),

    /// The order system could not be reached.
    #[error("order placement is unavailable")]
    Unavailable,
}

/// A booking with every required detail present.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Single walk or package
    pub walk_type: Option<WalkType>,

    /// Walk length in minutes
    pub duration_minutes: Option<u32>,

    /// Calendar date token
    pub date: String,

    /// Clock time token
    pub time: String,

    /// Pick-up address
    pub address: Option<String>,

    /// Chosen walker
    pub walker: Walker,

    /// Pet details
    pub pet: PetInfo,

    /// Preset caution notes
    pub caution_templates: Vec<String>,

    /// Free-form notes for the walker
    pub custom_notes: Option<String>,

    /// Who to call if something goes wrong
    pub emergency_contact: Option<String>,

    /// Walk update preferences
    pub notifications: NotificationSettings,

    /// How the owner pays
    pub payment_method: Option<PaymentMethod>,

    /// Derived price breakdown, if one was applied
    pub pricing: Option<Pricing>,
}

impl TryFrom<BookingDraft> for Booking {
    type Error = ValidationError;

    fn try_from(draft: BookingDraft) -> Result<Self, Self::Error> {
        validate_through(Step::Confirmation, &draft)?;

        let (Some(date), Some(time), Some(walker), Some(pet)) = (
            draft.date,
            draft.time,
            draft.selected_walker,
            draft.pet_info,
        ) else {
            // validate_through has already rejected drafts missing any of these
            return Err(ValidationError::NoWalkerSelected);
        };

        Ok(Booking {
            walk_type: draft.walk_type,
            duration_minutes: draft.duration_minutes,
            date,
            time,
            address: draft.address,
            walker,
            pet,
            caution_templates: draft
                .caution_templates
                .map(|templates| templates.into_iter().collect())
                .unwrap_or_default(),
            custom_notes: draft.custom_notes,
            emergency_contact: draft.emergency_contact,
            notifications: draft.notifications.unwrap_or_default(),
            payment_method: draft.payment_method,
            pricing: draft.pricing,
        })
    }
}

/// Proof that a booking was accepted by the order system.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// Reference issued by the order system
    pub reference: String,

    /// The booking as it was placed
    pub booking: Booking,
}

/// Accepts finalized bookings on behalf of the order system.
#[automock]
pub trait OrderPlacer {
    /// Place `booking` and return the order reference.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the booking was not accepted.
    fn place(&mut self, booking: &Booking) -> Result<String, OrderError>;
}

/// Stand-in order system that accepts everything and numbers bookings in sequence.
#[derive(Debug)]
pub struct SimulatedOrderPlacer {
    prefix: String,
    next: u64,
}

impl SimulatedOrderPlacer {
    /// Create a placer issuing references with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SimulatedOrderPlacer {
    fn default() -> Self {
        Self::new("WALK")
    }
}

impl OrderPlacer for SimulatedOrderPlacer {
    fn place(&mut self, booking: &Booking) -> Result<String, OrderError> {
        let reference = format!("{}-{:06}", self.prefix, self.next);

        self.next = self.next.saturating_add(1);

        info!(
            reference = %reference,
            walker = %booking.walker.id,
            date = %booking.date,
            time = %booking.time,
            "placed simulated booking"
        );

        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::booking::{draft::DraftPatch, test_support::complete_draft};

    use super::*;

    #[test]
    fn complete_draft_converts_to_booking() -> TestResult {
        let mut draft = complete_draft();
        draft.merge(DraftPatch {
            caution_templates: Some(["leash-pulling".to_string(), "no-treats".to_string()].into()),
            ..DraftPatch::default()
        });

        let booking = Booking::try_from(draft)?;

        assert_eq!(booking.date, "2024-05-01");
        assert_eq!(booking.walker.id, "w1");
        assert_eq!(booking.pet.name, "Rex");
        assert_eq!(booking.caution_templates, ["leash-pulling", "no-treats"]);
        assert_eq!(booking.notifications, NotificationSettings::default());

        Ok(())
    }

    #[test]
    fn incomplete_draft_is_rejected() {
        let mut draft = complete_draft();
        draft.insurance_agreed = Some(false);

        assert_eq!(
            Booking::try_from(draft),
            Err(ValidationError::InsuranceNotAgreed)
        );
    }

    #[test]
    fn simulated_placer_numbers_bookings_in_sequence() -> TestResult {
        let booking = Booking::try_from(complete_draft())?;
        let mut placer = SimulatedOrderPlacer::new("PW");

        assert_eq!(placer.place(&booking)?, "PW-000001");
        assert_eq!(placer.place(&booking)?, "PW-000002");

        Ok(())
    }
}
