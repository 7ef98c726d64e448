//! Booking workflow
//!
//! Drives a [`BookingDraft`] through the five wizard steps. The host calls
//! [`BookingWorkflow::update`] as the user types and [`BookingWorkflow::advance`]
//! / [`BookingWorkflow::retreat`] when they press next or back. Moving from
//! payment to confirmation goes through [`BookingWorkflow::confirm_payment`]
//! instead, and [`BookingWorkflow::complete`] hands the result to the order
//! system.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    booking::{
        draft::{BookingDraft, DraftPatch},
        order::{Booking, BookingConfirmation, OrderError, OrderPlacer},
        step::Step,
        validation::{ValidationError, validate_step},
    },
    discounts::DiscountRule,
    payment::PaymentDecision,
    pricing::{Pricing, PricingError, derive_pricing},
};

/// Errors returned by workflow operations. None of them change the current step.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The current step is missing required details.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Payment has to be confirmed with `confirm_payment` before moving on.
    #[error("payment must be confirmed before the booking can be confirmed")]
    PaymentConfirmationRequired,

    /// The operation is only valid from another step.
    #[error("expected to be at step {expected}, but workflow is at step {actual}")]
    WrongStep {
        /// Step the operation needs
        expected: Step,

        /// Step the workflow is at
        actual: Step,
    },

    /// The booking price could not be derived.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order system did not accept the booking.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// A failed completion. Carries the workflow back so the user can retry.
#[derive(Debug, Error)]
#[error("booking could not be completed: {source}")]
pub struct CompletionError {
    workflow: Box<BookingWorkflow>,

    #[source]
    source: WorkflowError,
}

impl CompletionError {
    /// The reason completion failed.
    pub fn reason(&self) -> &WorkflowError {
        &self.source
    }

    /// Take back the workflow, draft and step unchanged.
    pub fn into_workflow(self) -> BookingWorkflow {
        *self.workflow
    }
}

/// Result of pressing back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved back to the given step.
    Moved(Step),

    /// Already at the first step: the host should leave the booking flow.
    Exit,
}

/// One in-progress booking.
#[derive(Debug, Clone, Default)]
pub struct BookingWorkflow {
    step: Step,
    draft: BookingDraft,
}

impl BookingWorkflow {
    /// Start a new booking at the first step with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the user is on.
    pub fn current_step(&self) -> Step {
        self.step
    }

    /// The details collected so far.
    pub fn current_draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Merge `patch` into the draft. Never changes the step.
    pub fn update(&mut self, patch: DraftPatch) {
        if patch.is_empty() {
            return;
        }

        self.draft.merge(patch);

        debug!(step = %self.step, "updated booking draft");
    }

    /// Validate the current step and move to the next one.
    ///
    /// At the confirmation step there is nowhere further to go, so this is a
    /// no-op returning the current step.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::Validation`]: the current step is incomplete.
    /// - [`WorkflowError::PaymentConfirmationRequired`]: at the payment step with
    ///   a valid draft; use [`BookingWorkflow::confirm_payment`].
    pub fn advance(&mut self) -> Result<Step, WorkflowError> {
        if let Err(err) = validate_step(self.step, &self.draft) {
            info!(step = %self.step, reason = %err, "rejected advance");
            return Err(err.into());
        }

        match self.step {
            Step::Payment => Err(WorkflowError::PaymentConfirmationRequired),
            Step::Confirmation => Ok(self.step),
            step => {
                let next = step.next().unwrap_or(step);

                self.step = next;

                debug!(from = %step, to = %next, "advanced booking");

                Ok(next)
            }
        }
    }

    /// Move back one step without validating. From the first step, ask the host
    /// to exit instead.
    pub fn retreat(&mut self) -> Retreat {
        match self.step.previous() {
            Some(previous) => {
                debug!(from = %self.step, to = %previous, "retreated booking");

                self.step = previous;

                Retreat::Moved(previous)
            }
            None => {
                debug!("exit requested from first booking step");

                Retreat::Exit
            }
        }
    }

    /// Apply the user's answer to the payment prompt.
    ///
    /// Confirming moves straight to the confirmation step; cancelling stays on
    /// payment. The charge itself is simulated.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::WrongStep`]: not at the payment step.
    /// - [`WorkflowError::Validation`]: confirming without agreeing to insurance.
    pub fn confirm_payment(&mut self, decision: PaymentDecision) -> Result<Step, WorkflowError> {
        self.expect_step(Step::Payment)?;

        if decision == PaymentDecision::Cancel {
            info!("payment cancelled");
            return Ok(self.step);
        }

        if let Err(err) = validate_step(Step::Payment, &self.draft) {
            info!(reason = %err, "rejected payment");
            return Err(err.into());
        }

        self.step = Step::Confirmation;

        info!(
            method = ?self.draft.payment_method,
            "payment confirmed"
        );

        Ok(self.step)
    }

    /// Derive the booking price from `base_price` and any promotional rules, and
    /// store it on the draft.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Pricing`] if the price cannot be derived. The
    /// previous pricing, if any, is kept.
    pub fn apply_pricing(
        &mut self,
        base_price: Money<'static, Currency>,
        rules: &[DiscountRule],
    ) -> Result<Pricing, WorkflowError> {
        let pricing = derive_pricing(base_price, rules)?;

        self.draft.pricing = Some(pricing);

        debug!(
            base = %pricing.base_price,
            discount = %pricing.discount_amount,
            total = %pricing.final_price,
            "priced booking"
        );

        Ok(pricing)
    }

    /// Hand the finished booking to the order system.
    ///
    /// The workflow is consumed on success. On failure it comes back inside the
    /// [`CompletionError`] with its draft intact.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] if the workflow is not at the confirmation
    /// step, the draft is no longer complete, or the order system refuses it.
    pub fn complete(
        self,
        placer: &mut impl OrderPlacer,
    ) -> Result<BookingConfirmation, CompletionError> {
        match self.try_place(placer) {
            Ok(confirmation) => {
                info!(reference = %confirmation.reference, "booking completed");
                Ok(confirmation)
            }
            Err(source) => {
                warn!(reason = %source, "booking completion failed");

                Err(CompletionError {
                    workflow: Box::new(self),
                    source,
                })
            }
        }
    }

    fn try_place(&self, placer: &mut impl OrderPlacer) -> Result<BookingConfirmation, WorkflowError> {
        self.expect_step(Step::Confirmation)?;

        let booking = Booking::try_from(self.draft.clone())?;
        let reference = placer.place(&booking)?;

        Ok(BookingConfirmation { reference, booking })
    }

    fn expect_step(&self, expected: Step) -> Result<(), WorkflowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WorkflowError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        booking::{
            draft::PetInfo,
            order::{MockOrderPlacer, SimulatedOrderPlacer},
            test_support::{complete_draft, rex},
        },
        walkers::test_support::walker,
    };

    use super::*;

    fn at_payment() -> Result<BookingWorkflow, WorkflowError> {
        let mut workflow = BookingWorkflow::new();

        workflow.update(DraftPatch::date_time("2024-05-01", "10:00"));
        workflow.advance()?;
        workflow.update(DraftPatch::walker(walker("w1")));
        workflow.advance()?;
        workflow.update(DraftPatch::pet(rex()));
        workflow.advance()?;

        Ok(workflow)
    }

    fn at_confirmation() -> Result<BookingWorkflow, WorkflowError> {
        let mut workflow = at_payment()?;

        workflow.update(DraftPatch::insurance(true));
        workflow.confirm_payment(PaymentDecision::Confirm)?;

        Ok(workflow)
    }

    #[test]
    fn starts_at_basic_info_with_empty_draft() {
        let workflow = BookingWorkflow::new();

        assert_eq!(workflow.current_step(), Step::BasicInfo);
        assert_eq!(workflow.current_draft(), &BookingDraft::default());
    }

    #[test]
    fn advance_without_date_time_stays_put() {
        let mut workflow = BookingWorkflow::new();
        workflow.update(DraftPatch {
            time: Some("10:00".to_string()),
            ..DraftPatch::default()
        });

        let result = workflow.advance();

        assert!(
            matches!(
                result,
                Err(WorkflowError::Validation(ValidationError::MissingDateTime(_)))
            ),
            "expected MissingDateTime, got {result:?}"
        );
        assert_eq!(workflow.current_step(), Step::BasicInfo);
    }

    #[test]
    fn advance_moves_exactly_one_step() -> TestResult {
        let mut workflow = BookingWorkflow::new();
        workflow.update(DraftPatch::date_time("2024-05-01", "10:00"));

        assert_eq!(workflow.advance()?, Step::WalkerSelection);
        assert_eq!(workflow.current_step(), Step::WalkerSelection);

        let result = workflow.advance();

        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::NoWalkerSelected))
        ));
        assert_eq!(workflow.current_step(), Step::WalkerSelection);

        Ok(())
    }

    #[test]
    fn walk_settings_require_pet_name_and_breed() -> TestResult {
        let mut workflow = BookingWorkflow::new();
        workflow.update(DraftPatch::date_time("2024-05-01", "10:00"));
        workflow.advance()?;
        workflow.update(DraftPatch::walker(walker("w1")));
        workflow.advance()?;

        workflow.update(DraftPatch::pet(PetInfo {
            name: "Rex".to_string(),
            ..PetInfo::default()
        }));

        assert!(matches!(
            workflow.advance(),
            Err(WorkflowError::Validation(ValidationError::IncompletePetInfo(_)))
        ));
        assert_eq!(workflow.current_step(), Step::WalkSettings);

        Ok(())
    }

    #[test]
    fn retreat_from_first_step_signals_exit() {
        let mut workflow = BookingWorkflow::new();

        assert_eq!(workflow.retreat(), Retreat::Exit);
        assert_eq!(workflow.current_step(), Step::BasicInfo);
    }

    #[test]
    fn retreat_skips_validation() -> TestResult {
        let mut workflow = at_payment()?;

        workflow.update(DraftPatch::date_time("", ""));

        assert_eq!(workflow.retreat(), Retreat::Moved(Step::WalkSettings));
        assert_eq!(workflow.retreat(), Retreat::Moved(Step::WalkerSelection));
        assert_eq!(workflow.retreat(), Retreat::Moved(Step::BasicInfo));
        assert_eq!(workflow.retreat(), Retreat::Exit);

        Ok(())
    }

    #[test]
    fn advance_from_payment_requires_confirmation() -> TestResult {
        let mut workflow = at_payment()?;

        assert!(matches!(
            workflow.advance(),
            Err(WorkflowError::Validation(ValidationError::InsuranceNotAgreed))
        ));

        workflow.update(DraftPatch::insurance(true));

        assert!(matches!(
            workflow.advance(),
            Err(WorkflowError::PaymentConfirmationRequired)
        ));
        assert_eq!(workflow.current_step(), Step::Payment);

        Ok(())
    }

    #[test]
    fn cancelled_payment_stays_on_payment() -> TestResult {
        let mut workflow = at_payment()?;
        workflow.update(DraftPatch::insurance(true));

        assert_eq!(
            workflow.confirm_payment(PaymentDecision::Cancel)?,
            Step::Payment
        );
        assert_eq!(workflow.current_step(), Step::Payment);

        Ok(())
    }

    #[test]
    fn confirmed_payment_without_insurance_is_rejected() -> TestResult {
        let mut workflow = at_payment()?;

        assert!(matches!(
            workflow.confirm_payment(PaymentDecision::Confirm),
            Err(WorkflowError::Validation(ValidationError::InsuranceNotAgreed))
        ));
        assert_eq!(workflow.current_step(), Step::Payment);

        Ok(())
    }

    #[test]
    fn confirm_payment_outside_payment_step_errors() {
        let mut workflow = BookingWorkflow::new();

        assert!(matches!(
            workflow.confirm_payment(PaymentDecision::Confirm),
            Err(WorkflowError::WrongStep {
                expected: Step::Payment,
                actual: Step::BasicInfo
            })
        ));
    }

    #[test]
    fn advance_at_confirmation_is_a_noop() -> TestResult {
        let mut workflow = at_confirmation()?;

        assert_eq!(workflow.advance()?, Step::Confirmation);
        assert_eq!(workflow.current_step(), Step::Confirmation);

        Ok(())
    }

    #[test]
    fn empty_update_changes_nothing() -> TestResult {
        let mut workflow = at_payment()?;
        let before = workflow.current_draft().clone();

        workflow.update(DraftPatch::default());

        assert_eq!(workflow.current_step(), Step::Payment);
        assert_eq!(workflow.current_draft(), &before);

        Ok(())
    }

    #[test]
    fn apply_pricing_stores_derived_price() -> TestResult {
        let mut workflow = BookingWorkflow::new();
        let rules = [DiscountRule::PercentageOff(Percentage::from(0.2))];

        let pricing = workflow.apply_pricing(Money::from_minor(25_000, iso::KRW), &rules)?;

        assert_eq!(pricing.final_price, Money::from_minor(20_000, iso::KRW));
        assert_eq!(workflow.current_draft().pricing, Some(pricing));

        Ok(())
    }

    #[test]
    fn failed_pricing_keeps_previous_price() -> TestResult {
        let mut workflow = BookingWorkflow::new();
        let first = workflow.apply_pricing(Money::from_minor(25_000, iso::KRW), &[])?;

        let result = workflow.apply_pricing(Money::from_minor(-1, iso::KRW), &[]);

        assert!(matches!(result, Err(WorkflowError::Pricing(_))));
        assert_eq!(workflow.current_draft().pricing, Some(first));

        Ok(())
    }

    #[test]
    fn complete_places_booking() -> TestResult {
        let workflow = at_confirmation()?;
        let mut placer = SimulatedOrderPlacer::default();

        let confirmation = workflow.complete(&mut placer)?;

        assert_eq!(confirmation.reference, "WALK-000001");
        assert_eq!(confirmation.booking.pet, rex());

        Ok(())
    }

    #[test]
    fn complete_before_confirmation_hands_workflow_back() -> TestResult {
        let workflow = at_payment()?;
        let mut placer = SimulatedOrderPlacer::default();

        let Err(err) = workflow.complete(&mut placer) else {
            panic!("expected completion to fail before confirmation");
        };

        assert!(matches!(
            err.reason(),
            WorkflowError::WrongStep {
                expected: Step::Confirmation,
                actual: Step::Payment
            }
        ));
        assert_eq!(err.into_workflow().current_step(), Step::Payment);

        Ok(())
    }

    #[test]
    fn order_failure_preserves_draft_for_retry() -> TestResult {
        let workflow = at_confirmation()?;
        let draft = workflow.current_draft().clone();

        let mut failing = MockOrderPlacer::new();
        failing
            .expect_place()
            .times(1)
            .returning(|_| Err(OrderError::Unavailable));

        let Err(err) = workflow.complete(&mut failing) else {
            panic!("expected the order placer to fail");
        };

        assert!(matches!(
            err.reason(),
            WorkflowError::Order(OrderError::Unavailable)
        ));

        let workflow = err.into_workflow();

        assert_eq!(workflow.current_step(), Step::Confirmation);
        assert_eq!(workflow.current_draft(), &draft);

        let confirmation = workflow.complete(&mut SimulatedOrderPlacer::new("RETRY"))?;

        assert_eq!(confirmation.reference, "RETRY-000001");

        Ok(())
    }

    #[test]
    fn complete_rechecks_the_draft() -> TestResult {
        let mut workflow = at_confirmation()?;
        workflow.update(DraftPatch::pet(PetInfo::default()));

        let Err(err) = workflow.complete(&mut SimulatedOrderPlacer::default()) else {
            panic!("expected an incomplete draft to be rejected");
        };

        assert!(matches!(
            err.reason(),
            WorkflowError::Validation(ValidationError::IncompletePetInfo(_))
        ));

        Ok(())
    }

    #[test]
    fn complete_draft_fixture_is_bookable() -> TestResult {
        Booking::try_from(complete_draft())?;

        Ok(())
    }
}
