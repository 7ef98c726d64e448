//! Per-step validation
//!
//! Each step names the draft fields it needs before the wizard may move past
//! it. Blank strings count as missing.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::booking::{draft::BookingDraft, step::Step};

/// Fields that can block a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// `date`
    Date,

    /// `time`
    Time,

    /// `selected_walker`
    SelectedWalker,

    /// `pet_info.name`
    PetName,

    /// `pet_info.breed`
    PetBreed,

    /// `insurance_agreed`
    InsuranceAgreed,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::SelectedWalker => "walker",
            DraftField::PetName => "pet name",
            DraftField::PetBreed => "pet breed",
            DraftField::InsuranceAgreed => "insurance agreement",
        };

        f.write_str(name)
    }
}

/// Missing fields, in display order.
pub type MissingFields = SmallVec<[DraftField; 2]>;

/// Why the wizard refused to move on from a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Basic info is missing the date, the time or both.
    #[error("missing date/time: {}", join(.0))]
    MissingDateTime(MissingFields),

    /// No walker has been chosen.
    #[error("no walker selected")]
    NoWalkerSelected,

    /// Pet name or breed is missing.
    #[error("incomplete pet info: {}", join(.0))]
    IncompletePetInfo(MissingFields),

    /// The insurance terms have not been accepted.
    #[error("insurance not agreed")]
    InsuranceNotAgreed,
}

impl ValidationError {
    /// The step this error blocks.
    pub fn step(&self) -> Step {
        match self {
            ValidationError::MissingDateTime(_) => Step::BasicInfo,
            ValidationError::NoWalkerSelected => Step::WalkerSelection,
            ValidationError::IncompletePetInfo(_) => Step::WalkSettings,
            ValidationError::InsuranceNotAgreed => Step::Payment,
        }
    }

    /// The fields that need filling in.
    pub fn missing_fields(&self) -> MissingFields {
        match self {
            ValidationError::MissingDateTime(fields)
            | ValidationError::IncompletePetInfo(fields) => fields.clone(),
            ValidationError::NoWalkerSelected => SmallVec::from_slice(&[DraftField::SelectedWalker]),
            ValidationError::InsuranceNotAgreed => {
                SmallVec::from_slice(&[DraftField::InsuranceAgreed])
            }
        }
    }
}

/// Check that `draft` has what `step` requires.
///
/// The confirmation step has no requirements of its own.
///
/// # Errors
///
/// Returns the [`ValidationError`] for `step` if anything is missing.
pub fn validate_step(step: Step, draft: &BookingDraft) -> Result<(), ValidationError> {
    match step {
        Step::BasicInfo => {
            let missing = missing([
                (DraftField::Date, filled(draft.date.as_deref())),
                (DraftField::Time, filled(draft.time.as_deref())),
            ]);

            if missing.is_empty() {
                Ok(())
            } else {
                Err(ValidationError::MissingDateTime(missing))
            }
        }
        Step::WalkerSelection => {
            if draft.selected_walker.is_some() {
                Ok(())
            } else {
                Err(ValidationError::NoWalkerSelected)
            }
        }
        Step::WalkSettings => {
            let pet = draft.pet_info.as_ref();

            let missing = missing([
                (DraftField::PetName, filled(pet.map(|pet| pet.name.as_str()))),
                (DraftField::PetBreed, filled(pet.map(|pet| pet.breed.as_str()))),
            ]);

            if missing.is_empty() {
                Ok(())
            } else {
                Err(ValidationError::IncompletePetInfo(missing))
            }
        }
        Step::Payment => {
            if draft.insurance_agreed == Some(true) {
                Ok(())
            } else {
                Err(ValidationError::InsuranceNotAgreed)
            }
        }
        Step::Confirmation => Ok(()),
    }
}

/// Validate every step up to, but not including, `step`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in step order.
pub fn validate_through(step: Step, draft: &BookingDraft) -> Result<(), ValidationError> {
    Step::ALL
        .into_iter()
        .take_while(|earlier| *earlier < step)
        .try_for_each(|earlier| validate_step(earlier, draft))
}

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

fn missing<const N: usize>(checks: [(DraftField, bool); N]) -> MissingFields {
    checks
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect()
}

fn join(fields: &MissingFields) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
