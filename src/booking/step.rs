//! Booking steps

use std::fmt;

/// A step of the booking wizard, in the order the user walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    /// Walk type, duration, date, time and address
    #[default]
    BasicInfo = 1,

    /// Choose a walker
    WalkerSelection = 2,

    /// Pet details, cautions, contacts and notifications
    WalkSettings = 3,

    /// Payment method and insurance agreement
    Payment = 4,

    /// Review and finish
    Confirmation = 5,
}

impl Step {
    /// Every step in order.
    pub const ALL: [Step; 5] = [
        Step::BasicInfo,
        Step::WalkerSelection,
        Step::WalkSettings,
        Step::Payment,
        Step::Confirmation,
    ];

    /// One-based position of the step.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The step after this one, if any.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::BasicInfo => Some(Step::WalkerSelection),
            Step::WalkerSelection => Some(Step::WalkSettings),
            Step::WalkSettings => Some(Step::Payment),
            Step::Payment => Some(Step::Confirmation),
            Step::Confirmation => None,
        }
    }

    /// The step before this one, if any.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::BasicInfo => None,
            Step::WalkerSelection => Some(Step::BasicInfo),
            Step::WalkSettings => Some(Step::WalkerSelection),
            Step::Payment => Some(Step::WalkSettings),
            Step::Confirmation => Some(Step::Payment),
        }
    }

    /// Short label for progress indicators.
    pub fn label(self) -> &'static str {
        match self {
            Step::BasicInfo => "basic info",
            Step::WalkerSelection => "walker selection",
            Step::WalkSettings => "walk settings",
            Step::Payment => "payment",
            Step::Confirmation => "confirmation",
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = u8;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Step::ALL
            .into_iter()
            .find(|step| step.ordinal() == ordinal)
            .ok_or(ordinal)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ordinal(), self.label())
    }
}
