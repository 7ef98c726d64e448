//! Payment choices shared by bookings and shop checkout.
//!
//! Payment itself is simulated: nothing here talks to a payment provider. The
//! host asks the user to confirm and passes the answer in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the user pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,

    /// Kakao Pay
    Kakao,

    /// Naver Pay
    Naver,

    /// Toss
    Toss,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Kakao => "kakao",
            PaymentMethod::Naver => "naver",
            PaymentMethod::Toss => "toss",
        };

        f.write_str(name)
    }
}

/// The user's answer to a "pay now?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentDecision {
    /// Go ahead with the (simulated) charge.
    Confirm,

    /// Back out and stay where we are.
    Cancel,
}
