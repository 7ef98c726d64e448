//! Walkers

use serde::{Deserialize, Serialize};

/// A dog walker offering bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walker {
    /// Walker identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Human-readable distance from the user (e.g. "1.2km")
    pub distance: String,

    /// Average rating out of five
    pub rating: f32,

    /// Number of reviews behind the rating
    pub review_count: u32,

    /// Experience blurb (e.g. "3 years")
    pub experience: String,

    /// Self introduction
    pub introduction: String,

    /// Profile image reference
    #[serde(default)]
    pub profile_image: String,

    /// Time slots the walker can take
    #[serde(default)]
    pub available_times: Vec<String>,

    /// Reviews left by owners
    #[serde(default)]
    pub reviews: Vec<WalkerReview>,
}

impl Walker {
    /// Whether the walker lists `time` among their available slots.
    pub fn is_available_at(&self, time: &str) -> bool {
        self.available_times.iter().any(|slot| slot == time)
    }
}

/// A review of a walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerReview {
    /// Review identifier
    pub id: String,

    /// Rating out of five
    pub rating: f32,

    /// Review text
    pub comment: String,

    /// Date the review was left
    pub date: String,

    /// Reviewer name
    pub author: String,
}


#[cfg(test)]
mod tests {
    use super::test_support::walker;

    #[test]
    fn availability_checks_listed_slots() {
        let walker = walker("w1");

        assert!(walker.is_available_at("10:00"));
        assert!(!walker.is_available_at("18:00"));
    }
}
