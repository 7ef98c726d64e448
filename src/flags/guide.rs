//! Service guide

use tracing::{debug, warn};

use crate::{
    booking::PetInfo,
    flags::{FlagStore, FlagStoreError, INTRO_SEEN_KEY, PET_INFO_KEY},
};

/// What the home screen should do after regaining focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeOutcome {
    /// The user has never dismissed the service introduction
    pub first_time: bool,

    /// A pet with name and breed has been saved
    pub has_pet_info: bool,

    /// Show the first-run guide now
    pub show_guide: bool,
}

/// Decides when to show first-run help.
///
/// The introduction flag is read once, on the first resume. Later resumes only
/// refresh whether pet details exist, so the guide is offered at most once per
/// session.
#[derive(Debug, Default)]
pub struct ServiceGuide {
    first_time: Option<bool>,
}

impl ServiceGuide {
    /// A guide that has not checked storage yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the first check has run, and what it found.
    pub fn first_time(&self) -> Option<bool> {
        self.first_time
    }

    /// Refresh flags after the home screen gains focus.
    ///
    /// Storage failures are logged and treated as a first-time user with no
    /// saved pet.
    pub async fn on_resume(&mut self, store: &dyn FlagStore) -> ResumeOutcome {
        let checked = self.first_time;

        let first_time = match checked {
            Some(first_time) => first_time,
            None => {
                let first_time = check_first_time(store).await;
                self.first_time = Some(first_time);
                first_time
            }
        };

        let has_pet_info = check_pet_info(store).await;
        let show_guide = checked.is_none() && first_time && !has_pet_info;

        debug!(first_time, has_pet_info, show_guide, "checked service guide flags");

        ResumeOutcome {
            first_time,
            has_pet_info,
            show_guide,
        }
    }

    /// The user finished or dismissed the guide.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be persisted. The guide still counts
    /// as seen for this session.
    pub async fn complete(&mut self, store: &dyn FlagStore) -> Result<(), FlagStoreError> {
        self.first_time = Some(false);

        mark_intro_seen(store).await
    }
}

/// Persist that the service introduction was seen.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub async fn mark_intro_seen(store: &dyn FlagStore) -> Result<(), FlagStoreError> {
    store.set(INTRO_SEEN_KEY, "true").await
}

/// Save pet details for the next session.
///
/// # Errors
///
/// Returns an error if the details cannot be encoded or the store rejects the write.
pub async fn save_pet_info(store: &dyn FlagStore, pet: &PetInfo) -> Result<(), FlagStoreError> {
    let encoded = serde_json::to_string(pet)?;

    store.set(PET_INFO_KEY, &encoded).await
}

async fn check_first_time(store: &dyn FlagStore) -> bool {
    match store.get(INTRO_SEEN_KEY).await {
        Ok(seen) => seen.is_none_or(|value| value.is_empty()),
        Err(err) => {
            warn!(error = %err, "failed to read intro flag");
            true
        }
    }
}

async fn check_pet_info(store: &dyn FlagStore) -> bool {
    let saved = match store.get(PET_INFO_KEY).await {
        Ok(Some(saved)) => saved,
        Ok(None) => return false,
        Err(err) => {
            warn!(error = %err, "failed to read pet info");
            return false;
        }
    };

    match serde_json::from_str::<PetInfo>(&saved) {
        Ok(pet) => pet.has_essentials(),
        Err(err) => {
            warn!(error = %err, "saved pet info is not valid JSON");
            false
        }
    }
}
