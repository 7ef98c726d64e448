//! Booking draft

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{payment::PaymentMethod, pricing::Pricing, walkers::Walker};

/// Kind of walk being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkType {
    /// A one-off walk
    Single,

    /// A bundle of recurring walks
    Package,
}

impl fmt::Display for WalkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkType::Single => f.write_str("single"),
            WalkType::Package => f.write_str("package"),
        }
    }
}

/// Details about the pet being walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetInfo {
    /// Pet name
    pub name: String,

    /// Breed
    pub breed: String,

    /// Age, as the owner wrote it
    pub age: String,

    /// Weight, as the owner wrote it
    pub weight: String,

    /// Temperament notes
    pub temperament: String,

    /// Medical notes for the walker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_info: Option<String>,
}

impl PetInfo {
    /// Name and breed are the details a walker cannot do without.
    pub fn has_essentials(&self) -> bool {
        !self.name.trim().is_empty() && !self.breed.trim().is_empty()
    }
}

/// Which walk updates the owner wants to be told about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Walker has set off
    pub departure: bool,

    /// Walker is running late
    pub delay: bool,

    /// Walk has finished
    pub completion: bool,
}

/// A booking being filled in, one step at a time.
///
/// Fields stay `None` until the step that fills them has been updated.
/// `pricing` is derived by the workflow and cannot be patched directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    /// Single walk or package
    pub walk_type: Option<WalkType>,

    /// Walk length in minutes
    pub duration_minutes: Option<u32>,

    /// Calendar date token
    pub date: Option<String>,

    /// Clock time token
    pub time: Option<String>,

    /// Pick-up address
    pub address: Option<String>,

    /// Chosen walker
    pub selected_walker: Option<Walker>,

    /// Pet details
    pub pet_info: Option<PetInfo>,

    /// Preset caution notes picked by the owner
    pub caution_templates: Option<BTreeSet<String>>,

    /// Free-form notes for the walker
    pub custom_notes: Option<String>,

    /// Who to call if something goes wrong
    pub emergency_contact: Option<String>,

    /// Walk update preferences
    pub notifications: Option<NotificationSettings>,

    /// How the owner pays
    pub payment_method: Option<PaymentMethod>,

    /// Whether the owner accepted the insurance terms
    pub insurance_agreed: Option<bool>,

    /// Derived price breakdown
    pub pricing: Option<Pricing>,
}

/// A partial update to a [`BookingDraft`].
///
/// Every `Some` field overwrites the draft's value; `None` fields leave it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPatch {
    /// Single walk or package
    pub walk_type: Option<WalkType>,

    /// Walk length in minutes
    pub duration_minutes: Option<u32>,

    /// Calendar date token
    pub date: Option<String>,

    /// Clock time token
    pub time: Option<String>,

    /// Pick-up address
    pub address: Option<String>,

    /// Chosen walker
    pub selected_walker: Option<Walker>,

    /// Pet details
    pub pet_info: Option<PetInfo>,

    /// Preset caution notes picked by the owner
    pub caution_templates: Option<BTreeSet<String>>,

    /// Free-form notes for the walker
    pub custom_notes: Option<String>,

    /// Who to call if something goes wrong
    pub emergency_contact: Option<String>,

    /// Walk update preferences
    pub notifications: Option<NotificationSettings>,

    /// How the owner pays
    pub payment_method: Option<PaymentMethod>,

    /// Whether the owner accepted the insurance terms
    pub insurance_agreed: Option<bool>,
}

impl DraftPatch {
    /// Patch setting the date and time.
    pub fn date_time(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
            ..Self::default()
        }
    }

    /// Patch selecting a walker.
    pub fn walker(walker: Walker) -> Self {
        Self {
            selected_walker: Some(walker),
            ..Self::default()
        }
    }

    /// Patch setting the pet details.
    pub fn pet(pet_info: PetInfo) -> Self {
        Self {
            pet_info: Some(pet_info),
            ..Self::default()
        }
    }

    /// Patch recording the insurance answer.
    pub fn insurance(agreed: bool) -> Self {
        Self {
            insurance_agreed: Some(agreed),
            ..Self::default()
        }
    }

    /// Whether the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl BookingDraft {
    /// Merge `patch` into the draft, last write wins per field.
    pub fn merge(&mut self, patch: DraftPatch) {
        let DraftPatch {
            walk_type,
            duration_minutes,
            date,
            time,
            address,
            selected_walker,
            pet_info,
            caution_templates,
            custom_notes,
            emergency_contact,
            notifications,
            payment_method,
            insurance_agreed,
        } = patch;

        overwrite(&mut self.walk_type, walk_type);
        overwrite(&mut self.duration_minutes, duration_minutes);
        overwrite(&mut self.date, date);
        overwrite(&mut self.time, time);
        overwrite(&mut self.address, address);
        overwrite(&mut self.selected_walker, selected_walker);
        overwrite(&mut self.pet_info, pet_info);
        overwrite(&mut self.caution_templates, caution_templates);
        overwrite(&mut self.custom_notes, custom_notes);
        overwrite(&mut self.emergency_contact, emergency_contact);
        overwrite(&mut self.notifications, notifications);
        overwrite(&mut self.payment_method, payment_method);
        overwrite(&mut self.insurance_agreed, insurance_agreed);
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use crate::walkers::test_support::walker;

    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut draft = BookingDraft::default();

        draft.merge(DraftPatch::date_time("2024-05-01", "10:00"));
        draft.merge(DraftPatch {
            time: Some("11:00".to_string()),
            address: Some("Mapo-gu".to_string()),
            ..DraftPatch::default()
        });

        assert_eq!(draft.date.as_deref(), Some("2024-05-01"));
        assert_eq!(draft.time.as_deref(), Some("11:00"));
        assert_eq!(draft.address.as_deref(), Some("Mapo-gu"));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut draft = BookingDraft::default();
        draft.merge(DraftPatch::walker(walker("w1")));
        let before = draft.clone();

        draft.merge(DraftPatch::default());

        assert_eq!(draft, before);
        assert!(DraftPatch::default().is_empty());
    }

    #[test]
    fn pet_essentials_need_name_and_breed() {
        let mut pet = PetInfo {
            name: "Rex".to_string(),
            ..PetInfo::default()
        };

        assert!(!pet.has_essentials());

        pet.breed = "Beagle".to_string();

        assert!(pet.has_essentials());

        pet.name = "  ".to_string();

        assert!(!pet.has_essentials());
    }

    #[test]
    fn pet_info_reads_camel_case_json() -> Result<(), serde_json::Error> {
        let pet: PetInfo = serde_json::from_str(
            r#"{"name":"Rex","breed":"Beagle","age":"2","weight":"10","medicalInfo":"allergic to chicken"}"#,
        )?;

        assert_eq!(pet.medical_info.as_deref(), Some("allergic to chicken"));
        assert_eq!(pet.temperament, "");

        Ok(())
    }
}
