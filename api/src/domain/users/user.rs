use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteOfAdministration {
    #[default]
    Other,
    Oral,
    Buccal,
    Rectal,
    Inhaled,
    Sublabial,
    Intranasal,
    Sublingual,
    OtherInjection,
    BuccalInjection,
    IntravenousInjection,
    SubcutaneousInjection,
    IntramuscularInjection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DosageUnit {
    #[default]
    Unknown,
    Micrograms,
    Milligrams,
    Grams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    #[default]
    Unknown,
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<f64>,
    #[serde(default)]
    pub unit: DosageUnit,
    #[serde(default)]
    pub route: RouteOfAdministration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserMedication {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPreferences {
    /// IANA zone name.
    pub timezone: String,
    pub height_format: DisplayUnit,
    pub weight_format: DisplayUnit,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            timezone: "Europe/London".to_string(),
            height_format: DisplayUnit::Metric,
            weight_format: DisplayUnit::Metric,
        }
    }
}

/// Profile data, sharing its id with the owning account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub birth: Option<NaiveDate>,
    /// Centimeters.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub medication: UserMedication,
    pub preferences: UserPreferences,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub display_name: Option<String>,
    pub birth: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub medication: UserMedication,
    pub preferences: UserPreferences,
}

/// `None` leaves a field untouched; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub display_name: Option<Option<String>>,
    pub birth: Option<Option<NaiveDate>>,
    pub height: Option<Option<f64>>,
    pub weight: Option<Option<f64>>,
    pub medication: Option<UserMedication>,
    pub preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("display name must be between 1 and {0} characters")]
    DisplayNameLength(usize),
    #[error("height must be a positive number")]
    Height,
    #[error("weight must be a positive number")]
    Weight,
    #[error("birth date cannot be in the future")]
    Birth,
    #[error("medication name is required")]
    MedicationName,
    #[error("medication dosage must not be negative")]
    MedicationDosage,
}

impl UserProfile {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ProfileError> {
        if let Some(name) = &self.display_name {
            let len = name.trim().chars().count();
            if len == 0 || len > MAX_DISPLAY_NAME_LENGTH {
                return Err(ProfileError::DisplayNameLength(MAX_DISPLAY_NAME_LENGTH));
            }
        }
        if self.height.is_some_and(|h| !(h.is_finite() && h > 0.0)) {
            return Err(ProfileError::Height);
        }
        if self.weight.is_some_and(|w| !(w.is_finite() && w > 0.0)) {
            return Err(ProfileError::Weight);
        }
        if self.birth.is_some_and(|b| b > today) {
            return Err(ProfileError::Birth);
        }
        for med in &self.medication.medications {
            if med.name.trim().is_empty() {
                return Err(ProfileError::MedicationName);
            }
            if med.dosage.is_some_and(|d| !(d.is_finite() && d >= 0.0)) {
                return Err(ProfileError::MedicationDosage);
            }
        }
        Ok(())
    }
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            display_name: self.display_name.clone(),
            birth: self.birth,
            height: self.height,
            weight: self.weight,
            medication: self.medication.clone(),
            preferences: self.preferences.clone(),
        }
    }

    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(v) = changes.display_name {
            self.display_name = v;
        }
        if let Some(v) = changes.birth {
            self.birth = v;
        }
        if let Some(v) = changes.height {
            self.height = v;
        }
        if let Some(v) = changes.weight {
            self.weight = v;
        }
        if let Some(v) = changes.medication {
            self.medication = v;
        }
        if let Some(v) = changes.preferences {
            self.preferences = v;
        }
    }
}
