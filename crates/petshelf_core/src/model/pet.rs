//! Pet domain model and payload validation.
//!
//! # Responsibility
//! - Define the canonical `Pet` record and the `Gender` wire codes.
//! - Define `PetValues`, the presence-based mutation payload.
//! - Enforce per-field invariants for create and partial update.
//!
//! # Invariants
//! - `name` is never empty for a stored record.
//! - `gender` is always one of the three recognized codes.
//! - `weight` is never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Pet gender as stored in the catalog.
///
/// Wire representation is a small integer code; unrecognized codes are
/// rejected both on write and when found in persisted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    /// Parses a wire code (0=unknown, 1=male, 2=female).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }

    /// Returns the stable wire code for this gender.
    pub fn code(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Male => 1,
            Self::Female => 2,
        }
    }
}

/// Canonical stored pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Store-assigned rowid; unique and immutable once assigned.
    pub id: i64,
    pub name: String,
    /// Optional in spirit: any value including the empty string is valid.
    pub breed: String,
    pub gender: Gender,
    /// Kilograms; never negative.
    pub weight: i64,
}

/// Mutation payload with per-field presence.
///
/// A `None` field is *absent*: it is not validated and a partial update
/// leaves the stored column untouched. This mirrors key/value payload
/// semantics where callers only set the fields they mean to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetValues {
    pub name: Option<String>,
    pub breed: Option<String>,
    /// Raw wire code; validated against `Gender::from_code`.
    pub gender: Option<i64>,
    pub weight: Option<i64>,
}

impl PetValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender.code());
        self
    }

    /// Sets a raw gender code without going through `Gender`.
    ///
    /// Used by callers that forward untrusted wire input; validation
    /// rejects unrecognized codes before any store access.
    pub fn gender_code(mut self, code: i64) -> Self {
        self.gender = Some(code);
        self
    }

    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns whether no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.breed.is_none()
            && self.gender.is_none()
            && self.weight.is_none()
    }

    /// Validates this payload for record creation.
    ///
    /// Every required field must be present: non-empty `name`, `breed`
    /// (empty string permitted), a recognized `gender` code, and a
    /// strictly positive `weight`.
    pub fn validate_create(&self) -> Result<(), PetValidationError> {
        match self.name.as_deref() {
            None => return Err(PetValidationError::MissingName),
            Some(name) if name.trim().is_empty() => return Err(PetValidationError::EmptyName),
            Some(_) => {}
        }

        if self.breed.is_none() {
            return Err(PetValidationError::MissingBreed);
        }

        match self.gender {
            None => return Err(PetValidationError::MissingGender),
            Some(code) if Gender::from_code(code).is_none() => {
                return Err(PetValidationError::InvalidGender(code));
            }
            Some(_) => {}
        }

        match self.weight {
            None => return Err(PetValidationError::MissingWeight),
            Some(weight) if weight < 1 => {
                return Err(PetValidationError::NonPositiveWeight(weight));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Validates this payload for partial update.
    ///
    /// Validation is conditional on presence: absent fields are not
    /// checked. A present `name` must be non-empty, a present `gender`
    /// must be a recognized code, and a present `weight` must be >= 0.
    /// Any `breed` value is valid.
    pub fn validate_update(&self) -> Result<(), PetValidationError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(PetValidationError::EmptyName);
            }
        }

        if let Some(code) = self.gender {
            if Gender::from_code(code).is_none() {
                return Err(PetValidationError::InvalidGender(code));
            }
        }

        if let Some(weight) = self.weight {
            if weight < 0 {
                return Err(PetValidationError::NegativeWeight(weight));
            }
        }

        Ok(())
    }
}

/// Per-field payload validation failure.
///
/// Reported to callers as a user-visible message; the triggering write
/// never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetValidationError {
    MissingName,
    EmptyName,
    MissingBreed,
    MissingGender,
    InvalidGender(i64),
    MissingWeight,
    NonPositiveWeight(i64),
    NegativeWeight(i64),
}

impl PetValidationError {
    /// Returns the payload field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName | Self::EmptyName => "name",
            Self::MissingBreed => "breed",
            Self::MissingGender | Self::InvalidGender(_) => "gender",
            Self::MissingWeight | Self::NonPositiveWeight(_) | Self::NegativeWeight(_) => "weight",
        }
    }
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "pet requires a name"),
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::MissingBreed => write!(f, "pet requires a breed"),
            Self::MissingGender => write!(f, "pet requires a gender"),
            Self::InvalidGender(code) => write!(f, "pet requires a valid gender, got code {code}"),
            Self::MissingWeight => write!(f, "pet requires a weight"),
            Self::NonPositiveWeight(weight) => {
                write!(f, "pet requires a weight of at least 1, got {weight}")
            }
            Self::NegativeWeight(weight) => {
                write!(f, "pet weight must not be negative, got {weight}")
            }
        }
    }
}

impl Error for PetValidationError {}

#[cfg(test)]
mod tests {
    use super::{Gender, PetValidationError, PetValues};

    fn valid_create() -> PetValues {
        PetValues::new()
            .name("Toto")
            .breed("Terrier")
            .gender(Gender::Male)
            .weight(7)
    }

    #[test]
    fn gender_codes_round_trip() {
        for gender in [Gender::Unknown, Gender::Male, Gender::Female] {
            assert_eq!(Gender::from_code(gender.code()), Some(gender));
        }
        assert_eq!(Gender::from_code(3), None);
        assert_eq!(Gender::from_code(-1), None);
    }

    #[test]
    fn create_accepts_complete_payload() {
        assert_eq!(valid_create().validate_create(), Ok(()));
    }

    #[test]
    fn create_accepts_empty_breed() {
        let values = valid_create().breed("");
        assert_eq!(values.validate_create(), Ok(()));
    }

    #[test]
    fn create_rejects_missing_or_empty_name() {
        let mut values = valid_create();
        values.name = None;
        assert_eq!(
            values.validate_create(),
            Err(PetValidationError::MissingName)
        );

        let blank = valid_create().name("   ");
        assert_eq!(blank.validate_create(), Err(PetValidationError::EmptyName));
    }

    #[test]
    fn create_rejects_unrecognized_gender_code() {
        let values = valid_create().gender_code(9);
        assert_eq!(
            values.validate_create(),
            Err(PetValidationError::InvalidGender(9))
        );
    }

    #[test]
    fn create_rejects_weight_below_one() {
        let values = valid_create().weight(0);
        assert_eq!(
            values.validate_create(),
            Err(PetValidationError::NonPositiveWeight(0))
        );
    }

    #[test]
    fn update_skips_absent_fields() {
        assert_eq!(PetValues::new().validate_update(), Ok(()));
        assert_eq!(PetValues::new().weight(0).validate_update(), Ok(()));
    }

    #[test]
    fn update_rejects_present_invalid_fields() {
        assert_eq!(
            PetValues::new().name("").validate_update(),
            Err(PetValidationError::EmptyName)
        );
        assert_eq!(
            PetValues::new().gender_code(7).validate_update(),
            Err(PetValidationError::InvalidGender(7))
        );
        assert_eq!(
            PetValues::new().weight(-3).validate_update(),
            Err(PetValidationError::NegativeWeight(-3))
        );
    }

    #[test]
    fn validation_error_names_offending_field() {
        assert_eq!(PetValidationError::MissingName.field(), "name");
        assert_eq!(PetValidationError::InvalidGender(9).field(), "gender");
        assert_eq!(PetValidationError::NegativeWeight(-1).field(), "weight");
    }
}
