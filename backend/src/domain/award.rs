//! Award inventory entity and its mutation payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::RecordStatus;

/// A persisted award inventory record.
///
/// `id` and both timestamps are store-assigned. `created_at` is immutable
/// after creation; `updated_at` is refreshed by the store on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    /// Store-assigned identifier.
    pub id: i32,
    /// Display name, never empty.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Fulfilment status.
    pub status: RecordStatus,
    /// Units on hand or on order, never negative.
    pub quantity: i32,
    /// Optional URL of an uploaded product image.
    pub image_url: Option<String>,
    /// Creation instant, immutable.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent mutation.
    pub updated_at: DateTime<Utc>,
}

/// Validation errors raised when constructing award payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardValidationError {
    EmptyName,
    NegativeQuantity,
}

impl fmt::Display for AwardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "award name must not be empty"),
            Self::NegativeQuantity => write!(f, "award quantity must not be negative"),
        }
    }
}

impl std::error::Error for AwardValidationError {}

/// Validated payload for creating an award.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAward {
    name: String,
    description: Option<String>,
    status: RecordStatus,
    quantity: i32,
    image_url: Option<String>,
}

impl NewAward {
    /// Validate and construct a creation payload.
    ///
    /// The name must be non-empty once trimmed. Status defaults to
    /// [`RecordStatus::Planned`] and quantity to zero when not supplied.
    ///
    /// # Examples
    /// ```
    /// use heliix::domain::NewAward;
    ///
    /// let award = NewAward::try_new("MVP Trophy", None, None, Some(10), None)
    ///     .expect("valid payload");
    /// assert_eq!(award.quantity(), 10);
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        description: Option<String>,
        status: Option<RecordStatus>,
        quantity: Option<i32>,
        image_url: Option<String>,
    ) -> Result<Self, AwardValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AwardValidationError::EmptyName);
        }
        let quantity = quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AwardValidationError::NegativeQuantity);
        }
        Ok(Self {
            name,
            description,
            status: status.unwrap_or_default(),
            quantity,
            image_url,
        })
    }

    /// Award name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Initial status.
    pub fn status(&self) -> RecordStatus {
        self.status
    }

    /// Initial quantity.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Optional image URL.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Validated partial update for an award.
///
/// Only the populated fields are written; identifier and `created_at` can
/// never be touched. An all-`None` patch is rejected by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwardPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<RecordStatus>,
    /// Replacement quantity.
    pub quantity: Option<i32>,
    /// Replacement image URL; `Some(None)` clears it.
    pub image_url: Option<Option<String>>,
}

impl AwardPatch {
    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.quantity.is_none()
            && self.image_url.is_none()
    }

    /// Validate field-level invariants shared with creation.
    pub fn validate(&self) -> Result<(), AwardValidationError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(AwardValidationError::EmptyName);
        }
        if let Some(quantity) = self.quantity
            && quantity < 0
        {
            return Err(AwardValidationError::NegativeQuantity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_award_defaults_status_and_quantity() {
        let award = NewAward::try_new("MVP Trophy", None, None, None, None).expect("valid");
        assert_eq!(award.status(), RecordStatus::Planned);
        assert_eq!(award.quantity(), 0);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn new_award_rejects_blank_name(#[case] name: &str) {
        let err = NewAward::try_new(name, None, None, None, None).expect_err("blank name");
        assert_eq!(err, AwardValidationError::EmptyName);
    }

    #[rstest]
    fn new_award_rejects_negative_quantity() {
        let err = NewAward::try_new("Trophy", None, None, Some(-1), None)
            .expect_err("negative quantity");
        assert_eq!(err, AwardValidationError::NegativeQuantity);
    }

    #[rstest]
    fn patch_emptiness_reflects_fields() {
        assert!(AwardPatch::default().is_empty());

        let patch = AwardPatch {
            status: Some(RecordStatus::Delivered),
            ..AwardPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[rstest]
    fn patch_validation_mirrors_creation_rules() {
        let blank_name = AwardPatch {
            name: Some(" ".to_owned()),
            ..AwardPatch::default()
        };
        assert_eq!(
            blank_name.validate().expect_err("blank name"),
            AwardValidationError::EmptyName
        );

        let negative = AwardPatch {
            quantity: Some(-5),
            ..AwardPatch::default()
        };
        assert_eq!(
            negative.validate().expect_err("negative quantity"),
            AwardValidationError::NegativeQuantity
        );
    }
}
