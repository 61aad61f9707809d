//! Volunteer data model.
//!
//! A [`Volunteer`] is the persisted record; [`NewVolunteer`] is a validated
//! registration that has not yet been given an identity by the store.
//! The phone number is the deduplication key: at most one record may exist
//! per [`PhoneNumber`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum accepted length for a volunteer name.
pub const NAME_MAX: usize = 100;
/// Maximum accepted length for a phone number.
pub const PHONE_MAX: usize = 20;
/// Maximum accepted length for a ward.
pub const WARD_MAX: usize = 100;
/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum accepted length for the interest free text.
pub const INTEREST_MAX: usize = 255;

/// Validation errors raised while building volunteer values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VolunteerValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("phone must not be empty")]
    EmptyPhone,
    #[error("phone may only contain digits, spaces, '+', or '-'")]
    InvalidPhone,
    #[error("phone must be at most {max} characters")]
    PhoneTooLong { max: usize },
    #[error("ward must not be empty")]
    EmptyWard,
    #[error("ward must be at most {max} characters")]
    WardTooLong { max: usize },
    #[error("email must look like local@domain")]
    InvalidEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("interest must be at most {max} characters")]
    InterestTooLong { max: usize },
    #[error("unknown volunteer status: {value}")]
    UnknownStatus { value: String },
}

impl VolunteerValidationError {
    /// Request field the error refers to, in the camelCase wire form.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyPhone | Self::InvalidPhone | Self::PhoneTooLong { .. } => "phone",
            Self::EmptyWard | Self::WardTooLong { .. } => "ward",
            Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::InterestTooLong { .. } => "interest",
            Self::UnknownStatus { .. } => "status",
        }
    }

    /// Machine-readable rejection code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::EmptyPhone | Self::EmptyWard => "empty",
            Self::NameTooLong { .. }
            | Self::PhoneTooLong { .. }
            | Self::WardTooLong { .. }
            | Self::EmailTooLong { .. }
            | Self::InterestTooLong { .. } => "too_long",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidEmail => "invalid_email",
            Self::UnknownStatus { .. } => "unknown_status",
        }
    }
}

/// Store-assigned volunteer identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct VolunteerId(i64);

impl VolunteerId {
    /// Wrap a raw identifier issued by the store.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participation status of a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolunteerStatus {
    /// Registered and available. Every registration starts here.
    #[default]
    Active,
    /// Temporarily not participating.
    Inactive,
    /// Barred by an administrator.
    Suspended,
}

impl VolunteerStatus {
    /// Canonical upper-case representation used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolunteerStatus {
    type Err = VolunteerValidationError;

    /// Parse a status, ignoring ASCII case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(VolunteerValidationError::UnknownStatus {
                value: value.to_owned(),
            }),
        }
    }
}

/// Phone number used as the registration deduplication key.
///
/// Surrounding whitespace is trimmed; the remaining text must be non-empty
/// and consist of digits, spaces, `+`, or `-`, with at least one digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "0711000111")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VolunteerValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(VolunteerValidationError::EmptyPhone);
        }
        if trimmed.chars().count() > PHONE_MAX {
            return Err(VolunteerValidationError::PhoneTooLong { max: PHONE_MAX });
        }
        let allowed = trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-'));
        if !allowed || !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Err(VolunteerValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the phone number text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = VolunteerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Free-text locality used for filtering and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Kibra")]
pub struct Ward(String);

impl Ward {
    /// Validate and construct a ward.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VolunteerValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(VolunteerValidationError::EmptyWard);
        }
        if trimmed.chars().count() > WARD_MAX {
            return Err(VolunteerValidationError::WardTooLong { max: WARD_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the ward text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ward {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ward {
    type Error = VolunteerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ward> for String {
    fn from(value: Ward) -> Self {
        value.0
    }
}

fn validate_name(raw: &str) -> Result<String, VolunteerValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VolunteerValidationError::EmptyName);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(VolunteerValidationError::NameTooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}

/// Blank optional text collapses to `None`.
fn normalise_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn validate_email(raw: Option<&str>) -> Result<Option<String>, VolunteerValidationError> {
    let Some(email) = normalise_optional(raw) else {
        return Ok(None);
    };
    if email.chars().count() > EMAIL_MAX {
        return Err(VolunteerValidationError::EmailTooLong { max: EMAIL_MAX });
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(Some(email))
        }
        _ => Err(VolunteerValidationError::InvalidEmail),
    }
}

fn validate_interest(raw: Option<&str>) -> Result<Option<String>, VolunteerValidationError> {
    let interest = normalise_optional(raw);
    if interest
        .as_deref()
        .is_some_and(|value| value.chars().count() > INTEREST_MAX)
    {
        return Err(VolunteerValidationError::InterestTooLong { max: INTEREST_MAX });
    }
    Ok(interest)
}

/// Raw registration fields as presented by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub ward: &'a str,
    pub interest: Option<&'a str>,
}

/// A validated registration that has not been persisted yet.
///
/// Carries no status: registration always starts
/// [`VolunteerStatus::Active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVolunteer {
    name: String,
    phone: PhoneNumber,
    email: Option<String>,
    ward: Ward,
    interest: Option<String>,
}

impl NewVolunteer {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use volunteer_service::domain::{NewVolunteer, RegistrationDraft};
    ///
    /// let volunteer = NewVolunteer::try_from_draft(RegistrationDraft {
    ///     name: " Jane ",
    ///     phone: "0711000111",
    ///     email: Some(""),
    ///     ward: "Kibra",
    ///     interest: Some("Health"),
    /// })
    /// .expect("valid registration");
    /// assert_eq!(volunteer.name(), "Jane");
    /// assert!(volunteer.email().is_none());
    /// ```
    pub fn try_from_draft(draft: RegistrationDraft<'_>) -> Result<Self, VolunteerValidationError> {
        Ok(Self {
            name: validate_name(draft.name)?,
            phone: PhoneNumber::new(draft.phone)?,
            email: validate_email(draft.email)?,
            ward: Ward::new(draft.ward)?,
            interest: validate_interest(draft.interest)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn ward(&self) -> &Ward {
        &self.ward
    }

    pub fn interest(&self) -> Option<&str> {
        self.interest.as_deref()
    }
}

/// Persisted volunteer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: VolunteerId,
    #[schema(example = "Jane")]
    pub name: String,
    pub phone: PhoneNumber,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    pub ward: Ward,
    #[schema(example = "Health")]
    pub interest: Option<String>,
    pub status: VolunteerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Volunteer {
    /// Apply a validated profile update, copying only the fields present.
    pub fn apply_profile(&mut self, update: &VolunteerProfileUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &update.email {
            self.email.clone_from(email);
        }
        if let Some(ward) = &update.ward {
            self.ward = ward.clone();
        }
        if let Some(interest) = &update.interest {
            self.interest.clone_from(interest);
        }
    }
}

/// Raw profile fields as presented by a caller; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub ward: Option<&'a str>,
    pub interest: Option<&'a str>,
}

/// Validated profile changes.
///
/// The phone number is not part of the profile: it is fixed at
/// registration. Supplying a blank email or interest clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerProfileUpdate {
    name: Option<String>,
    email: Option<Option<String>>,
    ward: Option<Ward>,
    interest: Option<Option<String>>,
}

impl VolunteerProfileUpdate {
    /// Validate raw profile fields.
    pub fn try_from_draft(draft: ProfileDraft<'_>) -> Result<Self, VolunteerValidationError> {
        Ok(Self {
            name: draft.name.map(validate_name).transpose()?,
            email: draft
                .email
                .map(|email| validate_email(Some(email)))
                .transpose()?,
            ward: draft.ward.map(Ward::new).transpose()?,
            interest: draft
                .interest
                .map(|interest| validate_interest(Some(interest)))
                .transpose()?,
        })
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.ward.is_none() && self.interest.is_none()
    }
}

#[cfg(test)]
mod tests;
