//! Validation coverage for volunteer values.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

fn base_draft() -> RegistrationDraft<'static> {
    RegistrationDraft {
        name: "Jane",
        phone: "0711000111",
        email: Some("jane@example.com"),
        ward: "Kibra",
        interest: Some("Health"),
    }
}

#[fixture]
fn draft() -> RegistrationDraft<'static> {
    base_draft()
}

fn persisted() -> Volunteer {
    let at = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    Volunteer {
        id: VolunteerId::new(7),
        name: "Jane".to_owned(),
        phone: PhoneNumber::new("0711000111").expect("valid phone"),
        email: Some("jane@example.com".to_owned()),
        ward: Ward::new("Kibra").expect("valid ward"),
        interest: Some("Health".to_owned()),
        status: VolunteerStatus::Active,
        created_at: at,
        updated_at: at,
    }
}

#[rstest]
fn valid_draft_is_accepted(draft: RegistrationDraft<'static>) {
    let volunteer = NewVolunteer::try_from_draft(draft).expect("valid draft");
    assert_eq!(volunteer.name(), "Jane");
    assert_eq!(volunteer.phone().as_str(), "0711000111");
    assert_eq!(volunteer.email(), Some("jane@example.com"));
    assert_eq!(volunteer.ward().as_str(), "Kibra");
    assert_eq!(volunteer.interest(), Some("Health"));
}

#[rstest]
fn surrounding_whitespace_is_trimmed(mut draft: RegistrationDraft<'static>) {
    draft.name = "  Jane  ";
    draft.phone = " 0711000111 ";
    draft.ward = "\tKibra ";
    let volunteer = NewVolunteer::try_from_draft(draft).expect("valid draft");
    assert_eq!(volunteer.name(), "Jane");
    assert_eq!(volunteer.phone().as_str(), "0711000111");
    assert_eq!(volunteer.ward().as_str(), "Kibra");
}

#[rstest]
#[case(Some(""), None)]
#[case(Some("   "), None)]
#[case(None, None)]
fn blank_optional_fields_become_none(
    mut draft: RegistrationDraft<'static>,
    #[case] raw: Option<&'static str>,
    #[case] expected: Option<&str>,
) {
    draft.email = raw;
    draft.interest = raw;
    let volunteer = NewVolunteer::try_from_draft(draft).expect("valid draft");
    assert_eq!(volunteer.email(), expected);
    assert_eq!(volunteer.interest(), expected);
}

#[rstest]
#[case::empty_name(RegistrationDraft { name: " ", ..base_draft() }, VolunteerValidationError::EmptyName)]
#[case::empty_phone(RegistrationDraft { phone: "", ..base_draft() }, VolunteerValidationError::EmptyPhone)]
#[case::letters_in_phone(RegistrationDraft { phone: "07ab", ..base_draft() }, VolunteerValidationError::InvalidPhone)]
#[case::phone_without_digits(RegistrationDraft { phone: "+ -", ..base_draft() }, VolunteerValidationError::InvalidPhone)]
#[case::long_phone(
    RegistrationDraft { phone: "012345678901234567890", ..base_draft() },
    VolunteerValidationError::PhoneTooLong { max: PHONE_MAX }
)]
#[case::empty_ward(RegistrationDraft { ward: "  ", ..base_draft() }, VolunteerValidationError::EmptyWard)]
#[case::email_without_at(RegistrationDraft { email: Some("jane"), ..base_draft() }, VolunteerValidationError::InvalidEmail)]
#[case::email_without_domain(RegistrationDraft { email: Some("jane@"), ..base_draft() }, VolunteerValidationError::InvalidEmail)]
#[case::email_with_two_ats(RegistrationDraft { email: Some("a@b@c"), ..base_draft() }, VolunteerValidationError::InvalidEmail)]
fn invalid_drafts_are_rejected(
    #[case] draft: RegistrationDraft<'static>,
    #[case] expected: VolunteerValidationError,
) {
    assert_eq!(NewVolunteer::try_from_draft(draft), Err(expected));
}

#[rstest]
fn long_name_is_rejected() {
    let name = "x".repeat(NAME_MAX + 1);
    let draft = RegistrationDraft {
        name: &name,
        ..base_draft()
    };
    assert_eq!(
        NewVolunteer::try_from_draft(draft),
        Err(VolunteerValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
#[case("+254 711-000-111")]
#[case("0711000111")]
fn phone_accepts_international_formatting(#[case] raw: &str) {
    assert!(PhoneNumber::new(raw).is_ok());
}

#[rstest]
#[case("ACTIVE", VolunteerStatus::Active)]
#[case("inactive", VolunteerStatus::Inactive)]
#[case(" Suspended ", VolunteerStatus::Suspended)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: VolunteerStatus) {
    assert_eq!(raw.parse::<VolunteerStatus>(), Ok(expected));
}

#[rstest]
fn unknown_status_is_rejected() {
    let err = "RETIRED"
        .parse::<VolunteerStatus>()
        .expect_err("unknown status");
    assert_eq!(err.field(), "status");
    assert_eq!(err.code(), "unknown_status");
}

#[rstest]
fn status_serialises_upper_case() {
    let value = serde_json::to_value(VolunteerStatus::Suspended).expect("serialise status");
    assert_eq!(value, serde_json::json!("SUSPENDED"));
}

#[rstest]
fn volunteer_serialises_camel_case() {
    let value = serde_json::to_value(persisted()).expect("serialise volunteer");
    assert_eq!(value["id"], serde_json::json!(7));
    assert_eq!(value["phone"], serde_json::json!("0711000111"));
    assert_eq!(value["status"], serde_json::json!("ACTIVE"));
    assert!(value.get("createdAt").is_some());
    assert!(value.get("updatedAt").is_some());
}

#[rstest]
fn profile_update_copies_present_fields_only() {
    let mut volunteer = persisted();
    let update = VolunteerProfileUpdate::try_from_draft(ProfileDraft {
        ward: Some("Langata"),
        interest: Some(""),
        ..ProfileDraft::default()
    })
    .expect("valid update");

    volunteer.apply_profile(&update);

    assert_eq!(volunteer.name, "Jane");
    assert_eq!(volunteer.email.as_deref(), Some("jane@example.com"));
    assert_eq!(volunteer.ward.as_str(), "Langata");
    assert!(volunteer.interest.is_none());
    assert_eq!(volunteer.phone.as_str(), "0711000111");
}

#[rstest]
fn profile_update_rejects_blank_name() {
    let result = VolunteerProfileUpdate::try_from_draft(ProfileDraft {
        name: Some("  "),
        ..ProfileDraft::default()
    });
    assert_eq!(result, Err(VolunteerValidationError::EmptyName));
}

#[rstest]
fn empty_profile_update_reports_empty() {
    let update =
        VolunteerProfileUpdate::try_from_draft(ProfileDraft::default()).expect("valid update");
    assert!(update.is_empty());
}
