//! Scalar applicant fields. Name, phone and seq come from the backend and are
//! never edited here.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::form::section::check_choice;
use crate::form::validation::{is_filled, parse_date, Section, ValidationFailure};
use crate::models::options::{CITIES, GENDERS, NONE_SENTINEL, WORK_TYPES};
use crate::models::recruit::Applicant;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantField {
    Birth,
    Gender,
    Email,
    Addr,
    Location,
    WorkType,
}

impl ApplicantField {
    /// Validation scans fields in this order.
    pub const ALL: &'static [ApplicantField] = &[
        ApplicantField::Birth,
        ApplicantField::Gender,
        ApplicantField::Email,
        ApplicantField::Addr,
        ApplicantField::Location,
        ApplicantField::WorkType,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ApplicantField::Birth => "birth",
            ApplicantField::Gender => "gender",
            ApplicantField::Email => "email",
            ApplicantField::Addr => "addr",
            ApplicantField::Location => "location",
            ApplicantField::WorkType => "workType",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicantField::Birth => "the date of birth",
            ApplicantField::Gender => "the gender",
            ApplicantField::Email => "the email address",
            ApplicantField::Addr => "the address",
            ApplicantField::Location => "the preferred work region",
            ApplicantField::WorkType => "the employment type",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == name)
    }

    fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            ApplicantField::Gender => Some(GENDERS),
            ApplicantField::Location => Some(CITIES),
            ApplicantField::WorkType => Some(WORK_TYPES),
            _ => None,
        }
    }
}

pub struct ApplicantEditor<'a> {
    applicant: &'a mut Applicant,
}

impl<'a> ApplicantEditor<'a> {
    pub fn new(applicant: &'a mut Applicant) -> Self {
        Self { applicant }
    }

    pub fn update_field(&mut self, field: ApplicantField, value: Option<String>) {
        *self.slot(field) = value;
    }

    fn slot(&mut self, field: ApplicantField) -> &mut Option<String> {
        match field {
            ApplicantField::Birth => &mut self.applicant.birth,
            ApplicantField::Gender => &mut self.applicant.gender,
            ApplicantField::Email => &mut self.applicant.email,
            ApplicantField::Addr => &mut self.applicant.addr,
            ApplicantField::Location => &mut self.applicant.location,
            ApplicantField::WorkType => &mut self.applicant.work_type,
        }
    }
}

fn value_of(applicant: &Applicant, field: ApplicantField) -> Option<&str> {
    match field {
        ApplicantField::Birth => applicant.birth.as_deref(),
        ApplicantField::Gender => applicant.gender.as_deref(),
        ApplicantField::Email => applicant.email.as_deref(),
        ApplicantField::Addr => applicant.addr.as_deref(),
        ApplicantField::Location => applicant.location.as_deref(),
        ApplicantField::WorkType => applicant.work_type.as_deref(),
    }
}

/// Walks the fields in order and stops at the first problem. Each field is
/// checked for a value (blank or the `none` sentinel fails) and then for its
/// format before the next field is looked at, so a malformed `birth` is
/// reported ahead of a missing `gender`.
pub fn validate_applicant(applicant: &Applicant, today: NaiveDate) -> Result<(), ValidationFailure> {
    for &field in ApplicantField::ALL {
        let value = value_of(applicant, field);
        if !is_filled(value) || value.map(str::trim) == Some(NONE_SENTINEL) {
            return Err(ValidationFailure::required(
                Section::Applicant,
                None,
                field.key(),
                field.label(),
            ));
        }
        check_value(field, value.unwrap_or_default().trim(), today)?;
    }
    Ok(())
}

fn check_value(field: ApplicantField, value: &str, today: NaiveDate) -> Result<(), ValidationFailure> {
    if let Some(choices) = field.choices() {
        return check_choice(
            Section::Applicant,
            None,
            field.key(),
            field.label(),
            Some(value),
            choices,
        );
    }
    match field {
        ApplicantField::Email if !EMAIL_PATTERN.is_match(value) => Err(
            ValidationFailure::format(Section::Applicant, None, field.key(), field.label()),
        ),
        ApplicantField::Birth => match parse_date(value) {
            None => Err(ValidationFailure::format(
                Section::Applicant,
                None,
                field.key(),
                field.label(),
            )),
            Some(birth) if birth > today => Err(ValidationFailure::future(
                Section::Applicant,
                None,
                field.key(),
                field.key(),
                "date of birth",
            )),
            Some(_) => Ok(()),
        },
        _ => Ok(()),
    }
}
