//! Structured validation results.
//!
//! A failure names the section, row and field to highlight plus a stable
//! message key used to deduplicate notices. The presentation layer decides how
//! to focus or style the field.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Applicant,
    Education,
    Career,
    Certificate,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Applicant => "applicant",
            Section::Education => "education",
            Section::Career => "career",
            Section::Certificate => "certificate",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant" => Ok(Section::Applicant),
            "education" | "educations" => Ok(Section::Education),
            "career" | "careers" => Ok(Section::Career),
            "certificate" | "certificates" => Ok(Section::Certificate),
            other => Err(format!("unknown section '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Field left blank.
    Required,
    /// Value does not parse (date, email).
    Format,
    /// Value is not one of the offered choices.
    Choice,
    /// Start period later than end period.
    PeriodOrder,
    /// Date lies after today.
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub section: Section,
    /// `None` for applicant fields.
    pub row_index: Option<usize>,
    pub field: &'static str,
    pub kind: FailureKind,
    pub message_key: String,
    pub message: String,
}

impl ValidationFailure {
    fn new(
        section: Section,
        row_index: Option<usize>,
        field: &'static str,
        kind: FailureKind,
        message_key: String,
        message: String,
    ) -> Self {
        Self {
            section,
            row_index,
            field,
            kind,
            message_key,
            message,
        }
    }

    pub fn required(
        section: Section,
        row_index: Option<usize>,
        field: &'static str,
        label: &str,
    ) -> Self {
        Self::new(
            section,
            row_index,
            field,
            FailureKind::Required,
            format!("{section}.{field}.required"),
            format!("Please fill in {label}."),
        )
    }

    pub fn format(
        section: Section,
        row_index: Option<usize>,
        field: &'static str,
        label: &str,
    ) -> Self {
        Self::new(
            section,
            row_index,
            field,
            FailureKind::Format,
            format!("{section}.{field}.format"),
            format!("Please enter a valid {label}."),
        )
    }

    pub fn choice(
        section: Section,
        row_index: Option<usize>,
        field: &'static str,
        label: &str,
    ) -> Self {
        Self::new(
            section,
            row_index,
            field,
            FailureKind::Choice,
            format!("{section}.{field}.choice"),
            format!("Please choose {label} from the list."),
        )
    }

    /// Reported on the start field.
    pub fn period_order(section: Section, row_index: usize, field: &'static str, label: &str) -> Self {
        Self::new(
            section,
            Some(row_index),
            field,
            FailureKind::PeriodOrder,
            format!("{section}.period.order"),
            format!("The start of the {label} must not be later than its end."),
        )
    }

    pub fn future(
        section: Section,
        row_index: Option<usize>,
        field: &'static str,
        key_stem: &str,
        label: &str,
    ) -> Self {
        Self::new(
            section,
            row_index,
            field,
            FailureKind::Future,
            format!("{section}.{key_stem}.future"),
            format!("The {label} must be in the past."),
        )
    }
}

/// Absent, empty and whitespace-only values all count as not filled in.
pub fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses a `YYYY-MM` period as the first day of that month. A full date is
/// accepted as well.
pub fn parse_period(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    parse_date(value).or_else(|| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok())
}

/// A required start/end period pair on one row.
pub(crate) struct PeriodCheck<'a> {
    pub section: Section,
    pub row_index: usize,
    pub start_field: &'static str,
    pub end_field: &'static str,
    pub start: &'a str,
    pub end: &'a str,
    pub label: &'a str,
}

impl PeriodCheck<'_> {
    /// Format, then ordering, then neither bound in the future.
    pub fn run(&self, today: NaiveDate) -> Result<(), ValidationFailure> {
        let row = Some(self.row_index);
        let start = parse_period(self.start).ok_or_else(|| {
            ValidationFailure::format(self.section, row, self.start_field, self.label)
        })?;
        let end = parse_period(self.end).ok_or_else(|| {
            ValidationFailure::format(self.section, row, self.end_field, self.label)
        })?;

        if start > end {
            return Err(ValidationFailure::period_order(
                self.section,
                self.row_index,
                self.start_field,
                self.label,
            ));
        }
        if start > today {
            return Err(ValidationFailure::future(
                self.section,
                row,
                self.start_field,
                "period",
                self.label,
            ));
        }
        if end > today {
            return Err(ValidationFailure::future(
                self.section,
                row,
                self.end_field,
                "period",
                self.label,
            ));
        }
        Ok(())
    }
}
