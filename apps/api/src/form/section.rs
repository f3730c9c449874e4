//! Row editing shared by the repeatable sections (education, career,
//! certificate).

use chrono::NaiveDate;

use crate::form::validation::{is_filled, Section, ValidationFailure};

/// A named field of a section row.
pub trait RowField: Copy + Eq + 'static {
    /// Every editable field, in display order.
    const ALL: &'static [Self];

    /// Wire name (camelCase).
    fn key(self) -> &'static str;

    /// Human label used in messages.
    fn label(self) -> &'static str;
}

pub trait SectionRow: Clone {
    type Field: RowField;

    const SECTION: Section;

    /// Required fields in scan order.
    const REQUIRED: &'static [Self::Field];

    /// Wholly blank rows are skipped by validation and dropped on submit.
    const SKIPS_BLANK_ROWS: bool;

    fn blank(seq: &str) -> Self;

    fn field(&self, field: Self::Field) -> Option<&str>;

    fn field_mut(&mut self, field: Self::Field) -> &mut Option<String>;

    fn checked(&self) -> bool;

    fn set_checked(&mut self, checked: bool);

    /// Checks run after every required field is filled in: choice lists and
    /// date ordering.
    fn check_values(&self, row_index: usize, today: NaiveDate) -> Result<(), ValidationFailure>;

    fn is_blank(&self) -> bool {
        Self::Field::ALL
            .iter()
            .all(|&field| !is_filled(self.field(field)))
    }
}

/// Borrowed view over one section's rows inside the applicant record.
pub struct SectionEditor<'a, R: SectionRow> {
    rows: &'a mut Vec<R>,
    seq: &'a str,
}

impl<'a, R: SectionRow> SectionEditor<'a, R> {
    pub fn new(rows: &'a mut Vec<R>, seq: &'a str) -> Self {
        Self { rows, seq }
    }

    /// Out-of-range indexes are ignored.
    pub fn update_field(&mut self, row_index: usize, field: R::Field, value: Option<String>) {
        if let Some(row) = self.rows.get_mut(row_index) {
            *row.field_mut(field) = value;
        }
    }

    /// Returns the index of the new row.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(R::blank(self.seq));
        self.rows.len() - 1
    }

    pub fn toggle_selected(&mut self, row_index: usize) {
        if let Some(row) = self.rows.get_mut(row_index) {
            row.set_checked(!row.checked());
        }
    }

    /// Returns the number of rows removed.
    pub fn delete_selected_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.checked());
        before - self.rows.len()
    }

    pub fn validate_section(&self, today: NaiveDate) -> Result<(), ValidationFailure> {
        validate_rows(self.rows.as_slice(), today)
    }
}

/// Scans rows in order and stops at the first problem.
pub fn validate_rows<R: SectionRow>(rows: &[R], today: NaiveDate) -> Result<(), ValidationFailure> {
    for (index, row) in rows.iter().enumerate() {
        if R::SKIPS_BLANK_ROWS && row.is_blank() {
            continue;
        }
        if let Some(&missing) = R::REQUIRED
            .iter()
            .find(|&&field| !is_filled(row.field(field)))
        {
            return Err(ValidationFailure::required(
                R::SECTION,
                Some(index),
                missing.key(),
                missing.label(),
            ));
        }
        row.check_values(index, today)?;
    }
    Ok(())
}

/// Parses a field name coming from a request.
pub fn parse_field<F: RowField>(name: &str) -> Option<F> {
    F::ALL.iter().copied().find(|field| field.key() == name)
}

/// `value` must be one of `choices`.
pub(crate) fn check_choice(
    section: Section,
    row_index: Option<usize>,
    field: &'static str,
    label: &str,
    value: Option<&str>,
    choices: &[&str],
) -> Result<(), ValidationFailure> {
    match value.map(str::trim) {
        Some(v) if choices.contains(&v) => Ok(()),
        _ => Err(ValidationFailure::choice(section, row_index, field, label)),
    }
}
