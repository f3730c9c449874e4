//! The form orchestrator owns one application record and is its only writer.
//!
//! Section editors are borrowed views over the record's arrays. An editable
//! form always has at least one education row; deleting the last one seeds a
//! fresh blank row.
//!
//! Submission is two-phase: `prepare_submission` validates and moves the form
//! to `Submitting`, which locks out edits and further submits while the
//! backend call is in flight. The caller then either commits with
//! `complete_submission` or rolls back with `abort_submission`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::form::applicant::{validate_applicant, ApplicantEditor, ApplicantField};
use crate::form::career::CareerField;
use crate::form::certificate::CertificateField;
use crate::form::education::EducationField;
use crate::form::notices::{Notice, NoticeCenter, NoticeLevel};
use crate::form::section::{parse_field, RowField, SectionEditor, SectionRow};
use crate::form::validation::{Section, ValidationFailure};
use crate::models::recruit::{Applicant, Education};

/// Sections in the order whole-form validation visits them.
const VALIDATION_ORDER: [Section; 4] = [
    Section::Applicant,
    Section::Education,
    Section::Career,
    Section::Certificate,
];

const SUBMITTED_NOTICE_KEY: &str = "form.submitted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("the application has already been submitted")]
    AlreadySubmitted,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("no submission is in progress")]
    NoSubmissionPending,

    #[error("'{0}' has no rows")]
    NotRepeatable(Section),

    #[error("unknown {section} field '{field}'")]
    UnknownField { section: Section, field: String },

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

#[derive(Debug, Clone)]
pub struct FormOrchestrator {
    applicant: Applicant,
    state: FormState,
    highlight: Option<ValidationFailure>,
    notices: NoticeCenter,
}

fn row_field<F: RowField>(section: Section, name: &str) -> Result<F, FormError> {
    parse_field(name).ok_or_else(|| FormError::UnknownField {
        section,
        field: name.to_string(),
    })
}

impl FormOrchestrator {
    /// A record the backend already marks as submitted opens read-only.
    pub fn new(applicant: Applicant, notice_ttl: Duration) -> Self {
        let state = if applicant.submit_flag {
            FormState::Submitted
        } else {
            FormState::Editing
        };
        let mut form = Self {
            applicant,
            state,
            highlight: None,
            notices: NoticeCenter::new(notice_ttl),
        };
        form.seed_education();
        form
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// The field the UI should focus and flag, if the last validation failed.
    pub fn highlight(&self) -> Option<&ValidationFailure> {
        self.highlight.as_ref()
    }

    pub fn notices(&self, now: DateTime<Utc>) -> Vec<Notice> {
        self.notices.active(now)
    }

    pub fn dismiss_notice(&mut self, key: &str) -> bool {
        self.notices.dismiss(key)
    }

    // ── Mutations ──────────────────────────────────────────────────────────

    pub fn update_applicant(&mut self, field: &str, value: Option<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        let field = ApplicantField::parse(field).ok_or_else(|| FormError::UnknownField {
            section: Section::Applicant,
            field: field.to_string(),
        })?;
        ApplicantEditor::new(&mut self.applicant).update_field(field, value);
        Ok(())
    }

    /// Returns the index of the appended row.
    pub fn add_row(&mut self, section: Section) -> Result<usize, FormError> {
        self.ensure_editing()?;
        let seq = &self.applicant.seq;
        let index = match section {
            Section::Education => SectionEditor::new(&mut self.applicant.educations, seq).add_row(),
            Section::Career => SectionEditor::new(&mut self.applicant.careers, seq).add_row(),
            Section::Certificate => {
                SectionEditor::new(&mut self.applicant.certificates, seq).add_row()
            }
            Section::Applicant => return Err(FormError::NotRepeatable(section)),
        };
        Ok(index)
    }

    /// An out-of-range `row_index` is ignored; an unknown field name is not.
    pub fn update_row(
        &mut self,
        section: Section,
        row_index: usize,
        field: &str,
        value: Option<String>,
    ) -> Result<(), FormError> {
        self.ensure_editing()?;
        let seq = &self.applicant.seq;
        match section {
            Section::Education => {
                let field: EducationField = row_field(section, field)?;
                SectionEditor::new(&mut self.applicant.educations, seq)
                    .update_field(row_index, field, value);
            }
            Section::Career => {
                let field: CareerField = row_field(section, field)?;
                SectionEditor::new(&mut self.applicant.careers, seq)
                    .update_field(row_index, field, value);
            }
            Section::Certificate => {
                let field: CertificateField = row_field(section, field)?;
                SectionEditor::new(&mut self.applicant.certificates, seq)
                    .update_field(row_index, field, value);
            }
            Section::Applicant => return Err(FormError::NotRepeatable(section)),
        }
        Ok(())
    }

    pub fn toggle_selected(&mut self, section: Section, row_index: usize) -> Result<(), FormError> {
        self.ensure_editing()?;
        let seq = &self.applicant.seq;
        match section {
            Section::Education => SectionEditor::new(&mut self.applicant.educations, seq)
                .toggle_selected(row_index),
            Section::Career => {
                SectionEditor::new(&mut self.applicant.careers, seq).toggle_selected(row_index)
            }
            Section::Certificate => SectionEditor::new(&mut self.applicant.certificates, seq)
                .toggle_selected(row_index),
            Section::Applicant => return Err(FormError::NotRepeatable(section)),
        }
        Ok(())
    }

    /// Returns the number of rows removed.
    pub fn delete_selected_rows(&mut self, section: Section) -> Result<usize, FormError> {
        self.ensure_editing()?;
        let seq = &self.applicant.seq;
        let removed = match section {
            Section::Education => {
                SectionEditor::new(&mut self.applicant.educations, seq).delete_selected_rows()
            }
            Section::Career => {
                SectionEditor::new(&mut self.applicant.careers, seq).delete_selected_rows()
            }
            Section::Certificate => {
                SectionEditor::new(&mut self.applicant.certificates, seq).delete_selected_rows()
            }
            Section::Applicant => return Err(FormError::NotRepeatable(section)),
        };
        self.seed_education();
        Ok(removed)
    }

    // ── Validation & submission ────────────────────────────────────────────

    /// Validates one section. A failure raises at most one notice per call.
    pub fn validate_section(&mut self, section: Section, now: DateTime<Utc>) -> Result<(), FormError> {
        self.ensure_editing()?;
        let result = self.check(section, now.date_naive());
        self.report(result, now)?;
        if self.highlight.as_ref().is_some_and(|h| h.section == section) {
            self.highlight = None;
        }
        Ok(())
    }

    /// Validates the whole form (applicant, education, career, certificate)
    /// and returns the payload to hand to the backend: wholly blank career and
    /// certificate rows removed, selection flags cleared. On success the form
    /// is `Submitting` until the submission is completed or aborted.
    pub fn prepare_submission(&mut self, now: DateTime<Utc>) -> Result<Applicant, FormError> {
        self.ensure_editing()?;
        let today = now.date_naive();
        let result = VALIDATION_ORDER
            .into_iter()
            .try_for_each(|section| self.check(section, today));
        self.report(result, now)?;
        self.highlight = None;

        let mut payload = self.applicant.clone();
        payload.careers.retain(|row| !row.is_blank());
        payload.certificates.retain(|row| !row.is_blank());
        payload.educations.iter_mut().for_each(|row| row.checked = false);
        payload.careers.iter_mut().for_each(|row| row.checked = false);
        payload.certificates.iter_mut().for_each(|row| row.checked = false);
        self.state = FormState::Submitting;
        debug!(seq = %self.applicant.seq, "Submission prepared");
        Ok(payload)
    }

    /// Commits a payload the backend accepted and enters the terminal state.
    pub fn complete_submission(&mut self, payload: Applicant, now: DateTime<Utc>) -> Result<(), FormError> {
        self.ensure_submitting()?;
        self.applicant = payload;
        self.applicant.submit_flag = true;
        self.state = FormState::Submitted;
        self.notices.raise(
            SUBMITTED_NOTICE_KEY,
            NoticeLevel::Success,
            "Your application has been submitted.",
            now,
        );
        info!(seq = %self.applicant.seq, "Application submitted");
        Ok(())
    }

    /// Returns a `Submitting` form to editing after the backend refused it.
    pub fn abort_submission(&mut self) -> Result<(), FormError> {
        self.ensure_submitting()?;
        self.state = FormState::Editing;
        info!(seq = %self.applicant.seq, "Submission aborted");
        Ok(())
    }

    fn check(&mut self, section: Section, today: NaiveDate) -> Result<(), ValidationFailure> {
        let seq = &self.applicant.seq;
        match section {
            Section::Applicant => validate_applicant(&self.applicant, today),
            Section::Education => {
                SectionEditor::new(&mut self.applicant.educations, seq).validate_section(today)
            }
            Section::Career => {
                SectionEditor::new(&mut self.applicant.careers, seq).validate_section(today)
            }
            Section::Certificate => {
                SectionEditor::new(&mut self.applicant.certificates, seq).validate_section(today)
            }
        }
    }

    fn report(&mut self, result: Result<(), ValidationFailure>, now: DateTime<Utc>) -> Result<(), FormError> {
        let Err(failure) = result else {
            return Ok(());
        };
        let raised = self
            .notices
            .raise(&failure.message_key, NoticeLevel::Error, &failure.message, now);
        debug!(
            seq = %self.applicant.seq,
            key = %failure.message_key,
            raised,
            "Form validation failed"
        );
        self.highlight = Some(failure.clone());
        Err(FormError::Invalid(failure))
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Editing => Ok(()),
            FormState::Submitting => Err(FormError::SubmissionInFlight),
            FormState::Submitted => Err(FormError::AlreadySubmitted),
        }
    }

    fn ensure_submitting(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Submitting => Ok(()),
            FormState::Editing => Err(FormError::NoSubmissionPending),
            FormState::Submitted => Err(FormError::AlreadySubmitted),
        }
    }

    fn seed_education(&mut self) {
        if self.state == FormState::Editing && self.applicant.educations.is_empty() {
            self.applicant
                .educations
                .push(Education::blank(&self.applicant.seq));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validation::FailureKind;
    use crate::models::recruit::{Career, Certificate};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn fetched() -> Applicant {
        Applicant {
            seq: "123".to_string(),
            name: "John Doe".to_string(),
            phone: "01012345678".to_string(),
            ..Default::default()
        }
    }

    fn form() -> FormOrchestrator {
        FormOrchestrator::new(fetched(), Duration::milliseconds(3000))
    }

    fn fill_applicant(form: &mut FormOrchestrator) {
        for (field, value) in [
            ("birth", "1995-04-02"),
            ("gender", "남"),
            ("email", "john.doe@example.com"),
            ("addr", "1 Sejong-daero"),
            ("location", "서울"),
            ("workType", "정규직"),
        ] {
            form.update_applicant(field, Some(value.to_string())).unwrap();
        }
    }

    fn fill_education(form: &mut FormOrchestrator, index: usize) {
        for (field, value) in [
            ("startPeriod", "2015-03"),
            ("endPeriod", "2019-02"),
            ("division", "졸업"),
            ("schoolName", "Hanyang University"),
            ("location", "서울"),
            ("major", "Computer Science"),
            ("grade", "3.8"),
        ] {
            form.update_row(Section::Education, index, field, Some(value.to_string()))
                .unwrap();
        }
    }

    #[test]
    fn test_new_form_seeds_one_education_row() {
        let form = form();
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.applicant().educations, vec![Education::blank("123")]);
        assert!(form.applicant().careers.is_empty());
        assert!(form.applicant().certificates.is_empty());
    }

    #[test]
    fn test_education_reseeded_after_deleting_all_rows() {
        let mut form = form();
        form.add_row(Section::Education).unwrap();
        form.toggle_selected(Section::Education, 0).unwrap();
        form.toggle_selected(Section::Education, 1).unwrap();
        assert_eq!(form.delete_selected_rows(Section::Education).unwrap(), 2);
        assert_eq!(form.applicant().educations, vec![Education::blank("123")]);
    }

    #[test]
    fn test_career_not_reseeded() {
        let mut form = form();
        form.add_row(Section::Career).unwrap();
        form.toggle_selected(Section::Career, 0).unwrap();
        form.delete_selected_rows(Section::Career).unwrap();
        assert!(form.applicant().careers.is_empty());
    }

    #[test]
    fn test_unknown_field_and_applicant_rows_rejected() {
        let mut form = form();
        assert!(matches!(
            form.update_row(Section::Career, 0, "salary", None),
            Err(FormError::UnknownField { .. })
        ));
        assert_eq!(
            form.add_row(Section::Applicant),
            Err(FormError::NotRepeatable(Section::Applicant))
        );
        assert!(matches!(
            form.update_applicant("phone", Some("01099999999".to_string())),
            Err(FormError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_out_of_range_update_is_noop() {
        let mut form = form();
        let before = form.applicant().clone();
        form.update_row(Section::Education, 5, "major", Some("Math".to_string()))
            .unwrap();
        form.toggle_selected(Section::Certificate, 0).unwrap();
        assert_eq!(form.applicant(), &before);
    }

    #[test]
    fn test_validation_order_starts_with_applicant() {
        let mut form = form();
        let err = form.prepare_submission(now()).unwrap_err();
        let FormError::Invalid(failure) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(failure.section, Section::Applicant);
        assert_eq!(failure.field, "birth");
        assert_eq!(form.highlight(), Some(&failure));
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn test_repeated_failure_raises_one_notice() {
        let mut form = form();
        fill_applicant(&mut form);
        let first = form.validate_section(Section::Education, now());
        let second = form.validate_section(Section::Education, now());
        assert_eq!(first, second);
        let notices = form.notices(now());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].key, "education.startPeriod.required");
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_successful_section_validation_clears_its_highlight() {
        let mut form = form();
        assert!(form.validate_section(Section::Education, now()).is_err());
        fill_education(&mut form, 0);
        form.validate_section(Section::Education, now()).unwrap();
        assert!(form.highlight().is_none());
    }

    #[test]
    fn test_submission_drops_blank_career_and_certificate_rows() {
        let mut form = form();
        fill_applicant(&mut form);
        fill_education(&mut form, 0);
        form.add_row(Section::Career).unwrap();
        form.add_row(Section::Certificate).unwrap();
        form.add_row(Section::Certificate).unwrap();
        for (field, value) in [
            ("qualifiName", "SQLD"),
            ("acquDate", "2021-05-20"),
            ("organizeName", "K-Data"),
        ] {
            form.update_row(Section::Certificate, 0, field, Some(value.to_string()))
                .unwrap();
        }
        form.toggle_selected(Section::Certificate, 0).unwrap();

        let payload = form.prepare_submission(now()).unwrap();
        assert_eq!(payload.educations.len(), 1);
        assert!(payload.careers.is_empty());
        assert_eq!(payload.certificates.len(), 1);
        assert!(!payload.certificates[0].checked);
        // the live record keeps its rows until the backend accepts the payload
        assert_eq!(form.applicant().certificates.len(), 2);
    }

    #[test]
    fn test_reversed_career_period_blocks_submission() {
        let mut form = form();
        fill_applicant(&mut form);
        fill_education(&mut form, 0);
        form.add_row(Section::Career).unwrap();
        for (field, value) in [
            ("startPeriod", "2024-06"),
            ("endPeriod", "2024-01"),
            ("compName", "Acme"),
            ("task", "Engineer"),
            ("location", "대전"),
        ] {
            form.update_row(Section::Career, 0, field, Some(value.to_string()))
                .unwrap();
        }
        let Err(FormError::Invalid(failure)) = form.prepare_submission(now()) else {
            panic!("expected validation failure");
        };
        assert_eq!(failure.kind, FailureKind::PeriodOrder);
        assert_eq!(failure.section, Section::Career);
    }

    fn filled_form() -> FormOrchestrator {
        let mut form = form();
        fill_applicant(&mut form);
        fill_education(&mut form, 0);
        form
    }

    #[test]
    fn test_submit_reaches_terminal_state() {
        let mut form = filled_form();
        let payload = form.prepare_submission(now()).unwrap();
        form.complete_submission(payload, now()).unwrap();
        assert!(form.applicant().submit_flag);
        assert_eq!(form.state(), FormState::Submitted);
        assert_eq!(
            form.add_row(Section::Career),
            Err(FormError::AlreadySubmitted)
        );
        assert!(matches!(
            form.prepare_submission(now()),
            Err(FormError::AlreadySubmitted)
        ));
        assert!(form
            .notices(now())
            .iter()
            .any(|n| n.key == "form.submitted" && n.level == NoticeLevel::Success));
    }

    #[test]
    fn test_submission_in_flight_locks_the_form() {
        let mut form = filled_form();
        form.prepare_submission(now()).unwrap();
        assert_eq!(form.state(), FormState::Submitting);
        assert!(matches!(
            form.prepare_submission(now()),
            Err(FormError::SubmissionInFlight)
        ));
        assert_eq!(
            form.update_applicant("addr", Some("Busan".to_string())),
            Err(FormError::SubmissionInFlight)
        );
        assert_eq!(
            form.delete_selected_rows(Section::Education),
            Err(FormError::SubmissionInFlight)
        );
        assert_eq!(
            form.validate_section(Section::Education, now()),
            Err(FormError::SubmissionInFlight)
        );
    }

    #[test]
    fn test_aborted_submission_returns_to_editing() {
        let mut form = filled_form();
        let before = form.applicant().clone();
        form.prepare_submission(now()).unwrap();
        form.abort_submission().unwrap();
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.applicant(), &before);
        form.add_row(Section::Career).unwrap();
        assert_eq!(form.abort_submission(), Err(FormError::NoSubmissionPending));
    }

    #[test]
    fn test_complete_requires_prepared_submission() {
        let mut form = filled_form();
        let payload = form.applicant().clone();
        assert_eq!(
            form.complete_submission(payload, now()),
            Err(FormError::NoSubmissionPending)
        );
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn test_submitted_form_rejects_validation() {
        let mut form = filled_form();
        let payload = form.prepare_submission(now()).unwrap();
        form.complete_submission(payload, now()).unwrap();
        assert_eq!(
            form.validate_section(Section::Applicant, now()),
            Err(FormError::AlreadySubmitted)
        );
        assert!(form.highlight().is_none());
        assert!(form
            .notices(now())
            .iter()
            .all(|n| n.level == NoticeLevel::Success));
    }

    #[test]
    fn test_already_submitted_record_opens_read_only() {
        let applicant = Applicant {
            submit_flag: true,
            careers: vec![Career::default()],
            certificates: vec![Certificate::default()],
            ..fetched()
        };
        let mut form = FormOrchestrator::new(applicant, Duration::milliseconds(3000));
        assert_eq!(form.state(), FormState::Submitted);
        assert!(form.applicant().educations.is_empty());
        assert_eq!(
            form.update_applicant("addr", None),
            Err(FormError::AlreadySubmitted)
        );
    }
}
