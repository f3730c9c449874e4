use chrono::NaiveDate;

use crate::form::section::{RowField, SectionRow};
use crate::form::validation::{parse_date, Section, ValidationFailure};
use crate::models::recruit::Certificate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateField {
    QualifiName,
    AcquDate,
    OrganizeName,
}

impl RowField for CertificateField {
    const ALL: &'static [Self] = &[
        CertificateField::QualifiName,
        CertificateField::AcquDate,
        CertificateField::OrganizeName,
    ];

    fn key(self) -> &'static str {
        match self {
            CertificateField::QualifiName => "qualifiName",
            CertificateField::AcquDate => "acquDate",
            CertificateField::OrganizeName => "organizeName",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CertificateField::QualifiName => "the certificate name",
            CertificateField::AcquDate => "the acquisition date",
            CertificateField::OrganizeName => "the issuing organization",
        }
    }
}

impl SectionRow for Certificate {
    type Field = CertificateField;

    const SECTION: Section = Section::Certificate;

    const REQUIRED: &'static [CertificateField] = CertificateField::ALL;

    const SKIPS_BLANK_ROWS: bool = true;

    fn blank(seq: &str) -> Self {
        Certificate {
            cert_seq: None,
            seq: Some(seq.to_string()),
            qualifi_name: Some(String::new()),
            acqu_date: Some(String::new()),
            organize_name: Some(String::new()),
            checked: false,
        }
    }

    fn field(&self, field: CertificateField) -> Option<&str> {
        match field {
            CertificateField::QualifiName => self.qualifi_name.as_deref(),
            CertificateField::AcquDate => self.acqu_date.as_deref(),
            CertificateField::OrganizeName => self.organize_name.as_deref(),
        }
    }

    fn field_mut(&mut self, field: CertificateField) -> &mut Option<String> {
        match field {
            CertificateField::QualifiName => &mut self.qualifi_name,
            CertificateField::AcquDate => &mut self.acqu_date,
            CertificateField::OrganizeName => &mut self.organize_name,
        }
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn check_values(&self, row_index: usize, today: NaiveDate) -> Result<(), ValidationFailure> {
        let field = CertificateField::AcquDate;
        let acquired = self
            .acqu_date
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| {
                ValidationFailure::format(Section::Certificate, Some(row_index), field.key(), field.label())
            })?;

        if acquired > today {
            return Err(ValidationFailure::future(
                Section::Certificate,
                Some(row_index),
                field.key(),
                field.key(),
                "acquisition date",
            ));
        }
        Ok(())
    }
}
