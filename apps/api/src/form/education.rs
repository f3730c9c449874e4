use chrono::NaiveDate;

use crate::form::section::{check_choice, RowField, SectionRow};
use crate::form::validation::{PeriodCheck, Section, ValidationFailure};
use crate::models::options::{CITIES, EDUCATION_DIVISIONS};
use crate::models::recruit::Education;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    StartPeriod,
    EndPeriod,
    Division,
    SchoolName,
    Location,
    Major,
    Grade,
}

impl RowField for EducationField {
    const ALL: &'static [Self] = &[
        EducationField::StartPeriod,
        EducationField::EndPeriod,
        EducationField::Division,
        EducationField::SchoolName,
        EducationField::Location,
        EducationField::Major,
        EducationField::Grade,
    ];

    fn key(self) -> &'static str {
        match self {
            EducationField::StartPeriod => "startPeriod",
            EducationField::EndPeriod => "endPeriod",
            EducationField::Division => "division",
            EducationField::SchoolName => "schoolName",
            EducationField::Location => "location",
            EducationField::Major => "major",
            EducationField::Grade => "grade",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EducationField::StartPeriod => "the enrollment start",
            EducationField::EndPeriod => "the enrollment end",
            EducationField::Division => "the graduation status",
            EducationField::SchoolName => "the school name",
            EducationField::Location => "the school location",
            EducationField::Major => "the major",
            EducationField::Grade => "the grade",
        }
    }
}

impl SectionRow for Education {
    type Field = EducationField;

    const SECTION: Section = Section::Education;

    const REQUIRED: &'static [EducationField] = EducationField::ALL;

    const SKIPS_BLANK_ROWS: bool = false;

    fn blank(seq: &str) -> Self {
        Education {
            edu_seq: None,
            seq: Some(seq.to_string()),
            school_name: Some(String::new()),
            division: Some(String::new()),
            start_period: Some(String::new()),
            end_period: Some(String::new()),
            major: Some(String::new()),
            grade: Some(String::new()),
            location: Some(String::new()),
            checked: false,
        }
    }

    fn field(&self, field: EducationField) -> Option<&str> {
        match field {
            EducationField::StartPeriod => self.start_period.as_deref(),
            EducationField::EndPeriod => self.end_period.as_deref(),
            EducationField::Division => self.division.as_deref(),
            EducationField::SchoolName => self.school_name.as_deref(),
            EducationField::Location => self.location.as_deref(),
            EducationField::Major => self.major.as_deref(),
            EducationField::Grade => self.grade.as_deref(),
        }
    }

    fn field_mut(&mut self, field: EducationField) -> &mut Option<String> {
        match field {
            EducationField::StartPeriod => &mut self.start_period,
            EducationField::EndPeriod => &mut self.end_period,
            EducationField::Division => &mut self.division,
            EducationField::SchoolName => &mut self.school_name,
            EducationField::Location => &mut self.location,
            EducationField::Major => &mut self.major,
            EducationField::Grade => &mut self.grade,
        }
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn check_values(&self, row_index: usize, today: NaiveDate) -> Result<(), ValidationFailure> {
        let row = Some(row_index);
        let division = EducationField::Division;
        check_choice(
            Section::Education,
            row,
            division.key(),
            division.label(),
            self.division.as_deref(),
            EDUCATION_DIVISIONS,
        )?;
        let location = EducationField::Location;
        check_choice(
            Section::Education,
            row,
            location.key(),
            location.label(),
            self.location.as_deref(),
            CITIES,
        )?;

        PeriodCheck {
            section: Section::Education,
            row_index,
            start_field: EducationField::StartPeriod.key(),
            end_field: EducationField::EndPeriod.key(),
            start: self.start_period.as_deref().unwrap_or_default(),
            end: self.end_period.as_deref().unwrap_or_default(),
            label: "enrollment period",
        }
        .run(today)
    }
}
