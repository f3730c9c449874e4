use chrono::NaiveDate;

use crate::form::section::{check_choice, RowField, SectionRow};
use crate::form::validation::{PeriodCheck, Section, ValidationFailure};
use crate::models::options::CITIES;
use crate::models::recruit::Career;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerField {
    StartPeriod,
    EndPeriod,
    CompName,
    Task,
    Location,
}

impl RowField for CareerField {
    const ALL: &'static [Self] = &[
        CareerField::StartPeriod,
        CareerField::EndPeriod,
        CareerField::CompName,
        CareerField::Task,
        CareerField::Location,
    ];

    fn key(self) -> &'static str {
        match self {
            CareerField::StartPeriod => "startPeriod",
            CareerField::EndPeriod => "endPeriod",
            CareerField::CompName => "compName",
            CareerField::Task => "task",
            CareerField::Location => "location",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CareerField::StartPeriod => "the employment start",
            CareerField::EndPeriod => "the employment end",
            CareerField::CompName => "the company name",
            CareerField::Task => "the department/position",
            CareerField::Location => "the work region",
        }
    }
}

impl SectionRow for Career {
    type Field = CareerField;

    const SECTION: Section = Section::Career;

    const REQUIRED: &'static [CareerField] = CareerField::ALL;

    const SKIPS_BLANK_ROWS: bool = true;

    fn blank(seq: &str) -> Self {
        Career {
            car_seq: None,
            seq: Some(seq.to_string()),
            comp_name: Some(String::new()),
            location: Some(String::new()),
            start_period: Some(String::new()),
            end_period: Some(String::new()),
            task: Some(String::new()),
            checked: false,
        }
    }

    fn field(&self, field: CareerField) -> Option<&str> {
        match field {
            CareerField::StartPeriod => self.start_period.as_deref(),
            CareerField::EndPeriod => self.end_period.as_deref(),
            CareerField::CompName => self.comp_name.as_deref(),
            CareerField::Task => self.task.as_deref(),
            CareerField::Location => self.location.as_deref(),
        }
    }

    fn field_mut(&mut self, field: CareerField) -> &mut Option<String> {
        match field {
            CareerField::StartPeriod => &mut self.start_period,
            CareerField::EndPeriod => &mut self.end_period,
            CareerField::CompName => &mut self.comp_name,
            CareerField::Task => &mut self.task,
            CareerField::Location => &mut self.location,
        }
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn check_values(&self, row_index: usize, today: NaiveDate) -> Result<(), ValidationFailure> {
        let location = CareerField::Location;
        check_choice(
            Section::Career,
            Some(row_index),
            location.key(),
            location.label(),
            self.location.as_deref(),
            CITIES,
        )?;

        PeriodCheck {
            section: Section::Career,
            row_index,
            start_field: CareerField::StartPeriod.key(),
            end_field: CareerField::EndPeriod.key(),
            start: self.start_period.as_deref().unwrap_or_default(),
            end: self.end_period.as_deref().unwrap_or_default(),
            label: "employment period",
        }
        .run(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::section::{validate_rows, SectionEditor};
    use crate::form::validation::FailureKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn filled(company: &str) -> Career {
        Career {
            seq: Some("123".to_string()),
            comp_name: Some(company.to_string()),
            location: Some("부산".to_string()),
            start_period: Some("2020-01".to_string()),
            end_period: Some("2023-12".to_string()),
            task: Some("Backend / Senior".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_reversed_period_fails_on_order_not_required() {
        let row = Career {
            start_period: Some("2024-06".to_string()),
            end_period: Some("2024-01".to_string()),
            ..filled("Acme")
        };
        let failure = validate_rows(&[row], today()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::PeriodOrder);
        assert_eq!(failure.field, "startPeriod");
        assert_eq!(failure.message_key, "career.period.order");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![Career::blank("123"), filled("Acme"), Career::blank("123")];
        assert!(validate_rows(&rows, today()).is_ok());
    }

    #[test]
    fn test_empty_section_passes() {
        assert!(validate_rows::<Career>(&[], today()).is_ok());
    }

    #[test]
    fn test_partially_filled_row_reports_missing_field() {
        let row = Career {
            comp_name: Some("Acme".to_string()),
            ..Career::blank("123")
        };
        let failure = validate_rows(&[Career::blank("123"), row], today()).unwrap_err();
        assert_eq!(failure.row_index, Some(1));
        assert_eq!(failure.field, "startPeriod");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let rows = vec![Career {
            task: None,
            ..filled("Acme")
        }];
        let first = validate_rows(&rows, today()).unwrap_err();
        let second = validate_rows(&rows, today()).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_delete_selected_preserves_order() {
        let mut rows = vec![filled("A"), filled("B"), filled("C"), filled("D")];
        let mut editor = SectionEditor::new(&mut rows, "123");
        editor.toggle_selected(1);
        editor.toggle_selected(3);
        editor.toggle_selected(3);
        editor.toggle_selected(2);
        assert_eq!(editor.delete_selected_rows(), 2);

        let names: Vec<_> = rows.iter().filter_map(|r| r.comp_name.as_deref()).collect();
        assert_eq!(names, vec!["A", "D"]);
        assert!(rows.iter().all(|r| !r.checked));
    }

    #[test]
    fn test_delete_may_empty_section() {
        let mut rows = vec![filled("A")];
        let mut editor = SectionEditor::new(&mut rows, "123");
        editor.toggle_selected(0);
        editor.delete_selected_rows();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_add_row_appends_blank() {
        let mut rows = vec![filled("A")];
        let mut editor = SectionEditor::new(&mut rows, "123");
        assert_eq!(editor.add_row(), 1);
        assert_eq!(rows[0], filled("A"));
        assert_eq!(rows[1], Career::blank("123"));
    }
}
