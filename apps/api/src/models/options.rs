//! Fixed choice lists offered by the form's select inputs.

use serde::Serialize;

/// Sentinel value a select input reports before the user picks an option.
pub const NONE_SENTINEL: &str = "none";

pub const CITIES: &[&str] = &[
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종", "경기", "강원", "충북",
    "충남", "전북", "전남", "경북", "경남", "제주",
];

pub const GENDERS: &[&str] = &["남", "여"];

pub const WORK_TYPES: &[&str] = &["정규직", "계약직"];

pub const EDUCATION_DIVISIONS: &[&str] = &["졸업", "중퇴", "재학"];

pub const PHONE_PREFIXES: &[&str] = &["010", "011", "016", "017", "018", "019"];

#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub cities: &'static [&'static str],
    pub genders: &'static [&'static str],
    pub work_types: &'static [&'static str],
    pub education_divisions: &'static [&'static str],
    pub phone_prefixes: &'static [&'static str],
}

pub fn form_options() -> FormOptions {
    FormOptions {
        cities: CITIES,
        genders: GENDERS,
        work_types: WORK_TYPES,
        education_divisions: EDUCATION_DIVISIONS,
        phone_prefixes: PHONE_PREFIXES,
    }
}
