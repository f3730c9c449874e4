//! Application records as exchanged with the recruit backend.
//!
//! Wire names are camelCase. Every optional value tolerates `null` or absence,
//! and backend ids may arrive as either strings or numbers.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_id(deserializer)?.ok_or_else(|| de::Error::custom("missing application seq"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_id")]
    pub edu_seq: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub seq: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub start_period: Option<String>,
    #[serde(default)]
    pub end_period: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    #[serde(default, deserialize_with = "lenient_id")]
    pub car_seq: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub seq: Option<String>,
    #[serde(default)]
    pub comp_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_period: Option<String>,
    #[serde(default)]
    pub end_period: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(default, deserialize_with = "lenient_id")]
    pub cert_seq: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub seq: Option<String>,
    #[serde(default)]
    pub qualifi_name: Option<String>,
    #[serde(default)]
    pub acqu_date: Option<String>,
    #[serde(default)]
    pub organize_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub checked: bool,
}

/// The root application record. `seq`, `name` and `phone` are issued by the
/// backend and never edited here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(deserialize_with = "required_id")]
    pub seq: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub birth: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submit_flag: bool,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub careers: Vec<Career>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificates: Vec<Certificate>,
}

/// Read-only split of the phone number for display (`010` / `1234` / `5678`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneParts {
    pub prefix: String,
    pub middle: String,
    pub suffix: String,
}

impl Applicant {
    pub fn phone_parts(&self) -> PhoneParts {
        let chars: Vec<char> = self.phone.chars().collect();
        let slice = |from: usize, to: usize| -> String {
            chars
                .get(from.min(chars.len())..to.min(chars.len()))
                .map(|c| c.iter().collect())
                .unwrap_or_default()
        };
        PhoneParts {
            prefix: slice(0, 3),
            middle: slice(3, 7),
            suffix: slice(7, chars.len()),
        }
    }
}
