use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);

/// Employee record as stored by the server. The id is server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "coerce_salary")]
    pub salary: f64,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub notes: String,
}

/// Numeric coercion for salary values: numbers pass through, numeric strings
/// are parsed, everything else (including `null` and blank text) counts as 0.
pub fn coerce_salary<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_salary_text(&text).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Parses salary text the way a form field is read: blank is 0, surrounding
/// whitespace is ignored, non-numeric or non-finite text is `None`.
pub fn parse_salary_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
