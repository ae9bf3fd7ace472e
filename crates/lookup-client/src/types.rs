//! Upstream payload types.
//!
//! The upstream service is loose about JSON types (ids and counters arrive as numbers or strings, flags as
//! booleans, numbers or strings), so every field is optional and deserialized leniently. Absent or
//! unusable fields become `None`; rendering omits them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity lookup body. `success` distinguishes found from not-found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityResponse {
    #[serde(default)]
    pub success: Value,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub account_info: Option<AccountInfo>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub phone_info: Option<PhoneInfo>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub error: Option<String>,
}

impl IdentityResponse {
    /// True when the body carries a truthy `success` flag.
    pub fn is_success(&self) -> bool {
        is_truthy(&self.success)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_bot: Value,
    #[serde(default)]
    pub is_active: Value,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub total_messages: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub total_groups: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub messages_in_groups: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub admin_in_groups: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub usernames_count: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub names_count: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub first_message_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub last_message_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneInfo {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub full_number: Option<String>,
}

impl PhoneInfo {
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.full_number.is_none()
    }
}

/// One flat personal record from the universal endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub father_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub id_number: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub alt_mobile: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub circle: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub address: Option<String>,
}

/// Universal lookup outcome. "No results" and "error" are deliberately the same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniversalLookup {
    Records(Vec<PersonRecord>),
    Empty,
}

impl UniversalLookup {
    /// Array of objects → records in order; single object → one record; anything else → `Empty`.
    pub fn from_json(value: Value) -> Self {
        let records: Vec<PersonRecord> = match value {
            Value::Array(items) => {
                match items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(_) => serde_json::from_value::<PersonRecord>(item).ok(),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()
                {
                    Some(records) => records,
                    None => return UniversalLookup::Empty,
                }
            }
            obj @ Value::Object(_) => match serde_json::from_value::<PersonRecord>(obj) {
                Ok(record) => vec![record],
                Err(_) => return UniversalLookup::Empty,
            },
            _ => return UniversalLookup::Empty,
        };
        if records.is_empty() {
            UniversalLookup::Empty
        } else {
            UniversalLookup::Records(records)
        }
    }

    pub fn records(&self) -> &[PersonRecord] {
        match self {
            UniversalLookup::Records(records) => records,
            UniversalLookup::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Truthiness of a loosely typed JSON flag: null/false/0/""/[]/{} are false, everything else true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Truthy string, number or bool → `Some(text)`; falsy values, arrays and objects → `None`.
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(None);
    }
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Integer, float or numeric string → `Some(count)`; anything else → `None`.
fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

/// Object → `Some(T)`; anything else (including a malformed object) → `None`.
fn de_opt_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
