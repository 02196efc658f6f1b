use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::slug::slugify;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Work {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub creator: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub medium: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub grade: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub concept: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub story: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: Option<String>,
}

impl Work {
    pub fn card_id(&self) -> String {
        match non_empty(self.id.as_deref()) {
            Some(id) => id.to_string(),
            None => slugify(self.title.as_deref().unwrap_or("")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Malformed { line: usize, column: usize, message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Malformed {
                line,
                column,
                message,
            } => write!(f, "malformed catalog at {line}:{column}: {message}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

pub fn parse_works(raw: &str) -> Result<Vec<Work>, CatalogError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn parse_image_list(raw: &str) -> Result<Vec<String>, CatalogError> {
    let entries: Vec<String> = serde_json::from_str(raw)?;
    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

// Display-only fields: numbers and booleans are shown as written, null is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
