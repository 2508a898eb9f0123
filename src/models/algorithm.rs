use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Tag;

pub type AlgorithmId = i64;

/// A stored code snippet with its description and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Algorithm {
    pub id: AlgorithmId,
    pub name: String,
    pub description: String,
    pub solution_code: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Algorithm {
    /// Creation date in `dd/mm/yyyy` form.
    pub fn created_on(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

/// Body of a create request. The service assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlgorithmDraft {
    pub name: String,
    pub description: String,
    pub solution_code: String,
    pub tags: Vec<Tag>,
}

/// The service writes naive ISO-8601 timestamps; values carrying an offset
/// are normalised to UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Some(value.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }
}
