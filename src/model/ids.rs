use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend ids are integers, but some endpoints render them as decimal strings.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid id {:?}", s))),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(#[serde(deserialize_with = "id_from_number_or_string")] pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(#[serde(deserialize_with = "id_from_number_or_string")] pub u64);

impl CompanyId {
    /// Reads a bare id, a decimal string, or an `{id, ...}` object.
    pub(crate) fn from_value(value: &serde_json::Value) -> Option<Self> {
        let id = match value {
            serde_json::Value::Object(obj) => obj.get("id")?,
            other => other,
        };
        match id {
            serde_json::Value::Number(n) => n.as_u64().map(CompanyId),
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok().map(CompanyId),
            _ => None,
        }
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RequestId)
    }
}
