//! Exact decimal parsing for request bodies.
//!
//! JSON numbers arrive as `f64`; they are converted through their shortest
//! round-trip text (`9000.1`, not the binary expansion) before becoming a
//! `BigDecimal`. Strings are parsed as written.

use std::str::FromStr;

use serde::{de::Error, Deserialize, Deserializer};
use sqlx::types::BigDecimal;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<RawDecimal>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawDecimal::Text(text)) => text.trim().to_string(),
        Some(RawDecimal::Number(number)) => number.to_string(),
    };

    BigDecimal::from_str(&text)
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid decimal {:?}: {}", text, e)))
}
