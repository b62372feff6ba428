//! Tolerant decoders for backend payloads.
//!
//! The portal API is loosely typed: ids and counters arrive as numbers or
//! numeric strings, optional text as `null` or `""`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

pub(crate) fn u64_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Unsigned(value) => Ok(value),
        Scalar::Float(value) => whole_number(value).ok_or_else(|| {
            de::Error::custom(format!("expected a whole number, got {value}"))
        }),
        Scalar::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got {text:?}"))),
        Scalar::Bool(_) => Err(de::Error::custom("expected a number, got a boolean")),
    }
}

/// Counters: `null`, blanks and negatives read as zero.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Unsigned(value)) => u32::try_from(value).unwrap_or(u32::MAX),
        Some(Scalar::Float(value)) => whole_number(value.max(0.0).floor())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Scalar::Text(text)) => text.trim().parse::<u32>().unwrap_or(0),
        Some(Scalar::Bool(_)) | None => 0,
    })
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    #[allow(clippy::cast_precision_loss)]
    Ok(match value {
        Some(Scalar::Unsigned(value)) => value as f64,
        Some(Scalar::Float(value)) => value,
        Some(Scalar::Text(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        Some(Scalar::Bool(_)) | None => 0.0,
    })
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Bool(value)) => value,
        Some(Scalar::Unsigned(value)) => value != 0,
        Some(Scalar::Float(value)) => value != 0.0,
        Some(Scalar::Text(text)) => matches!(text.trim(), "true" | "True" | "1"),
        None => false,
    })
}

/// Text fields: `null` becomes empty, numbers are rendered.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Text(text)) => text,
        Some(Scalar::Unsigned(value)) => value.to_string(),
        Some(Scalar::Float(value)) => value.to_string(),
        Some(Scalar::Bool(value)) => value.to_string(),
        None => String::new(),
    })
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = text(deserializer)?;
    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::u64_from_any")]
        id: u64,
        #[serde(default, deserialize_with = "super::count")]
        count: u32,
        #[serde(default, deserialize_with = "super::flag")]
        locked: bool,
        #[serde(default, deserialize_with = "super::optional_text")]
        note: Option<String>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let probe: Probe =
            serde_json::from_str(r#"{"id":"12","count":"3","locked":1,"note":""}"#).unwrap();
        assert_eq!(probe.id, 12);
        assert_eq!(probe.count, 3);
        assert!(probe.locked);
        assert_eq!(probe.note, None);
    }

    #[test]
    fn nulls_fall_back_to_defaults() {
        let probe: Probe =
            serde_json::from_str(r#"{"id":4,"count":null,"locked":null,"note":null}"#).unwrap();
        assert_eq!(probe.count, 0);
        assert!(!probe.locked);
    }

    #[test]
    fn rejects_non_numeric_id() {
        let result = serde_json::from_str::<Probe>(r#"{"id":"abc"}"#);
        assert!(result.is_err());
    }
}
