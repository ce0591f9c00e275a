//! Forgiving number readers for persisted documents written by older hosts.
//!
//! Garbage becomes NaN (or zero for counts) so normalization can repair it
//! instead of the whole document failing to parse.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn missing_number() -> f64 {
    f64::NAN
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = number_from_value(&value);
    if number.is_finite() && number >= 1.0 {
        Ok(number.floor().min(f64::from(u32::MAX)) as u32)
    } else {
        Ok(0)
    }
}

fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
