use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for optional timestamps that accepts integers (ms) and RFC3339 strings.
/// `null` reads as `None`; anything else that is not a valid timestamp is an error.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            // Assume it's a Unix timestamp in milliseconds
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .map(Some)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Token counters: `null` reads as 0, like an absent field.
pub fn deserialize_u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}
