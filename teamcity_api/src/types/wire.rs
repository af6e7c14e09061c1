use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an identifier sent either as a JSON string or a JSON number.
///
/// Build, change and user ids are numbers on the wire while every other id is
/// a string; both are carried as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}
