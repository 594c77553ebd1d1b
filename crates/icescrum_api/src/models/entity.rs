use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

/// Reference to another iceScrum object (story, sprint) embedded in a task payload.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    #[serde(default, deserialize_with = "deserialize_string_field")]
    pub id: Option<String>,
}

/// Accepts ids and amounts sent either as JSON strings or numbers.
pub(crate) fn deserialize_string_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|val| match val {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => serde_json::to_string(&other).ok(),
    }))
}

/// Keeps strings exactly as sent and renders numbers/booleans as text; only `null` is absent.
pub(crate) fn deserialize_exact_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|val| match val {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => serde_json::to_string(&other).ok(),
    }))
}

/// Same coercion as [`deserialize_exact_text`] for fields that must be present and non-null.
pub(crate) fn deserialize_required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_exact_text(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}
