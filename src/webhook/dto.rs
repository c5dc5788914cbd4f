use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_USER_ID: &str = "default";

/// Slot values from `queryResult.parameters`, trimmed and lowercased.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        Self(
            map.iter()
                .filter_map(|(k, v)| normalize(v).map(|v| (k.clone(), v)))
                .collect(),
        )
    }

    /// Non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let value = Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        );
        Self::from_value(Some(&value))
    }
}

fn normalize(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => return items.iter().find_map(normalize),
        Value::Null | Value::Object(_) => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// The parts of a dialogue-platform webhook call this service consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTurn {
    pub intent_name: String,
    pub parameters: Parameters,
    pub user_id: String,
}

impl WebhookTurn {
    /// Missing or mistyped fields fall back to empty values and the default user.
    pub fn from_value(body: &Value) -> Self {
        let intent_name = body
            .pointer("/queryResult/intent/displayName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        let parameters = Parameters::from_value(body.pointer("/queryResult/parameters"));

        let from_session = body
            .get("session")
            .and_then(Value::as_str)
            .and_then(|s| s.rsplit('/').next())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let from_payload = body
            .pointer("/originalDetectIntentRequest/payload/userId")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let user_id = from_session
            .or(from_payload)
            .unwrap_or(DEFAULT_USER_ID)
            .to_string();

        Self {
            intent_name,
            parameters,
            user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
}
