use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Situation posted by the form. Every field is optional: values of the wrong
// shape are coerced to `None` rather than rejected, so a sparse body still
// produces a prompt.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub down: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub distance: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub yard_line: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub quarter: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub our_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub their_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub weather: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl GameState {
    /// Parse a request body. Only a JSON object is a situation; arrays and
    /// scalars are rejected. A repeated key keeps its last value.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            obj @ Value::Object(_) => serde_json::from_value(obj),
            other => Err(serde_json::Error::invalid_type(unexpected(&other), &"a JSON object")),
        }
    }
}

fn unexpected(v: &Value) -> Unexpected<'_> {
    match v {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

// Body of a successful or failed /api/predict call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PredictResponse {
    Playcall { playcall: String },
    Error { error: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Integer coercion used for every numeric form field.
///
/// Accepts integers, floats without a fractional part, and strings that parse
/// as integers once trimmed. Anything else becomes `None`.
pub fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn coerce_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_int<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(coerce_int(&v))
}

fn lenient_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(coerce_text(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_strings_coerce_to_numbers() {
        let gs: GameState = serde_json::from_value(json!({
            "down": 3,
            "distance": "7",
            "timeSeconds": " 5 ",
            "ourScore": "",
            "weather": 1.0,
        }))
        .unwrap();
        assert_eq!(gs.down, Some(3));
        assert_eq!(gs.distance, Some(7));
        assert_eq!(gs.time_seconds, Some(5));
        assert_eq!(gs.our_score, None);
        assert_eq!(gs.weather, Some(1));
    }

    #[test]
    fn wrong_shapes_become_absent() {
        let gs: GameState = serde_json::from_value(json!({
            "down": true,
            "distance": 7.5,
            "quarter": [2],
            "yardLine": { "x": 1 },
            "weather": "rain",
            "additionalInfo": null,
        }))
        .unwrap();
        assert_eq!(gs, GameState::default());
    }

    #[test]
    fn additional_info_keeps_scalars() {
        let gs: GameState =
            serde_json::from_value(json!({ "additionalInfo": 42 })).unwrap();
        assert_eq!(gs.additional_info.as_deref(), Some("42"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        for body in ["[3,7,45]", "\"str\"", "12", "null", "true", "not json"] {
            assert!(GameState::from_json(body.as_bytes()).is_err(), "accepted {}", body);
        }
        let err = GameState::from_json(b"[3,7,45]").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let gs = GameState::from_json(br#"{"down":3,"down":4}"#).unwrap();
        assert_eq!(gs.down, Some(4));
    }

    #[test]
    fn response_shapes() {
        let ok = serde_json::to_string(&PredictResponse::Playcall { playcall: "x".into() }).unwrap();
        assert_eq!(ok, r#"{"playcall":"x"}"#);
        let err = serde_json::to_string(&PredictResponse::Error { error: "boom".into() }).unwrap();
        assert_eq!(err, r#"{"error":"boom"}"#);
        assert_eq!(serde_json::to_string(&HealthResponse { ok: true }).unwrap(), r#"{"ok":true}"#);
    }
}
