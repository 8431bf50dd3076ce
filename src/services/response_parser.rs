//! Turns free-form model output into a validated [`ModelVerdict`].

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{ModelVerdict, Suggestion, SuggestionCategory};

pub fn parse_model_response(raw: &str) -> Result<ModelVerdict> {
    let value = extract_json(raw)?;
    into_verdict(value)
}

/// Parses the whole reply, then the span from the first `{` to the last `}`.
pub fn extract_json(raw: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => debug!("Model reply is not bare JSON: {}", e),
    }

    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(AppError::Parse(
                "no JSON object found in model reply".to_string(),
            ))
        }
    };

    serde_json::from_str(span).map_err(|e| AppError::Parse(e.to_string()))
}

fn into_verdict(value: Value) -> Result<ModelVerdict> {
    let object = value
        .as_object()
        .ok_or_else(|| AppError::Parse("model reply is not a JSON object".to_string()))?;

    let score = object
        .get("overallScore")
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::Parse("missing numeric overallScore".to_string()))?;

    let items = object
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Parse("missing suggestions array".to_string()))?;

    let suggestions = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match parse_suggestion(item) {
            Ok(suggestion) => Some(suggestion),
            Err(reason) => {
                warn!("Dropping suggestion #{}: {}", idx, reason);
                None
            }
        })
        .collect();

    Ok(ModelVerdict {
        overall_score: score.round().clamp(0.0, 100.0) as u8,
        suggestions,
    })
}

fn parse_suggestion(item: &Value) -> std::result::Result<Suggestion, String> {
    let fields = item.as_object().ok_or("not an object")?;

    let category = required_str(fields, "category")?
        .parse::<SuggestionCategory>()?;

    Ok(Suggestion {
        title: required_str(fields, "title")?.to_string(),
        category,
        description: required_str(fields, "description")?.to_string(),
        recommendation: fields
            .get("recommendation")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> std::result::Result<&'a str, String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing string field `{}`", key))
}
