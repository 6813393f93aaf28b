//! Payload validation against a [`Schema`]
//!
//! Rules:
//! - the payload must be a JSON object
//! - required fields must be present and non-null
//! - optional fields may be absent or null
//! - every present field must match its declared type and bounds
//! - undeclared fields are ignored
//!
//! All failing fields are collected; the caller sees every problem at once.

use serde_json::Value;

use super::{FieldError, FieldKind, FieldSpec, Schema, ValidationError};

/// Validate a raw payload. Performs no side effects.
pub fn validate(schema: &Schema, payload: &Value) -> Result<(), ValidationError> {
    let obj = payload.as_object().ok_or_else(|| {
        ValidationError::single(FieldError::new(
            "$root",
            "type",
            format!("expected object, got {}", json_type_name(payload)),
        ))
    })?;

    let mut errors = Vec::new();
    for spec in &schema.fields {
        match obj.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    errors.push(FieldError::new(spec.name, "missing", "field required"));
                }
            }
            Some(value) => {
                if let Err(e) = check_value(spec, value) {
                    errors.push(e);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(errors))
    }
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), FieldError> {
    match &spec.kind {
        FieldKind::Text { min_len, max_len } => {
            let s = value
                .as_str()
                .ok_or_else(|| type_mismatch(spec, value))?;
            let len = s.chars().count();
            if len < *min_len {
                return Err(FieldError::new(
                    spec.name,
                    "too_short",
                    format!("should have at least {} characters", min_len),
                ));
            }
            if let Some(max) = max_len {
                if len > *max {
                    return Err(FieldError::new(
                        spec.name,
                        "too_long",
                        format!("should have at most {} characters", max),
                    ));
                }
            }
            Ok(())
        }
        FieldKind::Integer { min, max } => {
            let n = value.as_i64().ok_or_else(|| type_mismatch(spec, value))?;
            check_integer_bounds(spec.name, n, *min, *max)
        }
        FieldKind::Float { min, max } => {
            let n = value.as_f64().ok_or_else(|| type_mismatch(spec, value))?;
            check_float_bounds(spec.name, n, *min, *max)
        }
        FieldKind::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(type_mismatch(spec, value))
            }
        }
    }
}

pub(crate) fn check_integer_bounds(
    field: &str,
    n: i64,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<(), FieldError> {
    if let Some(min) = min {
        if n < min {
            return Err(FieldError::new(
                field,
                "too_small",
                format!("should be greater than or equal to {}", min),
            ));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(FieldError::new(
                field,
                "too_large",
                format!("should be less than or equal to {}", max),
            ));
        }
    }
    Ok(())
}

pub(crate) fn check_float_bounds(
    field: &str,
    n: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), FieldError> {
    if let Some(min) = min {
        if n < min {
            return Err(FieldError::new(
                field,
                "too_small",
                format!("should be greater than or equal to {}", min),
            ));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(FieldError::new(
                field,
                "too_large",
                format!("should be less than or equal to {}", max),
            ));
        }
    }
    Ok(())
}

fn type_mismatch(spec: &FieldSpec, value: &Value) -> FieldError {
    FieldError::new(
        spec.name,
        "type",
        format!(
            "expected {}, got {}",
            spec.kind.type_name(),
            json_type_name(value)
        ),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
