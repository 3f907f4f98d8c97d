//! Model to JSON marshaling driven by field-exposure templates.
//!
//! The codec converts model instances into plain JSON mappings (Jsonables)
//! and applies incoming Jsonables back onto models, enforcing the
//! supported-type allowlist and the fixed date/time wire conventions: dates
//! travel as `YYYY-MM-DDZ`, date-times as `YYYY-MM-DDTHH:MM:SS.ffffffZ`, UTC
//! with a literal `Z` suffix in both directions.

use crate::error::{RestError, RestResult};
use crate::model::{FieldError, FieldKind, FieldType, FieldValue, Model};
use crate::template::Template;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

const DATE_OUT: &str = "%Y-%m-%dZ";
const DATE_TIME_OUT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const DATE_IN: &str = "%Y-%m-%dZ";
const DATE_TIME_IN: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Parse a wire date of the form `YYYY-MM-DDZ`.
pub fn parse_date_string(s: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(s, DATE_IN).map_err(|e| FieldError::InvalidValue(e.to_string()))
}

/// Parse a wire date-time of the form `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
pub fn parse_date_time_string(s: &str) -> Result<NaiveDateTime, FieldError> {
    let parsed = NaiveDateTime::parse_from_str(s, DATE_TIME_IN)
        .map_err(|e| FieldError::InvalidValue(e.to_string()))?;
    // The %.f specifier tolerates a missing fraction; the wire format does not.
    if !s.contains('.') {
        return Err(FieldError::InvalidValue(format!(
            "time data '{s}' does not match format '%Y-%m-%dT%H:%M:%S.%fZ'"
        )));
    }
    Ok(parsed)
}

/// JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a model instance into a Jsonable using a template.
///
/// Falls back to the model's default template when none is supplied. The
/// synthetic `id` key always carries the model's numeric identity. Persistent
/// fields must have a supported declared type; computed attributes pass
/// through as-is.
pub fn to_jsonable<M: Model>(model: &M, template: Option<&Template>) -> RestResult<Value> {
    let owned;
    let template = match template {
        Some(t) => t,
        None => {
            owned = Template::default_for_model::<M>();
            &owned
        }
    };

    let mut out = Map::new();
    out.insert(
        "id".to_string(),
        model.id().map(Value::from).unwrap_or(Value::Null),
    );

    for key in template.keys() {
        let Some(desc) = M::field(key) else {
            // Template may name attributes this model simply doesn't expose.
            continue;
        };
        if let FieldKind::Persistent(declared) = desc.kind {
            if !declared.is_supported() {
                return Err(RestError::UnsupportedType(declared.type_name()));
            }
        }
        out.insert(key.to_string(), field_value_to_json((desc.get)(model)));
    }

    Ok(Value::Object(out))
}

fn field_value_to_json(value: FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Integer(i) => Value::from(i),
        FieldValue::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FieldValue::Boolean(b) => Value::Bool(b),
        FieldValue::String(s) => Value::String(s),
        FieldValue::Date(d) => Value::String(d.format(DATE_OUT).to_string()),
        FieldValue::DateTime(dt) => Value::String(dt.format(DATE_TIME_OUT).to_string()),
        FieldValue::Raw(v) => v,
    }
}

/// Apply an incoming Jsonable onto a model, producing the save and delete
/// sets for the caller to commit.
///
/// The model is always the first entry of the save set. An absent Jsonable
/// leaves the model unchanged. Only keys present in both the template and the
/// Jsonable are assigned; any assignment failure is rewrapped with the field
/// name, preserving the original error kind. No persistence happens here.
pub fn apply_jsonable<M: Model>(
    jsonable: Option<&Value>,
    mut model: M,
    template: Option<&Template>,
) -> RestResult<(Vec<M>, Vec<M>)> {
    if let Some(jsonable) = jsonable {
        let owned;
        let template = match template {
            Some(t) => t,
            None => {
                owned = Template::default_for_model::<M>();
                &owned
            }
        };

        for key in template.keys() {
            let Some(incoming) = jsonable.get(key) else {
                continue;
            };
            let Some(desc) = M::field(key) else {
                continue;
            };
            let value = match desc.kind {
                FieldKind::Persistent(declared) => {
                    if !declared.is_supported() {
                        return Err(RestError::UnsupportedType(declared.type_name()));
                    }
                    json_to_field_value(key, declared, incoming)?
                }
                FieldKind::Computed(_) => FieldValue::Raw(incoming.clone()),
            };
            (desc.set)(&mut model, value).map_err(|e| RestError::assignment(key, e))?;
        }
    }

    Ok((vec![model], Vec::new()))
}

/// Coerce an incoming JSON value to a typed field value per the declared
/// type. Nulls pass through untyped so optional fields can be cleared.
fn json_to_field_value(field: &str, declared: FieldType, value: &Value) -> RestResult<FieldValue> {
    if value.is_null() {
        return Ok(FieldValue::Null);
    }

    let wrong_type = || RestError::FieldAssignment {
        field: field.to_string(),
        kind: "TypeError",
        message: format!(
            "expected {}, got {}",
            declared.type_name(),
            json_type_name(value)
        ),
    };

    match declared {
        FieldType::Integer => value.as_i64().map(FieldValue::Integer).ok_or_else(wrong_type),
        FieldType::Float => value.as_f64().map(FieldValue::Float).ok_or_else(wrong_type),
        FieldType::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(wrong_type),
        FieldType::String => value
            .as_str()
            .map(|s| FieldValue::String(s.to_string()))
            .ok_or_else(wrong_type),
        FieldType::Date => {
            let s = value.as_str().ok_or_else(wrong_type)?;
            parse_date_string(s)
                .map(FieldValue::Date)
                .map_err(|e| RestError::assignment(field, e))
        }
        FieldType::DateTime => {
            let s = value.as_str().ok_or_else(wrong_type)?;
            parse_date_time_string(s)
                .map(FieldValue::DateTime)
                .map_err(|e| RestError::assignment(field, e))
        }
        // Unsupported types are rejected before coercion.
        FieldType::List | FieldType::Reference => {
            Err(RestError::UnsupportedType(declared.type_name()))
        }
    }
}
