//! Schema introspection for client-facing `meta` output.
//!
//! Produces a JSON mapping of field name to declared wire type name, derived
//! from a model's descriptor table and a template. Served for
//! `GET /{resource}/meta`.

use crate::error::{RestError, RestResult};
use crate::model::{FieldKind, Model};
use crate::template::Template;
use serde_json::{Map, Value};

/// Build the schema description for a model class.
///
/// Every template key must name a declared field, or the build fails with an
/// incompatible-template error. Persistent fields report their declared type
/// name; computed fields report their type hint, or null when no hint exists.
/// Unsupported declared types fail the build, naming the offending type.
pub fn model_meta<M: Model>(template: Option<&Template>) -> RestResult<Value> {
    let owned;
    let template = match template {
        Some(t) => t,
        None => {
            owned = Template::default_for_model::<M>();
            &owned
        }
    };

    let mut out = Map::new();
    for key in template.keys() {
        let Some(desc) = M::field(key) else {
            return Err(RestError::IncompatibleTemplate(key.to_string()));
        };
        let entry = match desc.kind {
            FieldKind::Persistent(declared) => {
                if !declared.is_supported() {
                    return Err(RestError::UnsupportedType(declared.type_name()));
                }
                Value::String(declared.type_name().to_string())
            }
            FieldKind::Computed(Some(hint)) => Value::String(hint.type_name().to_string()),
            FieldKind::Computed(None) => Value::Null,
        };
        out.insert(key.to_string(), entry);
    }

    Ok(Value::Object(out))
}
