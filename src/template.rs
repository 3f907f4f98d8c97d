//! Field-exposure templates.
//!
//! A template is an ordered set of field names describing which fields of a
//! model are published through the JSON interface. The default template for a
//! model includes every declared field except "private" ones, whose names
//! start with an underscore.

use crate::model::Model;

/// Depth budget used when no explicit limit is given.
pub const DEFAULT_MAX_DEPTH: i32 = 5;

/// Ordered set of field names exposed over the API.
///
/// Key order follows field declaration order (or insertion order for
/// hand-built templates) and drives codec iteration; duplicates are dropped
/// on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    keys: Vec<String>,
}

impl Template {
    /// Build a template from an explicit key list, preserving first-seen
    /// order and dropping duplicates.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !out.contains(&key) {
                out.push(key);
            }
        }
        Self { keys: out }
    }

    /// Default template for a model class: every declared field except those
    /// with a leading underscore. Returns `None` when the depth budget is
    /// exhausted.
    pub fn default_for<M: Model>(max_depth: i32) -> Option<Self> {
        if max_depth <= 0 {
            return None;
        }
        Some(Self::new(
            M::fields()
                .iter()
                .map(|f| f.name)
                .filter(|name| !name.starts_with('_')),
        ))
    }

    /// Default template with the standard depth budget. The top-level default
    /// always exists since the budget is positive.
    pub fn default_for_model<M: Model>() -> Self {
        Self::default_for::<M>(DEFAULT_MAX_DEPTH).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, FieldKind, FieldType, FieldValue};

    #[derive(Debug, Clone, Default)]
    struct Sample {
        id: Option<i64>,
        visible: Option<i64>,
        _hidden: Option<String>,
    }

    static SAMPLE_FIELDS: &[FieldDescriptor<Sample>] = &[
        FieldDescriptor {
            name: "visible",
            kind: FieldKind::Persistent(FieldType::Integer),
            get: |m| match m.visible {
                Some(v) => FieldValue::Integer(v),
                None => FieldValue::Null,
            },
            set: |m, v| match v {
                FieldValue::Integer(i) => {
                    m.visible = Some(i);
                    Ok(())
                }
                FieldValue::Null => {
                    m.visible = None;
                    Ok(())
                }
                other => Err(crate::model::FieldError::WrongType {
                    expected: "int",
                    actual: other.type_name(),
                }),
            },
        },
        FieldDescriptor {
            name: "_hidden",
            kind: FieldKind::Persistent(FieldType::String),
            get: |m| match &m._hidden {
                Some(v) => FieldValue::String(v.clone()),
                None => FieldValue::Null,
            },
            set: |m, v| match v {
                FieldValue::String(s) => {
                    m._hidden = Some(s);
                    Ok(())
                }
                FieldValue::Null => {
                    m._hidden = None;
                    Ok(())
                }
                other => Err(crate::model::FieldError::WrongType {
                    expected: "string",
                    actual: other.type_name(),
                }),
            },
        },
    ];

    impl Model for Sample {
        fn model_name() -> &'static str {
            "Sample"
        }

        fn fields() -> &'static [FieldDescriptor<Self>] {
            SAMPLE_FIELDS
        }

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }
    }

    #[test]
    fn default_template_excludes_private_fields() {
        let template = Template::default_for_model::<Sample>();
        let keys: Vec<&str> = template.keys().collect();
        assert_eq!(keys, vec!["visible"]);
    }

    #[test]
    fn depth_guard_yields_none() {
        assert!(Template::default_for::<Sample>(0).is_none());
        assert!(Template::default_for::<Sample>(-1).is_none());
        assert!(Template::default_for::<Sample>(1).is_some());
    }

    #[test]
    fn explicit_template_preserves_order_and_dedups() {
        let template = Template::new(["b", "a", "b", "c"]);
        let keys: Vec<&str> = template.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert!(template.contains("a"));
        assert!(!template.contains("d"));
    }
}
