//! The `ToDo` data model and its field descriptor table.

use crate::model::{FieldDescriptor, FieldError, FieldKind, FieldType, FieldValue, Model};
use chrono::{NaiveDateTime, Utc};

/// A single to-do item.
///
/// `created` is stamped at construction and never touched again; `modified`
/// is refreshed on every save by the decoration hook.
#[derive(Debug, Clone, PartialEq)]
pub struct ToDo {
    pub id: Option<i64>,
    pub text: Option<String>,
    pub order: Option<i64>,
    pub done: Option<bool>,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl Default for ToDo {
    fn default() -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: None,
            text: None,
            order: None,
            done: None,
            created: now,
            modified: now,
        }
    }
}

fn wrong_type(expected: &'static str, actual: FieldValue) -> FieldError {
    FieldError::WrongType {
        expected,
        actual: actual.type_name(),
    }
}

static TODO_FIELDS: &[FieldDescriptor<ToDo>] = &[
    FieldDescriptor {
        name: "text",
        kind: FieldKind::Persistent(FieldType::String),
        get: |m| {
            m.text
                .clone()
                .map(FieldValue::String)
                .unwrap_or(FieldValue::Null)
        },
        set: |m, v| match v {
            FieldValue::String(s) => {
                m.text = Some(s);
                Ok(())
            }
            FieldValue::Null => {
                m.text = None;
                Ok(())
            }
            other => Err(wrong_type("string", other)),
        },
    },
    FieldDescriptor {
        name: "order",
        kind: FieldKind::Persistent(FieldType::Integer),
        get: |m| m.order.map(FieldValue::Integer).unwrap_or(FieldValue::Null),
        set: |m, v| match v {
            FieldValue::Integer(i) => {
                m.order = Some(i);
                Ok(())
            }
            FieldValue::Null => {
                m.order = None;
                Ok(())
            }
            other => Err(wrong_type("int", other)),
        },
    },
    FieldDescriptor {
        name: "done",
        kind: FieldKind::Persistent(FieldType::Boolean),
        get: |m| m.done.map(FieldValue::Boolean).unwrap_or(FieldValue::Null),
        set: |m, v| match v {
            FieldValue::Boolean(b) => {
                m.done = Some(b);
                Ok(())
            }
            FieldValue::Null => {
                m.done = None;
                Ok(())
            }
            other => Err(wrong_type("bool", other)),
        },
    },
    FieldDescriptor {
        name: "created",
        kind: FieldKind::Persistent(FieldType::DateTime),
        get: |m| FieldValue::DateTime(m.created),
        set: |m, v| match v {
            FieldValue::DateTime(dt) => {
                m.created = dt;
                Ok(())
            }
            // A null write leaves the creation stamp alone.
            FieldValue::Null => Ok(()),
            other => Err(wrong_type("datetime", other)),
        },
    },
    FieldDescriptor {
        name: "modified",
        kind: FieldKind::Persistent(FieldType::DateTime),
        get: |m| FieldValue::DateTime(m.modified),
        set: |m, v| match v {
            FieldValue::DateTime(dt) => {
                m.modified = dt;
                Ok(())
            }
            FieldValue::Null => Ok(()),
            other => Err(wrong_type("datetime", other)),
        },
    },
];

impl Model for ToDo {
    fn model_name() -> &'static str {
        "ToDo"
    }

    fn fields() -> &'static [FieldDescriptor<Self>] {
        TODO_FIELDS
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Refresh the modification stamp on every save.
    fn decorate(&mut self) -> Vec<Self> {
        self.modified = Utc::now().naive_utc();
        Vec::new()
    }
}
