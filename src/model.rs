//! Typed field descriptors and the model contract.
//!
//! A model is any type with a fixed set of named, typed fields and a numeric
//! identity assigned on first persist. Instead of runtime reflection, each
//! model carries a static descriptor table: an ordered list of field name,
//! semantic type tag, persistence flag, and accessor pair. The template
//! builder and the JSON codec operate purely over this table.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Semantic type tags for declared model fields.
///
/// Only the primitive tags are supported by the codec; `List` and `Reference`
/// exist so a model can declare them and get a well-formed "not supported"
/// error rather than a silent omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    String,
    Date,
    DateTime,
    List,
    Reference,
}

impl FieldType {
    /// The wire-level name used in schema output and error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
            Self::String => "string",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
            Self::Reference => "reference",
        }
    }

    /// Whether the codec can marshal values of this type.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::List | Self::Reference)
    }
}

/// A runtime field value moving between a model instance and the codec.
///
/// `Raw` carries arbitrary JSON for non-persistent (computed) attributes,
/// which are passed through without type checking.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Raw(Value),
}

impl FieldValue {
    /// Short type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Raw(_) => "raw",
        }
    }
}

/// Errors raised by field setters.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("expected {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{0}")]
    InvalidValue(String),
}

impl FieldError {
    /// The wire-level error class name, preserved through assignment wraps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::WrongType { .. } => "TypeError",
            Self::InvalidValue(_) => "ValueError",
        }
    }
}

/// Whether a field is backed by the datastore or computed on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Datastore-backed field with a declared type. The codec enforces the
    /// supported-type allowlist for these.
    Persistent(FieldType),
    /// Computed attribute, optionally carrying a type hint for schema
    /// output. Values pass through the codec unchecked.
    Computed(Option<FieldType>),
}

/// One entry in a model's descriptor table.
pub struct FieldDescriptor<M> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: fn(&M) -> FieldValue,
    pub set: fn(&mut M, FieldValue) -> Result<(), FieldError>,
}

impl<M> FieldDescriptor<M> {
    pub fn is_persistent(&self) -> bool {
        matches!(self.kind, FieldKind::Persistent(_))
    }

    /// The declared type, or the type hint for computed fields.
    pub fn declared_type(&self) -> Option<FieldType> {
        match self.kind {
            FieldKind::Persistent(t) => Some(t),
            FieldKind::Computed(hint) => hint,
        }
    }
}

/// Contract every dispatchable model must satisfy.
///
/// `decorate` and `delete_list` are optional hooks with no-op defaults:
/// `decorate` runs over every model about to be saved and may emit additional
/// models for the same save cycle; `delete_list` supplies auxiliary records
/// to delete alongside the primary target.
pub trait Model: Default + Clone + Send + Sync + 'static {
    /// Stable name identifying the model class.
    fn model_name() -> &'static str;

    /// The descriptor table, in field declaration order.
    fn fields() -> &'static [FieldDescriptor<Self>];

    /// Numeric identity, present once persisted.
    fn id(&self) -> Option<i64>;

    /// Assign the identity on first persist.
    fn set_id(&mut self, id: i64);

    /// Look up a descriptor by field name.
    fn field(name: &str) -> Option<&'static FieldDescriptor<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Post-process this model before persistence. Returned models are
    /// appended to the save set and decorated in turn.
    fn decorate(&mut self) -> Vec<Self> {
        Vec::new()
    }

    /// Auxiliary records to delete when this model is deleted.
    fn delete_list(&self) -> Vec<Self> {
        Vec::new()
    }
}
