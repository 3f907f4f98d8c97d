//! The per-resource handler contract and request context.
//!
//! A resource handler supplies the model type for a route and may customize
//! dispatch through optional hooks. The hooks have no-op defaults, so a
//! minimal handler is just an associated model type; the dispatcher calls
//! them unconditionally instead of probing for their presence.

use crate::model::{FieldValue, Model};
use crate::template::Template;
use uuid::Uuid;

/// Request-scoped context forwarded to every handler hook.
///
/// Carries the request ID used in logs; concrete handlers can thread
/// caller identity or other per-request data through it by wrapping the
/// dispatcher.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    /// Create a context with a specific request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Create a context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}

/// Query description for "list all" fetches.
///
/// Handlers narrow the query through [`RestHandler::modify_query`] by adding
/// equality filters; the datastore applies them in order against field
/// descriptor values.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<(String, FieldValue)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter on a declared field.
    pub fn with_filter(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.filters.push((field.into(), value));
        self
    }
}

/// Contract a concrete resource handler implements to plug into the
/// dispatcher.
///
/// The associated model type is the required part of the contract; the
/// methods are optional hooks:
///
/// * [`template`](Self::template) — restrict or reorder the exposed fields;
///   `None` means the model's default template.
/// * [`modify_query`](Self::modify_query) — narrow the "list all" query.
/// * [`is_authorized`](Self::is_authorized) — per-record visibility and
///   mutation gate. Unauthorized records are indistinguishable from absent
///   ones on the wire.
pub trait RestHandler: Send + Sync {
    type Model: Model;

    fn template(&self) -> Option<Template> {
        None
    }

    fn modify_query(&self, query: ListQuery, _context: &RequestContext) -> ListQuery {
        query
    }

    fn is_authorized(&self, _model: &Self::Model, _context: &RequestContext) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_request_ids_are_unique() {
        let a = RequestContext::with_generated_id();
        let b = RequestContext::with_generated_id();
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn list_query_collects_filters_in_order() {
        let query = ListQuery::new()
            .with_filter("done", FieldValue::Boolean(false))
            .with_filter("order", FieldValue::Integer(1));
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].0, "done");
        assert_eq!(query.filters[1].0, "order");
    }
}
