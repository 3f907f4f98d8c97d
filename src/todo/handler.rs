//! REST wiring for the to-do resource.

use crate::handler::RestHandler;
use crate::todo::ToDo;

/// Resource name the to-do dispatcher is mounted under.
pub const TODO_RESOURCE: &str = "todos";

/// Default base path for the REST route table.
pub const REST_BASE: &str = "/rest";

/// Handler exposing `ToDo` with default hooks: full field exposure, no
/// query narrowing, every record visible to every caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoRestHandler;

impl RestHandler for TodoRestHandler {
    type Model = ToDo;
}

/// Route table for the to-do API, one entry per resource.
pub fn todo_routes(base: Option<&str>) -> Vec<(String, TodoRestHandler)> {
    crate::routes::fix_routes(&[(TODO_RESOURCE, TodoRestHandler)], base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{ListQuery, RequestContext};

    #[test]
    fn default_hooks_pass_everything_through() {
        let handler = TodoRestHandler;
        let context = RequestContext::new("test");
        assert!(handler.template().is_none());
        assert!(handler.is_authorized(&ToDo::default(), &context));
        let query = handler.modify_query(ListQuery::new(), &context);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn routes_mount_under_the_given_base() {
        let routes = todo_routes(Some(REST_BASE));
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].0, "/rest/(todos)(?:/(.*))?");
    }
}
