//! The to-do application: model, REST handler, and HTML shell.
//!
//! Everything here is thin glue over the generic dispatcher; the model is
//! one descriptor table, the handler takes every hook default, and the page
//! is a static document.

pub mod handler;
pub mod model;
pub mod page;

pub use handler::{REST_BASE, TODO_RESOURCE, TodoRestHandler, todo_routes};
pub use model::ToDo;
pub use page::todo_page;
