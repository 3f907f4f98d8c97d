//! Generic REST over typed data models.
//!
//! Describes a data model once, as a static field descriptor table, and gets
//! a full JSON CRUD surface for it: marshalling in both directions, schema
//! output, per-record authorization, and verb dispatch against a pluggable
//! datastore. The bundled to-do application shows the whole stack wired up.
//!
//! # Core Components
//!
//! - [`Model`] - Trait a data model implements, backed by its descriptor table
//! - [`RestHandler`] - Per-resource contract with optional hooks
//! - [`RestDispatcher`] - Verb dispatch (GET/PUT/POST/DELETE) for one resource
//! - [`Datastore`] - Storage backend trait, with an in-memory implementation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use model_rest::{InMemoryDatastore, RequestContext, RestDispatcher};
//! use model_rest::todo::TodoRestHandler;
//!
//! # async fn example() {
//! let dispatcher = RestDispatcher::new(TodoRestHandler, InMemoryDatastore::new());
//! let context = RequestContext::with_generated_id();
//! let response = dispatcher
//!     .post("todos", None, r#"{"text": "ship it"}"#, &context)
//!     .await;
//! assert_eq!(response.status, 200);
//! # }
//! ```

pub mod codec;
pub mod datastore;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod meta;
pub mod model;
pub mod response;
pub mod routes;
pub mod template;
pub mod todo;

pub use datastore::{Datastore, InMemoryDatastore};
pub use dispatcher::RestDispatcher;
pub use error::{RestError, RestResult};
pub use handler::{ListQuery, RequestContext, RestHandler};
pub use model::{FieldDescriptor, FieldError, FieldKind, FieldType, FieldValue, Model};
pub use response::RestResponse;
pub use routes::{RouteMatch, RouteSet, fix_routes};
pub use template::Template;
