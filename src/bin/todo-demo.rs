//! Scripted to-do session against an in-memory datastore.
//!
//! Walks the full request lifecycle the web app performs: serve the page,
//! inspect the schema, create items, list, update, and delete, printing each
//! request and response pair.

use model_rest::routes::RouteSet;
use model_rest::todo::{REST_BASE, TODO_RESOURCE, TodoRestHandler, todo_page};
use model_rest::{InMemoryDatastore, RequestContext, RestDispatcher, RestResponse};

struct Demo {
    dispatcher: RestDispatcher<TodoRestHandler, InMemoryDatastore<model_rest::todo::ToDo>>,
    routes: RouteSet<()>,
}

impl Demo {
    fn new() -> Self {
        Self {
            dispatcher: RestDispatcher::new(TodoRestHandler, InMemoryDatastore::new()),
            routes: RouteSet::new(Some(REST_BASE)).add(TODO_RESOURCE, ()),
        }
    }

    async fn request(&self, verb: &str, path: &str, body: &str) -> RestResponse {
        let context = RequestContext::with_generated_id();

        if verb == "GET" && path == "/" {
            return todo_page();
        }

        let Some(matched) = self.routes.resolve(path) else {
            return RestResponse::not_found();
        };
        let resource = matched.resource.as_str();
        let arg = matched.arg.as_deref();
        match verb {
            "GET" => self.dispatcher.get(resource, arg, &context).await,
            "PUT" => self.dispatcher.put(resource, arg, body, &context).await,
            "POST" => self.dispatcher.post(resource, arg, body, &context).await,
            "DELETE" => self.dispatcher.delete(resource, arg, &context).await,
            _ => RestResponse::not_found(),
        }
    }

    async fn show(&self, verb: &str, path: &str, body: &str) {
        let response = self.request(verb, path, body).await;
        if body.is_empty() {
            println!("> {verb} {path}");
        } else {
            println!("> {verb} {path}  {body}");
        }
        println!("< {}", response.status);
        if !response.body.is_empty() {
            println!("{}", response.body);
        }
        println!();
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let demo = Demo::new();

    let page = demo.request("GET", "/", "").await;
    println!("> GET /");
    println!("< {} ({} bytes of HTML)\n", page.status, page.body.len());

    demo.show("GET", "/rest/todos/meta", "").await;
    demo.show("POST", "/rest/todos", r#"{"text": "buy milk", "order": 1}"#)
        .await;
    demo.show(
        "POST",
        "/rest/todos",
        r#"{"text": "write report", "order": 2, "done": false}"#,
    )
    .await;
    demo.show("GET", "/rest/todos", "").await;
    demo.show("PUT", "/rest/todos/1", r#"{"done": true}"#).await;
    demo.show("GET", "/rest/todos/1", "").await;
    demo.show("DELETE", "/rest/todos/2", "").await;
    demo.show("GET", "/rest/todos", "").await;

    // A couple of the error shapes.
    demo.show("GET", "/rest/todos/banana", "").await;
    demo.show("POST", "/rest/todos/1", r#"{"text": "nope"}"#).await;
    demo.show("GET", "/rest/todos/999", "").await;
}
