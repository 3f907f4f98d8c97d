//! End-to-end tests for the to-do REST API, driving the dispatcher through
//! the same route matching the demo binary uses.

use model_rest::routes::RouteSet;
use model_rest::todo::{REST_BASE, TODO_RESOURCE, ToDo, TodoRestHandler};
use model_rest::{InMemoryDatastore, RequestContext, RestDispatcher, RestResponse};
use serde::Serialize;
use serde_json::Value;

struct TestApp {
    dispatcher: RestDispatcher<TodoRestHandler, InMemoryDatastore<ToDo>>,
    routes: RouteSet<()>,
}

impl TestApp {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            dispatcher: RestDispatcher::new(TodoRestHandler, InMemoryDatastore::new()),
            routes: RouteSet::new(Some(REST_BASE)).add(TODO_RESOURCE, ()),
        }
    }

    async fn request(&self, verb: &str, path: &str, body: &str) -> RestResponse {
        let context = RequestContext::with_generated_id();
        let matched = self
            .routes
            .resolve(path)
            .unwrap_or_else(|| panic!("unroutable path: {path}"));
        let resource = matched.resource.as_str();
        let arg = matched.arg.as_deref();
        match verb {
            "GET" => self.dispatcher.get(resource, arg, &context).await,
            "PUT" => self.dispatcher.put(resource, arg, body, &context).await,
            "POST" => self.dispatcher.post(resource, arg, body, &context).await,
            "DELETE" => self.dispatcher.delete(resource, arg, &context).await,
            other => panic!("unsupported verb: {other}"),
        }
    }

    async fn json(&self, verb: &str, path: &str, body: &str) -> Value {
        let response = self.request(verb, path, body).await;
        assert_eq!(response.status, 200, "{verb} {path}: {}", response.body);
        serde_json::from_str(&response.body).unwrap()
    }
}

/// Request body for creating items, serialized the way a typed client would.
#[derive(Serialize)]
struct NewTodo<'a> {
    text: &'a str,
    order: i64,
}

fn new_todo(text: &str, order: i64) -> String {
    serde_json::to_string(&NewTodo { text, order }).unwrap()
}

#[tokio::test]
async fn full_item_lifecycle() {
    let app = TestApp::new();

    let created = app
        .json("POST", "/rest/todos", &new_todo("buy milk", 1))
        .await;
    assert_eq!(created["id"], Value::from(1));
    assert_eq!(created["text"], Value::from("buy milk"));
    assert_eq!(created["order"], Value::from(1));
    assert_eq!(created["done"], Value::Null);

    let fetched = app.json("GET", "/rest/todos/1", "").await;
    assert_eq!(fetched, created);

    let updated = app.json("PUT", "/rest/todos/1", r#"{"done": true}"#).await;
    assert_eq!(updated["done"], Value::from(true));
    assert_eq!(updated["text"], Value::from("buy milk"));

    let deleted = app.request("DELETE", "/rest/todos/1", "").await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.body, "");

    let gone = app.request("GET", "/rest/todos/1", "").await;
    assert_eq!(gone.status, 404);
    assert_eq!(gone.body, "");
}

#[tokio::test]
async fn list_returns_all_items_in_id_order() {
    let app = TestApp::new();
    app.json("POST", "/rest/todos", &new_todo("first", 2)).await;
    app.json("POST", "/rest/todos", &new_todo("second", 1)).await;

    let listed = app.json("GET", "/rest/todos", "").await;
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], Value::from(1));
    assert_eq!(items[0]["text"], Value::from("first"));
    assert_eq!(items[1]["id"], Value::from(2));
}

#[tokio::test]
async fn empty_list_is_an_empty_json_array() {
    let app = TestApp::new();
    let response = app.request("GET", "/rest/todos", "").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn meta_describes_the_declared_fields() {
    let app = TestApp::new();
    let response = app.request("GET", "/rest/todos/meta", "").await;
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        "{\n    \"created\": \"datetime\",\n    \"done\": \"bool\",\n    \"modified\": \"datetime\",\n    \"order\": \"int\",\n    \"text\": \"string\"\n}"
    );
}

#[tokio::test]
async fn update_refreshes_the_modification_stamp() {
    let app = TestApp::new();
    let created = app.json("POST", "/rest/todos", &new_todo("task", 1)).await;
    let stamp = created["modified"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = app.json("PUT", "/rest/todos/1", r#"{"done": true}"#).await;

    assert_eq!(updated["created"], created["created"]);
    assert_ne!(updated["modified"].as_str().unwrap(), stamp);
}

#[tokio::test]
async fn timestamps_use_the_microsecond_wire_format() {
    let app = TestApp::new();
    let created = app.json("POST", "/rest/todos", &new_todo("task", 1)).await;
    let stamp = created["created"].as_str().unwrap();
    // e.g. 2026-08-27T09:15:02.123456Z
    assert_eq!(stamp.len(), 27);
    assert_eq!(&stamp[4..5], "-");
    assert_eq!(&stamp[10..11], "T");
    assert_eq!(&stamp[19..20], ".");
    assert!(stamp.ends_with('Z'));
}

#[tokio::test]
async fn post_with_an_argument_is_rejected() {
    let app = TestApp::new();
    let response = app.request("POST", "/rest/todos/1", &new_todo("x", 1)).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, "KeyError: no arguments accepted for POST");
}

#[tokio::test]
async fn non_numeric_id_is_a_value_error() {
    let app = TestApp::new();
    let response = app.request("GET", "/rest/todos/banana", "").await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, "ValueError: id must be an integer");
}

#[tokio::test]
async fn put_without_id_is_a_key_error() {
    let app = TestApp::new();
    let response = app.request("PUT", "/rest/todos", r#"{"done": true}"#).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, "KeyError: id is required");
}

#[tokio::test]
async fn wrong_field_type_names_the_field() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/rest/todos", r#"{"text": 12}"#)
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        "TypeError: Error assigning 'text': expected string, got integer"
    );
}

#[tokio::test]
async fn unknown_body_keys_are_ignored() {
    let app = TestApp::new();
    let created = app
        .json(
            "POST",
            "/rest/todos",
            r#"{"text": "task", "color": "blue"}"#,
        )
        .await;
    assert_eq!(created["text"], Value::from("task"));
    assert!(created.get("color").is_none());
}

#[tokio::test]
async fn mutations_on_missing_records_are_404s() {
    let app = TestApp::new();
    let put = app.request("PUT", "/rest/todos/99", r#"{"done": true}"#).await;
    let delete = app.request("DELETE", "/rest/todos/99", "").await;
    assert_eq!(put.status, 404);
    assert_eq!(put.body, "");
    assert_eq!(delete.status, 404);
    assert_eq!(delete.body, "");
}

#[tokio::test]
async fn null_clears_an_optional_field() {
    let app = TestApp::new();
    app.json("POST", "/rest/todos", &new_todo("task", 3)).await;
    let updated = app.json("PUT", "/rest/todos/1", r#"{"order": null}"#).await;
    assert_eq!(updated["order"], Value::Null);
    assert_eq!(updated["text"], Value::from("task"));
}
