//! Static HTML shell for the to-do UI.
//!
//! Served for `/`; all behavior lives in the embedded script, which talks
//! to the REST API under `/rest/todos`.

use crate::response::RestResponse;

const TODO_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>To-Do</title>
<style>
body { font-family: sans-serif; max-width: 40em; margin: 2em auto; }
li.done span { text-decoration: line-through; color: #888; }
li { list-style: none; margin: 0.3em 0; }
</style>
</head>
<body>
<h1>To-Do</h1>
<form id="new-todo">
<input type="text" id="text" placeholder="What needs doing?" autofocus>
<button type="submit">Add</button>
</form>
<ul id="todos"></ul>
<script>
var api = "/rest/todos";

function render(todos) {
    todos.sort(function (a, b) { return (a.order || 0) - (b.order || 0); });
    var list = document.getElementById("todos");
    list.innerHTML = "";
    todos.forEach(function (todo) {
        var item = document.createElement("li");
        if (todo.done) { item.className = "done"; }

        var toggle = document.createElement("input");
        toggle.type = "checkbox";
        toggle.checked = !!todo.done;
        toggle.onchange = function () {
            request("PUT", api + "/" + todo.id, { done: toggle.checked }, refresh);
        };

        var label = document.createElement("span");
        label.textContent = " " + (todo.text || "");

        var remove = document.createElement("button");
        remove.textContent = "x";
        remove.onclick = function () {
            request("DELETE", api + "/" + todo.id, null, refresh);
        };

        item.appendChild(toggle);
        item.appendChild(label);
        item.appendChild(remove);
        list.appendChild(item);
    });
}

function request(method, url, body, done) {
    var xhr = new XMLHttpRequest();
    xhr.open(method, url);
    xhr.onload = function () {
        done(xhr.status === 200 && xhr.responseText ? JSON.parse(xhr.responseText) : null);
    };
    xhr.send(body ? JSON.stringify(body) : null);
}

function refresh() {
    request("GET", api, null, function (todos) { render(todos || []); });
}

document.getElementById("new-todo").onsubmit = function (event) {
    event.preventDefault();
    var input = document.getElementById("text");
    if (!input.value) { return; }
    var count = document.getElementById("todos").children.length;
    request("POST", api, { text: input.value, order: count + 1 }, function () {
        input.value = "";
        refresh();
    });
};

refresh();
</script>
</body>
</html>
"#;

/// The to-do page as a 200 HTML response.
pub fn todo_page() -> RestResponse {
    RestResponse::html(TODO_PAGE)
}
